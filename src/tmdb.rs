use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::AppResult,
    models::{CatalogDetail, CatalogMovie, SearchParams},
};

/// Seam over the movie catalog so handlers can run against an in-memory
/// implementation in tests.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn search(&self, params: &SearchParams) -> AppResult<Vec<CatalogMovie>>;
    async fn detail(&self, catalog_id: i32) -> AppResult<CatalogDetail>;
}

pub struct TmdbClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
    image_base_url: String,
}

impl TmdbClient {
    pub fn new(
        client: reqwest::Client,
        access_token: String,
        base_url: String,
        image_base_url: String,
    ) -> Self {
        if access_token.trim().is_empty() {
            tracing::warn!("no TMDB_ACCESS_TOKEN provided - catalog requests will be rejected upstream");
        }
        Self { client, access_token, base_url, image_base_url }
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn search(&self, params: &SearchParams) -> AppResult<Vec<CatalogMovie>> {
        debug!(query = %params.query, page = params.page, "searching catalog");

        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));
        let mut req = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .query(&[("query", params.query.as_str()), ("language", params.language.as_str())])
            .query(&[("include_adult", params.include_adult)])
            .query(&[("page", params.page)])
            .query(&[("region", params.region.as_str())]);
        if let Some(year) = params.release_year {
            req = req.query(&[("primary_release_year", year)]);
        }

        let resp: SearchResponse = req.send().await?.error_for_status()?.json().await?;
        debug!(results = resp.results.len(), "catalog search returned");
        Ok(resp.results)
    }

    async fn detail(&self, catalog_id: i32) -> AppResult<CatalogDetail> {
        debug!(catalog_id = catalog_id, "fetching catalog detail");

        let url = format!("{}/movie/{}", self.base_url.trim_end_matches('/'), catalog_id);
        let resp: DetailResponse = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .query(&[("language", "en-US")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(CatalogDetail {
            title: resp.title,
            year: resp.release_date.as_deref().and_then(leading_year),
            description: resp.overview.unwrap_or_default(),
            img_url: resp
                .poster_path
                .map(|p| format!("{}{}", self.image_base_url.trim_end_matches('/'), p)),
        })
    }
}

/// The year token in front of the first '-' of a TMDB release date.
fn leading_year(date: &str) -> Option<i32> {
    date.split('-').next().and_then(|y| y.parse().ok())
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<CatalogMovie>,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    title: String,
    release_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
}
