use std::sync::Arc;

use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    AppState,
    error::AppResult,
    models::{AddForm, EditForm},
    ranking, templates,
};

#[derive(Debug, Deserialize)]
pub struct MovieQuery {
    pub id: i32,
}

/// Recomputes and persists rankings on every render, so the page always
/// reflects the current rating order.
pub async fn index(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let mut movies = state.store.list_by_rating().await?;
    ranking::assign(&mut movies);
    state.store.save_rankings(&movies).await?;
    Ok(Html(templates::index_page(&movies)))
}

pub async fn add_form() -> Html<String> {
    Html(templates::add_page(false))
}

pub async fn add_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AddForm>,
) -> AppResult<Html<String>> {
    let Some(params) = form.validate() else {
        return Ok(Html(templates::add_page(true)));
    };

    let results = state.catalog.search(&params).await?;
    Ok(Html(templates::select_page(&results)))
}

pub async fn select(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MovieQuery>,
) -> AppResult<Redirect> {
    let detail = state.catalog.detail(q.id).await?;
    let movie = state.store.insert(detail.into()).await?;
    Ok(Redirect::to(&format!("/edit?id={}", movie.id)))
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MovieQuery>,
) -> AppResult<Html<String>> {
    let movie = state.store.get(q.id).await?;
    Ok(Html(templates::edit_page(&movie, false)))
}

pub async fn edit_submit(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MovieQuery>,
    Form(form): Form<EditForm>,
) -> AppResult<Response> {
    let movie = state.store.get(q.id).await?;

    let Some(update) = form.validate() else {
        return Ok(Html(templates::edit_page(&movie, true)).into_response());
    };

    state.store.update_review(movie.id, update.rating, update.review).await?;
    Ok(Redirect::to("/").into_response())
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MovieQuery>,
) -> AppResult<Redirect> {
    state.store.delete(q.id).await?;
    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::http::StatusCode;

    use crate::{
        db,
        error::AppError,
        models::{CatalogDetail, CatalogMovie, SearchParams},
        store::MovieStore,
        tmdb::MovieCatalog,
    };

    struct FakeCatalog;

    #[async_trait]
    impl MovieCatalog for FakeCatalog {
        async fn search(&self, params: &SearchParams) -> AppResult<Vec<CatalogMovie>> {
            if params.query.eq_ignore_ascii_case("inception") {
                Ok(vec![CatalogMovie {
                    id: 27205,
                    title: "Inception".to_string(),
                    release_date: Some("2010-07-15".to_string()),
                    overview: "A thief who steals corporate secrets.".to_string(),
                }])
            } else {
                Ok(vec![])
            }
        }

        async fn detail(&self, catalog_id: i32) -> AppResult<CatalogDetail> {
            if catalog_id == 27205 {
                Ok(CatalogDetail {
                    title: "Inception".to_string(),
                    year: Some(2010),
                    description: "A thief who steals corporate secrets.".to_string(),
                    img_url: Some("https://image.tmdb.org/t/p/w500/inc.jpg".to_string()),
                })
            } else {
                Err(AppError::Other(anyhow::anyhow!("catalog id {catalog_id} unknown")))
            }
        }
    }

    async fn test_state() -> Arc<AppState> {
        let db = db::connect_and_migrate("sqlite::memory:").await.unwrap();
        Arc::new(AppState { store: MovieStore::new(db), catalog: Arc::new(FakeCatalog) })
    }

    async fn body_string(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn search_form(title: &str, page: &str) -> AddForm {
        AddForm {
            title: title.to_string(),
            include_adult: false,
            language: "en-US".to_string(),
            release_year: String::new(),
            page: page.to_string(),
            region: "us".to_string(),
        }
    }

    #[tokio::test]
    async fn search_renders_selectable_results() {
        let state = test_state().await;

        let resp = add_submit(State(state), Form(search_form("Inception", "1"))).await.unwrap();
        let body = body_string(resp.into_response()).await;

        assert!(body.contains("Inception"));
        assert!(body.contains("/select?id=27205"));
    }

    #[tokio::test]
    async fn invalid_search_rerenders_with_error_flag() {
        let state = test_state().await;

        let resp = add_submit(State(state), Form(search_form("Inception", "9"))).await.unwrap();
        let body = body_string(resp.into_response()).await;

        assert!(body.contains("form-error"));
        assert!(!body.contains("/select?id="));
    }

    #[tokio::test]
    async fn select_then_edit_stores_rating_and_review() {
        let state = test_state().await;

        let resp = select(State(state.clone()), Query(MovieQuery { id: 27205 })).await.unwrap();
        let resp = resp.into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get("location").unwrap(), "/edit?id=1");

        let form = EditForm { rating: "8.8".to_string(), review: "Great".to_string() };
        let resp = edit_submit(State(state.clone()), Query(MovieQuery { id: 1 }), Form(form))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get("location").unwrap(), "/");

        let stored = state.store.get(1).await.unwrap();
        assert_eq!(stored.title, "Inception");
        assert_eq!(stored.year, Some(2010));
        assert_eq!(stored.description, "A thief who steals corporate secrets.");
        assert_eq!(stored.rating, Some(8.8));
        assert_eq!(stored.review.as_deref(), Some("Great"));
    }

    #[tokio::test]
    async fn out_of_range_rating_leaves_movie_unchanged() {
        let state = test_state().await;
        select(State(state.clone()), Query(MovieQuery { id: 27205 })).await.unwrap();

        let form = EditForm { rating: "7.0".to_string(), review: "Solid".to_string() };
        edit_submit(State(state.clone()), Query(MovieQuery { id: 1 }), Form(form)).await.unwrap();

        let form = EditForm { rating: "10.5".to_string(), review: "Too good".to_string() };
        let resp = edit_submit(State(state.clone()), Query(MovieQuery { id: 1 }), Form(form))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_string(resp).await;
        assert!(body.contains("form-error"));

        let stored = state.store.get(1).await.unwrap();
        assert_eq!(stored.rating, Some(7.0));
        assert_eq!(stored.review.as_deref(), Some("Solid"));
    }

    #[tokio::test]
    async fn list_render_persists_rankings() {
        let state = test_state().await;

        for (title, rating) in [("A", 8.0), ("B", 9.5), ("C", 7.0)] {
            let movie = state
                .store
                .insert(crate::models::NewMovie {
                    title: title.to_string(),
                    year: Some(2000),
                    description: String::new(),
                    img_url: None,
                })
                .await
                .unwrap();
            state.store.update_review(movie.id, rating, "reviewed".to_string()).await.unwrap();
        }

        index(State(state.clone())).await.unwrap();

        let movies = state.store.list_by_rating().await.unwrap();
        let by_title = |t: &str| movies.iter().find(|m| m.title == t).unwrap();
        assert_eq!(by_title("B").ranking, Some(1));
        assert_eq!(by_title("A").ranking, Some(2));
        assert_eq!(by_title("C").ranking, Some(3));
    }

    #[tokio::test]
    async fn edit_unknown_movie_is_not_found() {
        let state = test_state().await;
        let err = edit_form(State(state), Query(MovieQuery { id: 42 })).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(42)));
    }

    #[tokio::test]
    async fn delete_redirects_and_removes_the_movie() {
        let state = test_state().await;
        select(State(state.clone()), Query(MovieQuery { id: 27205 })).await.unwrap();

        let resp = delete(State(state.clone()), Query(MovieQuery { id: 1 })).await.unwrap();
        let resp = resp.into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get("location").unwrap(), "/");

        assert!(matches!(state.store.get(1).await.unwrap_err(), AppError::NotFound(1)));
    }

    #[tokio::test]
    async fn selecting_the_same_movie_twice_is_a_conflict() {
        let state = test_state().await;
        select(State(state.clone()), Query(MovieQuery { id: 27205 })).await.unwrap();

        let err = select(State(state), Query(MovieQuery { id: 27205 })).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(title) if title == "Inception"));
    }
}
