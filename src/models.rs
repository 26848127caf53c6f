use serde::Deserialize;

/// Locale codes the search form accepts, as rendered in its select inputs.
pub const LANGUAGES: [&str; 3] = ["en-US", "en-AU", "en-UK"];
pub const REGIONS: [&str; 3] = ["us", "uk", "au"];

pub const MIN_PAGE: u32 = 1;
pub const MAX_PAGE: u32 = 5;

/// Raw search form submission. Numeric fields arrive as strings and are
/// checked by `validate`.
#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub title: String,
    #[serde(default)]
    pub include_adult: bool,
    pub language: String,
    #[serde(default)]
    pub release_year: String,
    pub page: String,
    pub region: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchParams {
    pub query: String,
    pub include_adult: bool,
    pub language: String,
    pub page: u32,
    pub release_year: Option<i32>,
    pub region: String,
}

impl AddForm {
    /// None on any rule violation; the handler re-renders the form with the
    /// error flag set.
    pub fn validate(&self) -> Option<SearchParams> {
        let query = self.title.trim();
        if query.is_empty() {
            return None;
        }

        let page: u32 = self.page.trim().parse().ok()?;
        if !(MIN_PAGE..=MAX_PAGE).contains(&page) {
            return None;
        }

        if !LANGUAGES.contains(&self.language.as_str()) {
            return None;
        }
        if !REGIONS.contains(&self.region.as_str()) {
            return None;
        }

        let release_year = match self.release_year.trim() {
            "" => None,
            s => Some(s.parse().ok()?),
        };

        Some(SearchParams {
            query: query.to_string(),
            include_adult: self.include_adult,
            language: self.language.clone(),
            page,
            release_year,
            region: self.region.clone(),
        })
    }
}

/// Raw rating/review form submission.
#[derive(Debug, Deserialize)]
pub struct EditForm {
    pub rating: String,
    pub review: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReviewUpdate {
    pub rating: f64,
    pub review: String,
}

impl EditForm {
    pub fn validate(&self) -> Option<ReviewUpdate> {
        let rating: f64 = self.rating.trim().parse().ok()?;
        if !(0.0..=10.0).contains(&rating) {
            return None;
        }

        let review = self.review.trim();
        if review.is_empty() {
            return None;
        }

        Some(ReviewUpdate { rating, review: review.to_string() })
    }
}

/// One row of the catalog's search results, enough to render the pick list.
#[derive(Clone, Debug, Deserialize)]
pub struct CatalogMovie {
    pub id: i32,
    pub title: String,
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: String,
}

/// Full detail for a chosen catalog id, shaped for insertion.
#[derive(Clone, Debug)]
pub struct CatalogDetail {
    pub title: String,
    pub year: Option<i32>,
    pub description: String,
    pub img_url: Option<String>,
}

/// Fields for a freshly materialized movie; rating, review and ranking stay
/// unset until the edit form is submitted and the list is next rendered.
#[derive(Clone, Debug)]
pub struct NewMovie {
    pub title: String,
    pub year: Option<i32>,
    pub description: String,
    pub img_url: Option<String>,
}

impl From<CatalogDetail> for NewMovie {
    fn from(detail: CatalogDetail) -> Self {
        Self {
            title: detail.title,
            year: detail.year,
            description: detail.description,
            img_url: detail.img_url,
        }
    }
}
