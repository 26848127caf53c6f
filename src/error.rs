use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use sea_orm::SqlErr;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("movie {0} not found")]
    NotFound(i32),
    #[error("a movie titled \"{0}\" is already in the list")]
    Conflict(String),
    #[error("catalog request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error(transparent)]
    Db(sea_orm::DbErr),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Db(err)
    }
}

impl AppError {
    /// Maps a failed insert to Conflict when the title collides.
    pub fn from_insert_err(err: sea_orm::DbErr, title: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Conflict(title.to_string()),
            _ => Self::Db(err),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = crate::templates::error_page(self.to_string());
        (status, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
