use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::response;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    /// A scrape attempt that produced a failed record; carries the record's
    /// error string verbatim.
    #[error("{0}")]
    ScrapeFailed(String),

    #[error("Failed to fetch page: {0}")]
    FetchError(String),

    #[error("Error parsing content: {0}")]
    ParseError(String),

    #[error("Please scrape a website first")]
    NothingScraped,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::ScrapeFailed(_)
            | AppError::FetchError(_)
            | AppError::NothingScraped => StatusCode::BAD_REQUEST,
            AppError::ParseError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        response::error::<()>(self.status_code(), self.to_string()).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
