//! Gateway response model and the domain errors of the movie use-cases.

use catalog::proto;
use chrono::{DateTime, Utc};
use common::pagination::{MAX_RESULTS_PER_PAGE, MIN_PAGE_NUMBER, MIN_RESULTS_PER_PAGE};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tonic::{Code, Status};
use tracing::{debug, error, info};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: u32,
    pub title: String,
    pub year: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<proto::Movie> for Movie {
    fn from(m: proto::Movie) -> Self {
        Self {
            id: m.id,
            title: m.title,
            year: m.year,
            created_at: DateTime::from_timestamp_millis(m.created_at).unwrap_or_default(),
            updated_at: DateTime::from_timestamp_millis(m.updated_at).unwrap_or_default(),
        }
    }
}

/// One page of movies. `results` echoes the requested page size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieList {
    pub movies: Vec<Movie>,
    pub has_more: bool,
    pub page: u32,
    pub total: u64,
    pub results: u32,
}

/// Body of `POST /v1/movies`. Missing fields decode as empty strings and are
/// rejected by [`validate_movie`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateMovie {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PageSizeError {
    #[error("page size must be greater than 1")]
    TooSmall,
    #[error("page size must be less than 20")]
    TooLarge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BodyError {
    #[error("title cannot be empty")]
    TitleEmpty,
    #[error("year cannot be empty")]
    YearEmpty,
}

#[derive(Debug, Error)]
pub enum MoviesError {
    #[error("page number must be greater than 0")]
    InvalidPageNumber,
    #[error(transparent)]
    InvalidPageSize(#[from] PageSizeError),
    #[error(transparent)]
    InvalidBody(#[from] BodyError),
    #[error("movie not found")]
    NotFound,
    #[error("movie page not found")]
    PageNotFound,
    /// Any catalog failure other than `NOT_FOUND`.
    #[error("catalog call failed: {code:?}: {message}")]
    Internal { code: Code, message: String, details: String },
}

impl MoviesError {
    /// Classify a catalog status: `NOT_FOUND` keeps its identity, anything
    /// else is internal.
    pub fn from_status(status: Status) -> Self {
        match status.code() {
            Code::NotFound => MoviesError::NotFound,
            code => MoviesError::Internal {
                code,
                message: status.message().to_string(),
                details: String::from_utf8_lossy(status.details()).into_owned(),
            },
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MoviesError::InvalidPageNumber | MoviesError::InvalidPageSize(_) | MoviesError::InvalidBody(_)
        )
    }

    /// Log at a level matching the failure: internal errors carry full
    /// detail, caller mistakes stay quiet.
    pub fn log(&self, operation: &'static str) {
        match self {
            MoviesError::Internal { code, message, details } => {
                error!(operation, code = ?code, message = %message, details = %details, "catalog request failed");
            }
            MoviesError::NotFound | MoviesError::PageNotFound => debug!(operation, error = %self, "not found"),
            other => info!(operation, error = %other, "rejected request"),
        }
    }
}

pub fn validate_page_number(page_number: i64) -> Result<(), MoviesError> {
    if page_number < MIN_PAGE_NUMBER {
        return Err(MoviesError::InvalidPageNumber);
    }
    Ok(())
}

pub fn validate_results_per_page(results_per_page: i64) -> Result<(), MoviesError> {
    if results_per_page < MIN_RESULTS_PER_PAGE {
        return Err(PageSizeError::TooSmall.into());
    }
    if results_per_page > MAX_RESULTS_PER_PAGE {
        return Err(PageSizeError::TooLarge.into());
    }
    Ok(())
}

pub fn validate_movie(title: &str, year: &str) -> Result<(), MoviesError> {
    if title.is_empty() {
        return Err(BodyError::TitleEmpty.into());
    }
    if year.is_empty() {
        return Err(BodyError::YearEmpty.into());
    }
    Ok(())
}
