use thiserror::Error;

/// Failures surfaced by a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("movie {0} not found")]
    NotFound(u32),
    #[error("movie id conflict: {0}")]
    Conflict(String),
    #[error("identifier space exhausted")]
    IdsExhausted,
    #[error("seed fixture error: {0}")]
    Seed(String),
    #[error("database error: {0}")]
    Db(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl From<models::errors::ModelError> for StoreError {
    fn from(e: models::errors::ModelError) -> Self {
        use models::errors::ModelError;
        match e {
            ModelError::Conflict(msg) => StoreError::Conflict(msg),
            ModelError::Db(msg) => StoreError::Db(msg),
        }
    }
}
