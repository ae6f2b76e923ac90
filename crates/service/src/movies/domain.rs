use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;

/// A stored catalog entry. `id == 0` only ever appears on values that have
/// not been through a store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u32,
    pub title: String,
    pub year: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields of a movie about to be created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub year: String,
}

impl NewMovie {
    pub fn new(title: impl Into<String>, year: impl Into<String>) -> Self {
        Self { title: title.into(), year: year.into() }
    }
}

/// One page of movies ordered by id descending, plus the store-wide count.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub total: u64,
}

impl TryFrom<models::movie::Model> for Movie {
    type Error = StoreError;

    fn try_from(m: models::movie::Model) -> Result<Self, Self::Error> {
        let id = u32::try_from(m.movie_id)
            .map_err(|_| StoreError::Db(format!("stored movie_id {} out of range", m.movie_id)))?;
        Ok(Movie {
            id,
            title: m.title,
            year: m.year,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        })
    }
}
