use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::fs;
use tracing::info;

use super::domain::Movie;
use crate::errors::StoreError;

/// Fixture entry; ids come from the file, timestamps default to load time.
#[derive(Clone, Debug, Deserialize)]
pub struct SeedMovie {
    pub id: u32,
    pub title: String,
    pub year: String,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SeedMovie {
    pub fn into_movie(self, now: DateTime<Utc>) -> Movie {
        let ts = self.created_at.unwrap_or(now);
        Movie { id: self.id, title: self.title, year: self.year, created_at: ts, updated_at: ts }
    }
}

/// Parse a JSON array of movies. Ids must be non-zero and unique.
pub fn parse_fixture(bytes: &[u8]) -> Result<Vec<SeedMovie>, StoreError> {
    let movies: Vec<SeedMovie> = serde_json::from_slice(bytes).map_err(|e| StoreError::Seed(e.to_string()))?;
    let mut seen = std::collections::HashSet::with_capacity(movies.len());
    for m in &movies {
        if m.id == 0 {
            return Err(StoreError::Seed(format!("movie `{}` has id 0", m.title)));
        }
        if !seen.insert(m.id) {
            return Err(StoreError::Seed(format!("duplicate id {} in fixture", m.id)));
        }
    }
    Ok(movies)
}

pub async fn load_fixture(path: &Path) -> Result<Vec<SeedMovie>, StoreError> {
    let bytes = fs::read(path)
        .await
        .map_err(|e| StoreError::Seed(format!("{}: {e}", path.display())))?;
    let movies = parse_fixture(&bytes)?;
    info!(path = %path.display(), count = movies.len(), "loaded seed fixture");
    Ok(movies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixture_with_optional_timestamps() {
        let movies = parse_fixture(
            br#"[{"id": 1, "title": "The Matrix", "year": "1999"},
                 {"id": 2, "title": "Inception", "year": "2010", "createdAt": "2020-01-01T00:00:00Z"}]"#,
        )
        .unwrap();
        assert_eq!(movies.len(), 2);
        assert!(movies[0].created_at.is_none());
        assert!(movies[1].created_at.is_some());
    }

    #[test]
    fn rejects_duplicate_and_zero_ids() {
        assert!(parse_fixture(br#"[{"id": 1, "title": "a", "year": "1"}, {"id": 1, "title": "b", "year": "2"}]"#).is_err());
        assert!(parse_fixture(br#"[{"id": 0, "title": "a", "year": "1"}]"#).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(parse_fixture(b"{not json"), Err(StoreError::Seed(_))));
    }
}
