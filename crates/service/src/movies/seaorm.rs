use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use common::pagination::PageRequest;
use models::movie::{self, NewRow};
use sea_orm::DatabaseConnection;
use tracing::{info, instrument, warn};

use super::domain::{Movie, MoviePage, NewMovie};
use super::repository::MovieStore;
use super::seed;
use crate::errors::StoreError;

/// SeaORM-backed store.
///
/// Ids come from an in-process counter initialised from `max(movie_id)`; the
/// unique index on `movie_id` rejects any duplicate that slips through.
pub struct SeaOrmMovieStore {
    db: DatabaseConnection,
    last_id: AtomicU32,
}

impl SeaOrmMovieStore {
    /// Open the store on a migrated connection. When the table is empty and a
    /// fixture path is given, the fixture is inserted first.
    pub async fn open(db: DatabaseConnection, fixture: Option<&Path>) -> Result<Self, StoreError> {
        if let Some(path) = fixture {
            if movie::count(&db).await? == 0 {
                let now = Utc::now();
                let rows: Vec<NewRow> = seed::load_fixture(path)
                    .await?
                    .into_iter()
                    .map(|s| {
                        let m = s.into_movie(now);
                        NewRow { movie_id: m.id, title: m.title, year: m.year, created_at: m.created_at }
                    })
                    .collect();
                let inserted = movie::insert_many(&db, rows).await?;
                info!(inserted, "seeded empty movie table");
            }
        }

        let max = movie::max_movie_id(&db).await?.unwrap_or(0);
        let last = u32::try_from(max).map_err(|_| StoreError::Db(format!("max movie_id {max} out of range")))?;
        info!(last_id = last, "movie id counter initialised");
        Ok(Self { db, last_id: AtomicU32::new(last) })
    }

    /// `u32::MAX` is never handed out, matching the in-memory store.
    fn allocate_id(&self) -> Result<u32, StoreError> {
        self.last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |cur| {
                cur.checked_add(1).filter(|&next| next != u32::MAX)
            })
            .map(|prev| prev + 1)
            .map_err(|_| StoreError::IdsExhausted)
    }
}

#[async_trait]
impl MovieStore for SeaOrmMovieStore {
    #[instrument(skip(self, page), fields(page_number = page.page_number, results_per_page = page.results_per_page))]
    async fn find_all(&self, page: PageRequest) -> Result<MoviePage, StoreError> {
        let (rows, total) = movie::page_desc(&self.db, page.offset(), u64::from(page.results_per_page)).await?;
        let movies = rows.into_iter().map(Movie::try_from).collect::<Result<Vec<_>, _>>()?;
        Ok(MoviePage { movies, total })
    }

    async fn find_by_id(&self, id: u32) -> Result<Movie, StoreError> {
        movie::find_by_movie_id(&self.db, id)
            .await?
            .ok_or(StoreError::NotFound(id))
            .and_then(Movie::try_from)
    }

    #[instrument(skip(self, new), fields(title = %new.title))]
    async fn create(&self, new: NewMovie) -> Result<Movie, StoreError> {
        let id = self.allocate_id()?;
        let row = NewRow { movie_id: id, title: new.title, year: new.year, created_at: Utc::now() };
        match movie::insert(&self.db, row).await {
            Ok(m) => Movie::try_from(m),
            Err(e) => {
                let err = StoreError::from(e);
                if matches!(err, StoreError::Conflict(_)) {
                    warn!(id, "allocated id already stored");
                }
                Err(err)
            }
        }
    }

    async fn delete(&self, id: u32) -> Result<(), StoreError> {
        match movie::delete_by_movie_id(&self.db, id).await? {
            0 => Err(StoreError::NotFound(id)),
            _ => Ok(()),
        }
    }

    fn backend(&self) -> &'static str { "database" }
}
