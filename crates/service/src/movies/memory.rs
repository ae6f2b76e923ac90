use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use common::pagination::PageRequest;
use tokio::sync::RwLock;
use tracing::debug;

use super::domain::{Movie, MoviePage, NewMovie};
use super::repository::MovieStore;
use crate::errors::StoreError;

struct Inner {
    movies: BTreeMap<u32, Movie>,
    next_id: u32,
}

impl Inner {
    fn empty() -> Self {
        Self { movies: BTreeMap::new(), next_id: 1 }
    }
}

/// Map-backed store for tests and local runs.
///
/// The record map and the id counter sit behind one lock, so every mutation
/// is applied whole.
pub struct InMemoryMovieStore {
    inner: RwLock<Inner>,
}

impl Default for InMemoryMovieStore {
    fn default() -> Self { Self::new() }
}

impl InMemoryMovieStore {
    pub fn new() -> Self {
        Self { inner: RwLock::new(Inner::empty()) }
    }

    /// Insert records with their own ids, moving the counter past the largest.
    pub async fn seed(&self, movies: impl IntoIterator<Item = Movie>) {
        let mut inner = self.inner.write().await;
        for movie in movies {
            if movie.id >= inner.next_id {
                inner.next_id = movie.id.saturating_add(1);
            }
            inner.movies.insert(movie.id, movie);
        }
    }

    /// Drop every record and restart the counter at 1.
    pub async fn clear(&self) {
        *self.inner.write().await = Inner::empty();
    }

    /// Id the next `create` will receive.
    pub async fn next_id(&self) -> u32 {
        self.inner.read().await.next_id
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.movies.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl MovieStore for InMemoryMovieStore {
    async fn find_all(&self, page: PageRequest) -> Result<MoviePage, StoreError> {
        let inner = self.inner.read().await;
        let total = inner.movies.len() as u64;
        let start = page.offset();
        if start >= total {
            return Ok(MoviePage { movies: Vec::new(), total });
        }
        let movies = inner
            .movies
            .values()
            .rev()
            .skip(start as usize)
            .take(page.results_per_page as usize)
            .cloned()
            .collect();
        Ok(MoviePage { movies, total })
    }

    async fn find_by_id(&self, id: u32) -> Result<Movie, StoreError> {
        self.inner
            .read()
            .await
            .movies
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, movie: NewMovie) -> Result<Movie, StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        if id == u32::MAX {
            return Err(StoreError::IdsExhausted);
        }
        if inner.movies.contains_key(&id) {
            return Err(StoreError::Conflict(format!("id {id} already stored")));
        }
        let now = Utc::now();
        let stored = Movie { id, title: movie.title, year: movie.year, created_at: now, updated_at: now };
        inner.movies.insert(id, stored.clone());
        inner.next_id = id + 1;
        debug!(id, "movie created in memory");
        Ok(stored)
    }

    async fn delete(&self, id: u32) -> Result<(), StoreError> {
        match self.inner.write().await.movies.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id)),
        }
    }

    fn backend(&self) -> &'static str { "memory" }
}
