use async_trait::async_trait;
use common::pagination::PageRequest;

use super::domain::{Movie, MoviePage, NewMovie};
use crate::errors::StoreError;

/// Record store contract shared by every backend.
///
/// Reads never observe a half-written record, and two concurrent `create`
/// calls always receive distinct ids. Dropping a returned future cancels the
/// operation and releases whatever it held.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Page of movies sorted by id descending. A page past the end is an
    /// empty list with the real total, not an error.
    async fn find_all(&self, page: PageRequest) -> Result<MoviePage, StoreError>;

    async fn find_by_id(&self, id: u32) -> Result<Movie, StoreError>;

    /// Assign the next id, persist, and return the stored record.
    async fn create(&self, movie: NewMovie) -> Result<Movie, StoreError>;

    /// Remove the record; `NotFound` when nothing was deleted.
    async fn delete(&self, id: u32) -> Result<(), StoreError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}
