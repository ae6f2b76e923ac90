//! Record store for the movie catalog.
//! - One contract (`MovieStore`) with in-memory and SeaORM backends.
//! - Backend chosen at construction time (`runtime::open_store`).
//! - Store failures are reported as `StoreError`.

pub mod errors;
pub mod movies;
pub mod runtime;
#[cfg(test)]
pub mod test_support;

pub use errors::StoreError;
pub use movies::{InMemoryMovieStore, Movie, MoviePage, MovieStore, NewMovie, SeaOrmMovieStore};
