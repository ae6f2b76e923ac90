//! Movie record store: domain types, the store contract and its backends.

pub mod domain;
pub mod repository;
pub mod memory;
pub mod seaorm;
pub mod seed;

pub use domain::{Movie, MoviePage, NewMovie};
pub use memory::InMemoryMovieStore;
pub use repository::MovieStore;
pub use seaorm::SeaOrmMovieStore;
