//! Movie catalog service
//!
//! - `proto`: wire messages and generated `MovieService` stubs
//! - `server`: `CatalogService`, the RPC facade over a record store
//! - `client`: `CatalogClient` trait and its tonic implementation
//! - `startup`: process entry for the catalog binary

#![forbid(unsafe_code)]

pub mod proto;
pub mod server;
pub mod client;
pub mod metrics;
pub mod startup;

pub use client::{CatalogClient, ConnectError, GrpcCatalogClient};
pub use server::CatalogService;
pub use startup::{run, serve_with_listener};

/// Fully-qualified gRPC service name.
pub const SERVICE_NAME: &str = "movies.v1.MovieService";
