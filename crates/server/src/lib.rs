pub mod domain;
pub mod errors;
pub mod observability;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod usecases;

pub use startup::{build_app, run};
