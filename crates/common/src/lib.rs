//! Shared building blocks for the gateway and catalog processes.

pub mod types;
pub mod utils;
pub mod pagination;
pub mod env;
pub mod admin_http;
