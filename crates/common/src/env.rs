//! Environment/runtime helpers
//!
//! Sanity checks run once at process start-up.

use tracing::warn;

/// Returns `true` when the seed fixture is readable; warns otherwise.
///
/// A missing fixture is not fatal: the store simply starts empty.
pub async fn check_seed_fixture(path: &str) -> bool {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => true,
        Ok(_) => {
            warn!(%path, "seed fixture path is not a file; store will start empty");
            false
        }
        Err(e) => {
            warn!(%path, error = %e, "seed fixture not found; store will start empty");
            false
        }
    }
}
