//! Store selection at process start-up.
//!
//! The backend is picked once from configuration and handed to callers as a
//! trait object; nothing else in the process knows which one is running.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use configs::{AppConfig, StoreBackend};
use tracing::info;

use crate::movies::{seed, InMemoryMovieStore, MovieStore, SeaOrmMovieStore};

/// Build the configured store, seeding it from the fixture when available.
pub async fn open_store(cfg: &AppConfig) -> anyhow::Result<Arc<dyn MovieStore>> {
    let fixture_ok = common::env::check_seed_fixture(&cfg.catalog.seed_path).await;
    let fixture = fixture_ok.then(|| Path::new(&cfg.catalog.seed_path));

    let store: Arc<dyn MovieStore> = match cfg.catalog.store {
        StoreBackend::Memory => {
            let store = InMemoryMovieStore::new();
            if let Some(path) = fixture {
                let now = Utc::now();
                let movies = seed::load_fixture(path).await?;
                store.seed(movies.into_iter().map(|m| m.into_movie(now))).await;
            }
            Arc::new(store)
        }
        StoreBackend::Database => {
            let db = models::db::connect_and_migrate(&cfg.database).await?;
            Arc::new(SeaOrmMovieStore::open(db, fixture).await?)
        }
    };
    info!(backend = store.backend(), "record store ready");
    Ok(store)
}
