//! Both store backends must behave identically; every scenario here runs
//! against the in-memory map and the SeaORM store on in-memory SQLite.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use common::pagination::PageRequest;
use models::movie::NewRow;
use service::{InMemoryMovieStore, Movie, MovieStore, NewMovie, SeaOrmMovieStore, StoreError};

async fn backends() -> Result<Vec<Arc<dyn MovieStore>>> {
    let db = models::db::connect_sqlite_memory().await?;
    Ok(vec![
        Arc::new(InMemoryMovieStore::new()),
        Arc::new(SeaOrmMovieStore::open(db, None).await?),
    ])
}

async fn create_n(store: &dyn MovieStore, n: usize) -> Result<()> {
    for i in 0..n {
        store.create(NewMovie::new(format!("Movie {i}"), format!("{}", 1990 + i))).await?;
    }
    Ok(())
}

#[tokio::test]
async fn counter_starts_at_one_and_is_monotonic() -> Result<()> {
    for store in backends().await? {
        let a = store.create(NewMovie::new("A", "2000")).await?;
        let b = store.create(NewMovie::new("B", "2001")).await?;
        assert_eq!(a.id, 1, "{}", store.backend());
        assert_eq!(b.id, 2, "{}", store.backend());
    }
    Ok(())
}

#[tokio::test]
async fn find_all_is_sorted_descending_and_bounded() -> Result<()> {
    for store in backends().await? {
        create_n(store.as_ref(), 7).await?;
        for per_page in 2..=20u32 {
            for page_number in 1..=5u32 {
                let page = store.find_all(PageRequest::new(page_number, per_page)).await?;
                assert_eq!(page.total, 7);
                assert!(page.movies.len() <= per_page as usize);
                assert!(page.movies.windows(2).all(|w| w[0].id > w[1].id), "{} not descending", store.backend());

                let start = ((page_number - 1) * per_page) as usize;
                let expected = 7usize.saturating_sub(start).min(per_page as usize);
                assert_eq!(page.movies.len(), expected);
                if let Some(first) = page.movies.first() {
                    assert_eq!(first.id as usize, 7 - start);
                }
            }
        }
    }
    Ok(())
}

#[tokio::test]
async fn empty_store_page_is_empty_not_error() -> Result<()> {
    for store in backends().await? {
        let page = store.find_all(PageRequest::new(1, 10)).await?;
        assert!(page.movies.is_empty());
        assert_eq!(page.total, 0);
    }
    Ok(())
}

#[tokio::test]
async fn create_then_find_round_trips_fields() -> Result<()> {
    for store in backends().await? {
        let created = store.create(NewMovie::new("Alice in Wonderland", "2010")).await?;
        assert_ne!(created.id, 0);

        let found = store.find_by_id(created.id).await?;
        assert_eq!(found.title, "Alice in Wonderland");
        assert_eq!(found.year, "2010");
        assert_eq!(found.id, created.id);
    }
    Ok(())
}

#[tokio::test]
async fn second_delete_is_not_found() -> Result<()> {
    for store in backends().await? {
        let created = store.create(NewMovie::new("Up", "2009")).await?;
        store.delete(created.id).await?;
        let err = store.delete(created.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == created.id), "{}", store.backend());
        assert!(store.find_by_id(created.id).await.unwrap_err().is_not_found());
    }
    Ok(())
}

#[tokio::test]
async fn deletion_does_not_reclaim_ids() -> Result<()> {
    for store in backends().await? {
        create_n(store.as_ref(), 3).await?;
        store.delete(3).await?;
        let next = store.create(NewMovie::new("Next", "2024")).await?;
        assert_eq!(next.id, 4, "{}", store.backend());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_distinct_ids() -> Result<()> {
    const CREATORS: usize = 32;
    for store in backends().await? {
        let mut handles = Vec::with_capacity(CREATORS);
        for i in 0..CREATORS {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.create(NewMovie::new(format!("Concurrent {i}"), "2000")).await
            }));
        }
        let mut ids = HashSet::new();
        for h in handles {
            ids.insert(h.await??.id);
        }
        assert_eq!(ids.len(), CREATORS, "{} produced duplicate ids", store.backend());

        let page = store.find_all(PageRequest::new(1, 20)).await?;
        assert_eq!(page.total, CREATORS as u64);
    }
    Ok(())
}

/// Both backends with one record already stored under `id`.
async fn backends_holding(id: u32) -> Result<Vec<Arc<dyn MovieStore>>> {
    let now = Utc::now();
    let memory = InMemoryMovieStore::new();
    memory
        .seed(vec![Movie { id, title: "Last".into(), year: "2000".into(), created_at: now, updated_at: now }])
        .await;

    let db = models::db::connect_sqlite_memory().await?;
    models::movie::insert(&db, NewRow { movie_id: id, title: "Last".into(), year: "2000".into(), created_at: now })
        .await?;
    Ok(vec![Arc::new(memory), Arc::new(SeaOrmMovieStore::open(db, None).await?)])
}

#[tokio::test]
async fn id_space_ends_below_u32_max() -> Result<()> {
    for store in backends_holding(u32::MAX - 2).await? {
        let last = store.create(NewMovie::new("Penultimate", "2001")).await?;
        assert_eq!(last.id, u32::MAX - 1, "{}", store.backend());
        let err = store.create(NewMovie::new("Overflow", "2002")).await.unwrap_err();
        assert!(matches!(err, StoreError::IdsExhausted), "{}: {err}", store.backend());
    }
    Ok(())
}
