use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use catalog::GrpcCatalogClient;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::InMemoryMovieStore;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

struct TestApp {
    base_url: String,
    _catalog_shutdown: oneshot::Sender<()>,
}

/// Start a catalog over an empty in-memory store and a gateway in front of
/// it, both on ephemeral ports.
async fn start_stack() -> anyhow::Result<TestApp> {
    let catalog_listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let catalog_addr: SocketAddr = catalog_listener.local_addr()?;
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let store = Arc::new(InMemoryMovieStore::new());
        let shutdown = async {
            let _ = rx.await;
        };
        if let Err(e) = catalog::serve_with_listener(catalog_listener, store, Duration::from_secs(5), shutdown).await {
            eprintln!("catalog error: {}", e);
        }
    });

    let client = GrpcCatalogClient::connect_lazy(
        &format!("http://{}", catalog_addr),
        Duration::from_secs(2),
        Duration::from_secs(5),
    )?;
    let app = server::build_app(Arc::new(client));

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("gateway error: {}", e);
        }
    });

    Ok(TestApp { base_url: format!("http://{}:{}", addr.ip(), addr.port()), _catalog_shutdown: tx })
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().build().expect("reqwest client")
}

async fn create(app: &TestApp, title: &str, year: &str) -> anyhow::Result<Value> {
    let res = client()
        .post(format!("{}/v1/movies", app.base_url))
        .json(&json!({"title": title, "year": year}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body: Value = res.json().await?;
    assert_eq!(body["success"], true);
    Ok(body["data"].clone())
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let app = start_stack().await?;
    let res = client().get(format!("{}/v1/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body, json!({"status": "healthy"}));
    Ok(())
}

#[tokio::test]
async fn e2e_empty_store_page_is_not_found() -> anyhow::Result<()> {
    let app = start_stack().await?;
    let res = client()
        .get(format!("{}/v1/movies?pageNumber=1&resultsPerPage=10", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["message"], "Page not found");
    Ok(())
}

#[tokio::test]
async fn e2e_create_and_fetch() -> anyhow::Result<()> {
    let app = start_stack().await?;
    let created = create(&app, "Alice in Wonderland", "2010").await?;
    assert_eq!(created["id"], 1);
    assert_eq!(created["title"], "Alice in Wonderland");
    assert_eq!(created["year"], "2010");
    assert!(created["createdAt"].is_string());

    let res = client().get(format!("{}/v1/movies/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"], created);
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_movie_is_not_found() -> anyhow::Result<()> {
    let app = start_stack().await?;
    let res = client().get(format!("{}/v1/movies/999999999", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["message"], "movie not found");
    Ok(())
}

#[tokio::test]
async fn e2e_invalid_paging_is_bad_request() -> anyhow::Result<()> {
    let app = start_stack().await?;
    let cases = [
        ("pageNumber=0&resultsPerPage=10", "page number must be greater than 0"),
        ("pageNumber=1&resultsPerPage=1", "page size must be greater than 1"),
        ("pageNumber=1&resultsPerPage=21", "page size must be less than 20"),
    ];
    for (query, details) in cases {
        let res = client().get(format!("{}/v1/movies?{}", app.base_url, query)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST, "{query}");
        let body: Value = res.json().await?;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["details"], details);
    }
    Ok(())
}

#[tokio::test]
async fn e2e_paging_reports_has_more() -> anyhow::Result<()> {
    let app = start_stack().await?;
    for i in 1..=5 {
        create(&app, &format!("Movie {i}"), "2000").await?;
    }

    let res = client()
        .get(format!("{}/v1/movies?pageNumber=1&resultsPerPage=2", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    let data = &body["data"];
    assert_eq!(data["hasMore"], true);
    assert_eq!(data["total"], 5);
    assert_eq!(data["page"], 1);
    assert_eq!(data["results"], 2);
    let ids: Vec<u64> = data["movies"].as_array().unwrap().iter().map(|m| m["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![5, 4]);

    let res = client()
        .get(format!("{}/v1/movies?pageNumber=3&resultsPerPage=2", app.base_url))
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["hasMore"], false);
    assert_eq!(body["data"]["movies"].as_array().unwrap().len(), 1);

    let res = client()
        .get(format!("{}/v1/movies?pageNumber=4&resultsPerPage=2", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_delete_then_delete_again() -> anyhow::Result<()> {
    let app = start_stack().await?;
    let created = create(&app, "Up", "2009").await?;
    let url = format!("{}/v1/movies/{}", app.base_url, created["id"]);

    let res = client().delete(&url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    assert!(res.bytes().await?.is_empty());

    let res = client().delete(&url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = client().get(&url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_invalid_input_is_bad_request() -> anyhow::Result<()> {
    let app = start_stack().await?;

    let res = client().get(format!("{}/v1/movies/abc", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error"]["message"], "Invalid `id` value");

    let res = client()
        .post(format!("{}/v1/movies", app.base_url))
        .json(&json!({"title": "", "year": "2010"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error"]["details"], "title cannot be empty");

    // Nothing was stored by the rejected create.
    let res = client().get(format!("{}/v1/movies", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_metrics_are_exposed() -> anyhow::Result<()> {
    let app = start_stack().await?;
    client().get(format!("{}/v1/health", app.base_url)).send().await?;
    let text = client().get(format!("{}/metrics", app.base_url)).send().await?.text().await?;
    assert!(text.contains("movies_gateway_requests_total"));
    Ok(())
}
