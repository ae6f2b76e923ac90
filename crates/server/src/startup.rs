use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use catalog::GrpcCatalogClient;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, AppState};
use crate::usecases::MoviesUseCases;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the full gateway around a catalog client.
pub fn build_app(client: Arc<dyn catalog::CatalogClient>) -> Router {
    let state = AppState::new(MoviesUseCases::new(client));
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_and_validate()?;
    common::utils::logging::init_logging_for_env(&cfg.env);

    let gw = &cfg.gateway;
    let client = GrpcCatalogClient::connect_lazy(&gw.catalog_url, gw.connect_timeout(), gw.rpc_timeout())?;
    let app = build_app(Arc::new(client));

    let addr: SocketAddr = format!("{}:{}", gw.host, gw.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, catalog = %gw.catalog_url, "movies gateway listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
