use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use configs::AppConfig;
use service::MovieStore;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tracing::{info, warn};

use crate::server::CatalogService;

/// Serve the catalog on an already-bound listener until `shutdown` resolves.
///
/// `request_timeout` bounds every call; a client's own `grpc-timeout` is
/// honoured when shorter. On expiry the handler future is dropped, which
/// releases any pooled connection it held.
pub async fn serve_with_listener<F>(
    listener: TcpListener,
    store: Arc<dyn MovieStore>,
    request_timeout: Duration,
    shutdown: F,
) -> Result<(), tonic::transport::Error>
where
    F: Future<Output = ()> + Send,
{
    Server::builder()
        .timeout(request_timeout)
        .add_service(CatalogService::new(store).into_server())
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Public entry: load configuration, open the store and serve gRPC.
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_and_validate()?;
    common::utils::logging::init_logging_for_env(&cfg.env);

    let store = service::runtime::open_store(&cfg).await?;

    if let Some(admin) = cfg.catalog.admin_addr.as_deref() {
        common::admin_http::spawn_admin_server(admin).await?;
    }

    let addr: SocketAddr = format!("{}:{}", cfg.catalog.host, cfg.catalog.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, service = crate::SERVICE_NAME, backend = store.backend(), "movies catalog listening");

    serve_with_listener(listener, store, cfg.catalog.request_timeout(), shutdown_signal()).await?;
    Ok(())
}
