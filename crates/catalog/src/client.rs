//! gRPC client for the catalog, used by the gateway.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tonic::transport::{Channel, Endpoint};
use tonic::{Request, Status};
use tracing::info;

use crate::proto::{
    self, movie_service_client::MovieServiceClient, CreateMovieRequest, GetMoviesRequest, MovieIdRequest,
    MovieListResponse,
};

/// Catalog operations as seen by a caller. Failures are raw transport
/// statuses; classifying them is the caller's job.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn get_movie(&self, id: u32) -> Result<proto::Movie, Status>;
    async fn get_movies(&self, page: u32, limit: u32) -> Result<MovieListResponse, Status>;
    async fn create_movie(&self, title: String, year: String) -> Result<proto::Movie, Status>;
    async fn delete_movie(&self, id: u32) -> Result<(), Status>;
}

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("invalid catalog address `{0}`")]
    InvalidUri(String),
    #[error("catalog transport error: {0}")]
    Transport(#[from] tonic::transport::Error),
}

/// tonic-backed [`CatalogClient`]. Every call carries `rpc_timeout` as its
/// gRPC deadline; nothing is retried.
#[derive(Clone)]
pub struct GrpcCatalogClient {
    inner: MovieServiceClient<Channel>,
    rpc_timeout: Duration,
}

impl GrpcCatalogClient {
    fn endpoint(url: &str, connect_timeout: Duration, rpc_timeout: Duration) -> Result<Endpoint, ConnectError> {
        let endpoint = Endpoint::from_shared(url.to_string())
            .map_err(|_| ConnectError::InvalidUri(url.to_string()))?
            .connect_timeout(connect_timeout)
            .timeout(rpc_timeout)
            .tcp_keepalive(Some(Duration::from_secs(30)));
        Ok(endpoint)
    }

    /// Build a client whose channel connects on first use, so the gateway can
    /// start before the catalog is reachable.
    pub fn connect_lazy(url: &str, connect_timeout: Duration, rpc_timeout: Duration) -> Result<Self, ConnectError> {
        let channel = Self::endpoint(url, connect_timeout, rpc_timeout)?.connect_lazy();
        info!(%url, rpc_timeout_ms = rpc_timeout.as_millis() as u64, "catalog client configured");
        Ok(Self { inner: MovieServiceClient::new(channel), rpc_timeout })
    }

    /// Connect eagerly, failing if the catalog is not reachable.
    pub async fn connect(url: &str, connect_timeout: Duration, rpc_timeout: Duration) -> Result<Self, ConnectError> {
        let channel = Self::endpoint(url, connect_timeout, rpc_timeout)?.connect().await?;
        Ok(Self { inner: MovieServiceClient::new(channel), rpc_timeout })
    }

    fn request<T>(&self, message: T) -> Request<T> {
        let mut request = Request::new(message);
        request.set_timeout(self.rpc_timeout);
        request
    }
}

#[async_trait]
impl CatalogClient for GrpcCatalogClient {
    async fn get_movie(&self, id: u32) -> Result<proto::Movie, Status> {
        let mut client = self.inner.clone();
        Ok(client.get_movie(self.request(MovieIdRequest { id })).await?.into_inner())
    }

    async fn get_movies(&self, page: u32, limit: u32) -> Result<MovieListResponse, Status> {
        let mut client = self.inner.clone();
        Ok(client
            .get_movies(self.request(GetMoviesRequest { page, limit }))
            .await?
            .into_inner())
    }

    async fn create_movie(&self, title: String, year: String) -> Result<proto::Movie, Status> {
        let mut client = self.inner.clone();
        Ok(client
            .create_movie(self.request(CreateMovieRequest { title, year }))
            .await?
            .into_inner())
    }

    async fn delete_movie(&self, id: u32) -> Result<(), Status> {
        let mut client = self.inner.clone();
        client.delete_movie(self.request(MovieIdRequest { id })).await?;
        Ok(())
    }
}
