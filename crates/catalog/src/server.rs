//! gRPC server implementation for the catalog.
//!
//! Handles transport requests and delegates to the record store. Store
//! failures are reduced to `NOT_FOUND` or `INTERNAL` with a short message;
//! the full error only goes to the log.

use std::sync::Arc;

use common::pagination::PageRequest;
use service::{MovieStore, NewMovie, StoreError};
use tonic::{Request, Response, Status};
use tracing::{debug, error, info};

use crate::metrics;
use crate::proto::{
    self,
    movie_service_server::{MovieService, MovieServiceServer},
    CreateMovieRequest, Empty, GetMoviesRequest, MovieIdRequest, MovieListResponse,
};

pub const NOT_FOUND_MESSAGE: &str = "movie not found";

/// Stateless RPC facade over a record store.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn MovieStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self { store }
    }

    pub fn into_server(self) -> MovieServiceServer<Self> {
        MovieServiceServer::new(self)
    }
}

pub fn to_proto(m: service::Movie) -> proto::Movie {
    proto::Movie {
        id: m.id,
        title: m.title,
        year: m.year,
        created_at: m.created_at.timestamp_millis(),
        updated_at: m.updated_at.timestamp_millis(),
    }
}

/// Map a store failure onto the fixed set of transport codes.
pub fn store_status(method: &'static str, err: StoreError, internal_message: &'static str) -> Status {
    match err {
        StoreError::NotFound(id) => {
            debug!(method, id, "movie not found");
            Status::not_found(NOT_FOUND_MESSAGE)
        }
        other => {
            error!(method, error = %other, "store operation failed");
            Status::internal(internal_message)
        }
    }
}

#[tonic::async_trait]
impl MovieService for CatalogService {
    async fn get_movie(&self, request: Request<MovieIdRequest>) -> Result<Response<proto::Movie>, Status> {
        let id = request.into_inner().id;
        let result = self
            .store
            .find_by_id(id)
            .await
            .map(|m| Response::new(to_proto(m)))
            .map_err(|e| store_status("GetMovie", e, "failed to fetch movie"));
        metrics::record("GetMovie", &result);
        result
    }

    async fn get_movies(&self, request: Request<GetMoviesRequest>) -> Result<Response<MovieListResponse>, Status> {
        let req = request.into_inner();
        if req.page == 0 || req.limit == 0 {
            let status = Status::invalid_argument("page and limit must be greater than 0");
            debug!(page = req.page, limit = req.limit, "rejected page request");
            let result = Err(status);
            metrics::record("GetMovies", &result);
            return result;
        }
        let result = self
            .store
            .find_all(PageRequest::new(req.page, req.limit))
            .await
            .map(|page| {
                Response::new(MovieListResponse {
                    movies: page.movies.into_iter().map(to_proto).collect(),
                    total: page.total,
                    page: req.page,
                })
            })
            .map_err(|e| store_status("GetMovies", e, "failed to fetch movies"));
        metrics::record("GetMovies", &result);
        result
    }

    async fn create_movie(&self, request: Request<CreateMovieRequest>) -> Result<Response<proto::Movie>, Status> {
        let req = request.into_inner();
        let result = self
            .store
            .create(NewMovie::new(req.title, req.year))
            .await
            .map(|m| {
                info!(id = m.id, backend = self.store.backend(), "movie created");
                Response::new(to_proto(m))
            })
            .map_err(|e| store_status("CreateMovie", e, "failed to create movie"));
        metrics::record("CreateMovie", &result);
        result
    }

    async fn delete_movie(&self, request: Request<MovieIdRequest>) -> Result<Response<Empty>, Status> {
        let id = request.into_inner().id;
        let result = self
            .store
            .delete(id)
            .await
            .map(|()| {
                info!(id, "movie deleted");
                Response::new(Empty {})
            })
            .map_err(|e| store_status("DeleteMovie", e, "failed to delete movie"));
        metrics::record("DeleteMovie", &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::InMemoryMovieStore;

    fn svc() -> CatalogService {
        CatalogService::new(Arc::new(InMemoryMovieStore::new()))
    }

    #[test]
    fn not_found_maps_to_not_found_code() {
        let status = store_status("GetMovie", StoreError::NotFound(3), "failed to fetch movie");
        assert_eq!(status.code(), tonic::Code::NotFound);
        assert_eq!(status.message(), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn other_errors_map_to_internal_without_leaking_detail() {
        let status = store_status(
            "GetMovies",
            StoreError::Db("connection reset by peer at 10.0.0.7".into()),
            "failed to fetch movies",
        );
        assert_eq!(status.code(), tonic::Code::Internal);
        assert_eq!(status.message(), "failed to fetch movies");
        assert!(!status.message().contains("10.0.0.7"));
    }

    #[tokio::test]
    async fn get_movies_echoes_page() {
        let svc = svc();
        for title in ["a", "b", "c"] {
            svc.create_movie(Request::new(CreateMovieRequest { title: title.into(), year: "2000".into() }))
                .await
                .unwrap();
        }
        let resp = svc
            .get_movies(Request::new(GetMoviesRequest { page: 2, limit: 2 }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(resp.page, 2);
        assert_eq!(resp.total, 3);
        assert_eq!(resp.movies.len(), 1);
        assert_eq!(resp.movies[0].id, 1);
    }

    #[tokio::test]
    async fn zero_page_or_limit_is_invalid_argument() {
        let svc = svc();
        for (page, limit) in [(0, 10), (1, 0), (0, 0)] {
            let err = svc.get_movies(Request::new(GetMoviesRequest { page, limit })).await.unwrap_err();
            assert_eq!(err.code(), tonic::Code::InvalidArgument, "page={page} limit={limit}");
        }
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let svc = svc();
        let created = svc
            .create_movie(Request::new(CreateMovieRequest { title: "Up".into(), year: "2009".into() }))
            .await
            .unwrap()
            .into_inner();
        svc.delete_movie(Request::new(MovieIdRequest { id: created.id })).await.unwrap();
        let err = svc.delete_movie(Request::new(MovieIdRequest { id: created.id })).await.unwrap_err();
        assert_eq!(err.code(), tonic::Code::NotFound);
    }
}
