use axum::{http::StatusCode, middleware, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::errors::ApiError;
use crate::observability::track_requests;
use crate::openapi::{ApiDoc, HealthResponse};
use crate::usecases::MoviesUseCases;

pub mod movies;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub movies: MoviesUseCases,
}

impl AppState {
    pub fn new(movies: MoviesUseCases) -> Self {
        Self { movies }
    }
}

#[utoipa::path(
    get,
    path = "/v1/health",
    tag = "health",
    responses((status = 200, description = "Gateway is up", body = HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::healthy())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn metrics() -> (StatusCode, String) {
    common::admin_http::encode_metrics()
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("no route matches the request")
}

/// Build the gateway router: `/v1` API, `/metrics`, and a JSON 404 for
/// everything else.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let v1 = Router::new()
        .route("/movies", get(movies::list_movies).post(movies::create_movie))
        .route("/movies/:id", get(movies::get_movie).delete(movies::delete_movie))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    Router::new()
        .nest("/v1", v1)
        .route("/metrics", get(metrics))
        .fallback(route_not_found)
        .with_state(state)
        .layer(middleware::from_fn(track_requests))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
