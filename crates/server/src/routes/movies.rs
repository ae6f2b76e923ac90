use std::collections::HashMap;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use common::pagination::{DEFAULT_PAGE_NUMBER, DEFAULT_RESULTS_PER_PAGE};

use super::AppState;
use crate::domain::{CreateMovie, Movie, MovieList, MoviesError};
use crate::errors::{ApiError, ApiResponse, ErrorBody, INVALID_ID, INVALID_PAGE_NUMBER, INVALID_REQUEST, INVALID_RESULTS_PER_PAGE};

fn failed(operation: &'static str) -> impl FnOnce(MoviesError) -> ApiError {
    move |err| {
        err.log(operation);
        ApiError::from(err)
    }
}

fn int_param(params: &HashMap<String, String>, name: &str, default: i64, message: &str) -> Result<i64, ApiError> {
    match params.get(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<i64>().map_err(|e| ApiError::bad_request(message, e.to_string())),
    }
}

fn movie_id(raw: &str) -> Result<u32, ApiError> {
    raw.parse::<u32>().map_err(|e| ApiError::bad_request(INVALID_ID, e.to_string()))
}

#[utoipa::path(
    get,
    path = "/v1/movies",
    tag = "movies",
    params(
        ("pageNumber" = Option<i64>, Query, description = "1-based page number (default 1)"),
        ("resultsPerPage" = Option<i64>, Query, description = "Page size between 2 and 20 (default 10)")
    ),
    responses(
        (status = 200, description = "One page of movies, newest first", body = MovieList),
        (status = 400, description = "Invalid paging parameters", body = ErrorBody),
        (status = 404, description = "Page holds no movies", body = ErrorBody),
        (status = 500, description = "Catalog failure", body = ErrorBody)
    )
)]
pub async fn list_movies(
    State(state): State<AppState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<ApiResponse<MovieList>, ApiError> {
    let Query(params) = query.map_err(|e| ApiError::bad_request(INVALID_REQUEST, e.body_text()))?;
    let page_number = int_param(&params, "pageNumber", DEFAULT_PAGE_NUMBER, INVALID_PAGE_NUMBER)?;
    let results_per_page = int_param(&params, "resultsPerPage", DEFAULT_RESULTS_PER_PAGE, INVALID_RESULTS_PER_PAGE)?;

    let list = state
        .movies
        .get_movies(page_number, results_per_page)
        .await
        .map_err(failed("get_movies"))?;
    Ok(ApiResponse::ok(list))
}

#[utoipa::path(
    get,
    path = "/v1/movies/{id}",
    tag = "movies",
    params(("id" = u32, Path, description = "Movie id")),
    responses(
        (status = 200, description = "The movie", body = Movie),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "No movie with this id", body = ErrorBody),
        (status = 500, description = "Catalog failure", body = ErrorBody)
    )
)]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Movie>, ApiError> {
    let id = movie_id(&id)?;
    let movie = state.movies.get_movie(id).await.map_err(failed("get_movie"))?;
    Ok(ApiResponse::ok(movie))
}

#[utoipa::path(
    post,
    path = "/v1/movies",
    tag = "movies",
    request_body = CreateMovie,
    responses(
        (status = 201, description = "Movie created", body = Movie),
        (status = 400, description = "Malformed or incomplete body", body = ErrorBody),
        (status = 500, description = "Catalog failure", body = ErrorBody)
    )
)]
pub async fn create_movie(
    State(state): State<AppState>,
    body: Result<Json<CreateMovie>, JsonRejection>,
) -> Result<ApiResponse<Movie>, ApiError> {
    let Json(input) = body.map_err(|e| ApiError::bad_request(INVALID_REQUEST, e.body_text()))?;
    let movie = state.movies.create_movie(input).await.map_err(failed("create_movie"))?;
    Ok(ApiResponse::created(movie))
}

#[utoipa::path(
    delete,
    path = "/v1/movies/{id}",
    tag = "movies",
    params(("id" = u32, Path, description = "Movie id")),
    responses(
        (status = 204, description = "Movie deleted"),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "No movie with this id", body = ErrorBody),
        (status = 500, description = "Catalog failure", body = ErrorBody)
    )
)]
pub async fn delete_movie(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = movie_id(&id)?;
    state.movies.delete_movie(id).await.map_err(failed("delete_movie"))?;
    Ok(StatusCode::NO_CONTENT)
}
