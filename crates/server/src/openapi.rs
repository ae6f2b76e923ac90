use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::domain::{CreateMovie, Movie, MovieList};
use crate::errors::ErrorBody;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Movies API", description = "Movie catalog gateway"),
    paths(
        crate::routes::health,
        crate::routes::movies::list_movies,
        crate::routes::movies::get_movie,
        crate::routes::movies::create_movie,
        crate::routes::movies::delete_movie,
    ),
    components(schemas(HealthResponse, Movie, MovieList, CreateMovie, ErrorBody)),
    tags(
        (name = "health"),
        (name = "movies")
    )
)]
pub struct ApiDoc;
