//! Generates the `movies.v1.MovieService` client and server stubs from
//! hand-written prost messages (see `src/proto.rs`), so no `protoc` is needed.

use tonic_build::manual::{Builder, Method, Service};

fn method(name: &str, route: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route)
        .input_type(format!("crate::proto::{input}"))
        .output_type(format!("crate::proto::{output}"))
        .codec_path("tonic_prost::ProstCodec")
        .build()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let movie_service = Service::builder()
        .name("MovieService")
        .package("movies.v1")
        .method(method("get_movie", "GetMovie", "MovieIdRequest", "Movie"))
        .method(method("get_movies", "GetMovies", "GetMoviesRequest", "MovieListResponse"))
        .method(method("create_movie", "CreateMovie", "CreateMovieRequest", "Movie"))
        .method(method("delete_movie", "DeleteMovie", "MovieIdRequest", "Empty"))
        .build();

    Builder::new().compile(&[movie_service]);
}
