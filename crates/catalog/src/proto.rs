//! Wire messages for `movies.v1.MovieService`.
//!
//! Timestamps travel as Unix milliseconds (UTC).

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MovieIdRequest {
    #[prost(uint32, tag = "1")]
    pub id: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetMoviesRequest {
    #[prost(uint32, tag = "1")]
    pub page: u32,
    #[prost(uint32, tag = "2")]
    pub limit: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateMovieRequest {
    #[prost(string, tag = "1")]
    pub title: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub year: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Movie {
    #[prost(uint32, tag = "1")]
    pub id: u32,
    #[prost(string, tag = "2")]
    pub title: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub year: ::prost::alloc::string::String,
    #[prost(int64, tag = "4")]
    pub created_at: i64,
    #[prost(int64, tag = "5")]
    pub updated_at: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MovieListResponse {
    #[prost(message, repeated, tag = "1")]
    pub movies: ::prost::alloc::vec::Vec<Movie>,
    #[prost(uint64, tag = "2")]
    pub total: u64,
    #[prost(uint32, tag = "3")]
    pub page: u32,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Empty {}

include!(concat!(env!("OUT_DIR"), "/movies.v1.MovieService.rs"));
