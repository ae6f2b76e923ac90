use std::sync::Arc;

use catalog::CatalogClient;
use common::pagination::has_more;
use tracing::debug;

use crate::domain::{
    validate_movie, validate_page_number, validate_results_per_page, CreateMovie, Movie, MovieList, MoviesError,
};

/// Validates caller input, calls the catalog and shapes its answers.
#[derive(Clone)]
pub struct MoviesUseCases {
    client: Arc<dyn CatalogClient>,
}

impl MoviesUseCases {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self { client }
    }

    /// List one page, newest first. Bounds are checked before the catalog is
    /// called; an empty page is reported as [`MoviesError::PageNotFound`].
    pub async fn get_movies(&self, page_number: i64, results_per_page: i64) -> Result<MovieList, MoviesError> {
        validate_page_number(page_number)?;
        validate_results_per_page(results_per_page)?;

        // No page past u32::MAX can hold a record.
        let page = u32::try_from(page_number).map_err(|_| MoviesError::PageNotFound)?;
        let limit = results_per_page as u32;

        let list = self.client.get_movies(page, limit).await.map_err(MoviesError::from_status)?;
        if list.movies.is_empty() {
            debug!(page, limit, total = list.total, "empty page");
            return Err(MoviesError::PageNotFound);
        }

        Ok(MovieList {
            has_more: has_more(list.total, list.page, limit),
            movies: list.movies.into_iter().map(Movie::from).collect(),
            page: list.page,
            total: list.total,
            results: limit,
        })
    }

    pub async fn get_movie(&self, id: u32) -> Result<Movie, MoviesError> {
        self.client
            .get_movie(id)
            .await
            .map(Movie::from)
            .map_err(MoviesError::from_status)
    }

    /// Create a movie. The body is checked before the call and the stored
    /// record is checked again on the way back.
    pub async fn create_movie(&self, input: CreateMovie) -> Result<Movie, MoviesError> {
        validate_movie(&input.title, &input.year)?;
        let created = self
            .client
            .create_movie(input.title, input.year)
            .await
            .map_err(MoviesError::from_status)?;
        validate_movie(&created.title, &created.year)?;
        Ok(Movie::from(created))
    }

    pub async fn delete_movie(&self, id: u32) -> Result<(), MoviesError> {
        self.client.delete_movie(id).await.map_err(MoviesError::from_status)
    }
}
