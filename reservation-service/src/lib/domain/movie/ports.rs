use async_trait::async_trait;

use crate::domain::genre::models::GenreId;
use crate::domain::movie::errors::MovieError;
use crate::domain::movie::models::CreateMovieCommand;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::models::UpdateMovieCommand;

/// Port for movie catalogue operations.
#[async_trait]
pub trait MovieServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `GenreNotFound` - Referenced genre does not exist
    async fn create_movie(&self, command: CreateMovieCommand) -> Result<Movie, MovieError>;

    /// # Errors
    /// * `NotFound` - Movie does not exist
    async fn get_movie(&self, id: &MovieId) -> Result<Movie, MovieError>;

    /// List movies, optionally restricted to one genre.
    async fn list_movies(&self, genre_id: Option<GenreId>) -> Result<Vec<Movie>, MovieError>;

    /// # Errors
    /// * `NotFound` - Movie does not exist
    /// * `GenreNotFound` - New genre does not exist
    async fn update_movie(
        &self,
        id: &MovieId,
        command: UpdateMovieCommand,
    ) -> Result<Movie, MovieError>;

    /// # Errors
    /// * `NotFound` - Movie does not exist
    /// * `HasShowtimes` - Showtimes still reference the movie
    async fn delete_movie(&self, id: &MovieId) -> Result<(), MovieError>;
}

/// Persistence operations for movies.
#[async_trait]
pub trait MovieRepository: Send + Sync + 'static {
    async fn create(&self, movie: Movie) -> Result<Movie, MovieError>;

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, MovieError>;

    /// Movies ordered by title, filtered by genre when given.
    async fn list(&self, genre_id: Option<GenreId>) -> Result<Vec<Movie>, MovieError>;

    async fn update(&self, movie: Movie) -> Result<Movie, MovieError>;

    async fn delete(&self, id: &MovieId) -> Result<(), MovieError>;
}
