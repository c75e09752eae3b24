use thiserror::Error;

use crate::domain::genre::errors::GenreIdError;
use crate::domain::genre::models::GenreId;
use crate::domain::movie::models::MovieId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MovieIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MovieTitleError {
    #[error("Movie title is empty")]
    Empty,

    #[error("Movie title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Runtime must be between {min} and {max} minutes, got {actual}")]
    OutOfRange { min: i32, max: i32, actual: i32 },
}

/// Top-level error type for all movie-related operations
#[derive(Debug, Clone, Error)]
pub enum MovieError {
    #[error("Invalid movie ID: {0}")]
    InvalidMovieId(#[from] MovieIdError),

    #[error("Invalid genre ID: {0}")]
    InvalidGenreId(#[from] GenreIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] MovieTitleError),

    #[error("Invalid runtime: {0}")]
    InvalidRuntime(#[from] RuntimeError),

    #[error("Movie not found: {0}")]
    NotFound(MovieId),

    #[error("Genre not found: {0}")]
    GenreNotFound(GenreId),

    #[error("Movie {0} still has showtimes")]
    HasShowtimes(MovieId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
