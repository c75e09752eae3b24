use thiserror::Error;

use crate::domain::genre::models::GenreId;

/// Error type for GenreId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenreIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error type for GenreName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenreNameError {
    #[error("Genre name is empty")]
    Empty,

    #[error("Genre name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error type for all genre-related operations
#[derive(Debug, Clone, Error)]
pub enum GenreError {
    #[error("Invalid genre ID: {0}")]
    InvalidGenreId(#[from] GenreIdError),

    #[error("Invalid genre name: {0}")]
    InvalidName(#[from] GenreNameError),

    #[error("Genre not found: {0}")]
    NotFound(GenreId),

    #[error("Genre already exists: {0}")]
    NameAlreadyExists(String),

    #[error("Genre {0} is still assigned to movies")]
    InUse(GenreId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
