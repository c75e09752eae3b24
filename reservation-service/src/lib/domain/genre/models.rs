use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::genre::errors::GenreIdError;
use crate::domain::genre::errors::GenreNameError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: GenreId,
    pub name: GenreName,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenreId(pub Uuid);

impl GenreId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, GenreIdError> {
        Uuid::parse_str(s)
            .map(GenreId)
            .map_err(|e| GenreIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for GenreId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GenreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Genre name value type
///
/// Trimmed, 1 to 50 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreName(String);

impl GenreName {
    const MAX_LENGTH: usize = 50;

    pub fn new(name: String) -> Result<Self, GenreNameError> {
        let name = name.trim().to_string();
        let actual = name.chars().count();

        if actual == 0 {
            return Err(GenreNameError::Empty);
        }
        if actual > Self::MAX_LENGTH {
            return Err(GenreNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual,
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GenreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug)]
pub struct CreateGenreCommand {
    pub name: GenreName,
}

#[derive(Debug)]
pub struct UpdateGenreCommand {
    pub name: GenreName,
}
