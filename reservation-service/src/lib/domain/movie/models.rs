use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::genre::models::GenreId;
use crate::domain::movie::errors::MovieIdError;
use crate::domain::movie::errors::MovieTitleError;
use crate::domain::movie::errors::RuntimeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,
    pub title: MovieTitle,
    pub description: Option<String>,
    pub duration: Runtime,
    pub release_date: Option<NaiveDate>,
    pub genre_id: GenreId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MovieId(pub Uuid);

impl MovieId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, MovieIdError> {
        Uuid::parse_str(s)
            .map(MovieId)
            .map_err(|e| MovieIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for MovieId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieTitle(String);

impl MovieTitle {
    const MAX_LENGTH: usize = 200;

    pub fn new(title: String) -> Result<Self, MovieTitleError> {
        let title = title.trim().to_string();
        let actual = title.chars().count();

        if actual == 0 {
            return Err(MovieTitleError::Empty);
        }
        if actual > Self::MAX_LENGTH {
            return Err(MovieTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual,
            });
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Running time in whole minutes, 1 to 600.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Runtime(i32);

impl Runtime {
    const MIN_MINUTES: i32 = 1;
    const MAX_MINUTES: i32 = 600;

    pub fn new(minutes: i32) -> Result<Self, RuntimeError> {
        if !(Self::MIN_MINUTES..=Self::MAX_MINUTES).contains(&minutes) {
            return Err(RuntimeError::OutOfRange {
                min: Self::MIN_MINUTES,
                max: Self::MAX_MINUTES,
                actual: minutes,
            });
        }
        Ok(Self(minutes))
    }

    pub fn minutes(&self) -> i32 {
        self.0
    }
}

#[derive(Debug)]
pub struct CreateMovieCommand {
    pub title: MovieTitle,
    pub description: Option<String>,
    pub duration: Runtime,
    pub release_date: Option<NaiveDate>,
    pub genre_id: GenreId,
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Default)]
pub struct UpdateMovieCommand {
    pub title: Option<MovieTitle>,
    pub description: Option<String>,
    pub duration: Option<Runtime>,
    pub release_date: Option<NaiveDate>,
    pub genre_id: Option<GenreId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_bounds() {
        assert!(Runtime::new(0).is_err());
        assert_eq!(Runtime::new(1).unwrap().minutes(), 1);
        assert_eq!(Runtime::new(600).unwrap().minutes(), 600);
        assert_eq!(
            Runtime::new(601),
            Err(RuntimeError::OutOfRange {
                min: 1,
                max: 600,
                actual: 601
            })
        );
    }

    #[test]
    fn test_title_validation() {
        assert_eq!(MovieTitle::new("  ".to_string()), Err(MovieTitleError::Empty));
        assert_eq!(
            MovieTitle::new(" Metropolis ".to_string()).unwrap().as_str(),
            "Metropolis"
        );
    }
}
