use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::theater::errors::CapacityError;
use crate::domain::theater::errors::TheaterIdError;
use crate::domain::theater::errors::TheaterNameError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theater {
    pub id: TheaterId,
    pub name: TheaterName,
    pub location: Option<String>,
    pub capacity: SeatCapacity,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TheaterId(pub Uuid);

impl TheaterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, TheaterIdError> {
        Uuid::parse_str(s)
            .map(TheaterId)
            .map_err(|e| TheaterIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TheaterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TheaterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TheaterName(String);

impl TheaterName {
    const MAX_LENGTH: usize = 100;

    pub fn new(name: String) -> Result<Self, TheaterNameError> {
        let name = name.trim().to_string();
        let actual = name.chars().count();

        if actual == 0 {
            return Err(TheaterNameError::Empty);
        }
        if actual > Self::MAX_LENGTH {
            return Err(TheaterNameError::TooLong {
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

impl fmt::Display for TheaterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Number of seats in an auditorium.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatCapacity(i32);

impl SeatCapacity {
    const MIN: i32 = 1;
    const MAX: i32 = 1000;

    pub fn new(seats: i32) -> Result<Self, CapacityError> {
        if !(Self::MIN..=Self::MAX).contains(&seats) {
            return Err(CapacityError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: seats,
            });
        }
        Ok(Self(seats))
    }

    pub fn seats(&self) -> i32 {
        self.0
    }
}

#[derive(Debug)]
pub struct CreateTheaterCommand {
    pub name: TheaterName,
    pub location: Option<String>,
    pub capacity: SeatCapacity,
}

#[derive(Debug, Default)]
pub struct UpdateTheaterCommand {
    pub name: Option<TheaterName>,
    pub location: Option<String>,
    pub capacity: Option<SeatCapacity>,
}
