use async_trait::async_trait;

use crate::domain::movie::models::MovieId;
use crate::domain::showtime::errors::ShowtimeError;
use crate::domain::showtime::models::CreateShowtimeCommand;
use crate::domain::showtime::models::SeatAvailability;
use crate::domain::showtime::models::Showtime;
use crate::domain::showtime::models::ShowtimeId;
use crate::domain::showtime::models::UpdateShowtimeCommand;

/// Port for scheduling screenings.
#[async_trait]
pub trait ShowtimeServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `StartsInPast` - Start time is not in the future
    /// * `MovieNotFound` / `TheaterNotFound` - Referenced rows do not exist
    async fn create_showtime(
        &self,
        command: CreateShowtimeCommand,
    ) -> Result<Showtime, ShowtimeError>;

    async fn get_showtime(&self, id: &ShowtimeId) -> Result<Showtime, ShowtimeError>;

    /// List showtimes ordered by start time, optionally for one movie.
    async fn list_showtimes(
        &self,
        movie_id: Option<MovieId>,
    ) -> Result<Vec<Showtime>, ShowtimeError>;

    /// # Errors
    /// * `NotFound` - Showtime does not exist
    /// * `StartsInPast` - New start time is not in the future
    async fn update_showtime(
        &self,
        id: &ShowtimeId,
        command: UpdateShowtimeCommand,
    ) -> Result<Showtime, ShowtimeError>;

    /// # Errors
    /// * `HasReservations` - Seats are still booked
    async fn delete_showtime(&self, id: &ShowtimeId) -> Result<(), ShowtimeError>;

    async fn get_availability(&self, id: &ShowtimeId) -> Result<SeatAvailability, ShowtimeError>;
}

#[async_trait]
pub trait ShowtimeRepository: Send + Sync + 'static {
    async fn create(&self, showtime: Showtime) -> Result<Showtime, ShowtimeError>;

    async fn find_by_id(&self, id: &ShowtimeId) -> Result<Option<Showtime>, ShowtimeError>;

    async fn list(&self, movie_id: Option<MovieId>) -> Result<Vec<Showtime>, ShowtimeError>;

    async fn update(&self, showtime: Showtime) -> Result<Showtime, ShowtimeError>;

    async fn delete(&self, id: &ShowtimeId) -> Result<(), ShowtimeError>;

    /// Theater capacity and booked seats, `None` when the showtime is unknown.
    async fn availability(
        &self,
        id: &ShowtimeId,
    ) -> Result<Option<SeatAvailability>, ShowtimeError>;
}
