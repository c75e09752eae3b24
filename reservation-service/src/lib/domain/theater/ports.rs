use async_trait::async_trait;

use crate::domain::theater::errors::TheaterError;
use crate::domain::theater::models::CreateTheaterCommand;
use crate::domain::theater::models::Theater;
use crate::domain::theater::models::TheaterId;
use crate::domain::theater::models::UpdateTheaterCommand;

#[async_trait]
pub trait TheaterServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `NameAlreadyExists` - Another theater uses the name
    async fn create_theater(&self, command: CreateTheaterCommand)
        -> Result<Theater, TheaterError>;

    async fn get_theater(&self, id: &TheaterId) -> Result<Theater, TheaterError>;

    async fn list_theaters(&self) -> Result<Vec<Theater>, TheaterError>;

    async fn update_theater(
        &self,
        id: &TheaterId,
        command: UpdateTheaterCommand,
    ) -> Result<Theater, TheaterError>;

    /// # Errors
    /// * `HasShowtimes` - Showtimes are still scheduled in the theater
    async fn delete_theater(&self, id: &TheaterId) -> Result<(), TheaterError>;
}

#[async_trait]
pub trait TheaterRepository: Send + Sync + 'static {
    async fn create(&self, theater: Theater) -> Result<Theater, TheaterError>;

    async fn find_by_id(&self, id: &TheaterId) -> Result<Option<Theater>, TheaterError>;

    async fn list_all(&self) -> Result<Vec<Theater>, TheaterError>;

    async fn update(&self, theater: Theater) -> Result<Theater, TheaterError>;

    async fn delete(&self, id: &TheaterId) -> Result<(), TheaterError>;
}
