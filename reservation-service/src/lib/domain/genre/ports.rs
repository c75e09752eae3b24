use async_trait::async_trait;

use crate::domain::genre::errors::GenreError;
use crate::domain::genre::models::CreateGenreCommand;
use crate::domain::genre::models::Genre;
use crate::domain::genre::models::GenreId;
use crate::domain::genre::models::UpdateGenreCommand;

/// Port for genre catalogue operations.
#[async_trait]
pub trait GenreServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `NameAlreadyExists` - Another genre has this name
    async fn create_genre(&self, command: CreateGenreCommand) -> Result<Genre, GenreError>;

    /// # Errors
    /// * `NotFound` - Genre does not exist
    async fn get_genre(&self, id: &GenreId) -> Result<Genre, GenreError>;

    async fn list_genres(&self) -> Result<Vec<Genre>, GenreError>;

    /// # Errors
    /// * `NotFound` - Genre does not exist
    /// * `NameAlreadyExists` - Another genre has this name
    async fn update_genre(
        &self,
        id: &GenreId,
        command: UpdateGenreCommand,
    ) -> Result<Genre, GenreError>;

    /// # Errors
    /// * `NotFound` - Genre does not exist
    /// * `InUse` - Movies still reference the genre
    async fn delete_genre(&self, id: &GenreId) -> Result<(), GenreError>;
}

/// Persistence operations for genres.
#[async_trait]
pub trait GenreRepository: Send + Sync + 'static {
    async fn create(&self, genre: Genre) -> Result<Genre, GenreError>;

    async fn find_by_id(&self, id: &GenreId) -> Result<Option<Genre>, GenreError>;

    /// All genres ordered by name.
    async fn list_all(&self) -> Result<Vec<Genre>, GenreError>;

    async fn update(&self, genre: Genre) -> Result<Genre, GenreError>;

    async fn delete(&self, id: &GenreId) -> Result<(), GenreError>;
}
