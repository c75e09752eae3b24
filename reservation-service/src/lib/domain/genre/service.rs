use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::genre::errors::GenreError;
use crate::domain::genre::models::CreateGenreCommand;
use crate::domain::genre::models::Genre;
use crate::domain::genre::models::GenreId;
use crate::domain::genre::models::UpdateGenreCommand;
use crate::domain::genre::ports::GenreRepository;
use crate::domain::genre::ports::GenreServicePort;

pub struct GenreService<GR>
where
    GR: GenreRepository,
{
    repository: Arc<GR>,
}

impl<GR> GenreService<GR>
where
    GR: GenreRepository,
{
    pub fn new(repository: Arc<GR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<GR> GenreServicePort for GenreService<GR>
where
    GR: GenreRepository,
{
    async fn create_genre(&self, command: CreateGenreCommand) -> Result<Genre, GenreError> {
        let genre = Genre {
            id: GenreId::new(),
            name: command.name,
            created_at: Utc::now(),
        };

        let created = self.repository.create(genre).await?;
        tracing::info!(genre_id = %created.id, name = %created.name, "Genre created");
        Ok(created)
    }

    async fn get_genre(&self, id: &GenreId) -> Result<Genre, GenreError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(GenreError::NotFound(*id))
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, GenreError> {
        self.repository.list_all().await
    }

    async fn update_genre(
        &self,
        id: &GenreId,
        command: UpdateGenreCommand,
    ) -> Result<Genre, GenreError> {
        let mut genre = self.get_genre(id).await?;
        genre.name = command.name;
        self.repository.update(genre).await
    }

    async fn delete_genre(&self, id: &GenreId) -> Result<(), GenreError> {
        self.repository.delete(id).await?;
        tracing::info!(genre_id = %id, "Genre deleted");
        Ok(())
    }
}
