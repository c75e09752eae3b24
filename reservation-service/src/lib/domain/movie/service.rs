use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::genre::models::GenreId;
use crate::domain::movie::errors::MovieError;
use crate::domain::movie::models::CreateMovieCommand;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::models::UpdateMovieCommand;
use crate::domain::movie::ports::MovieRepository;
use crate::domain::movie::ports::MovieServicePort;

pub struct MovieService<MR>
where
    MR: MovieRepository,
{
    repository: Arc<MR>,
}

impl<MR> MovieService<MR>
where
    MR: MovieRepository,
{
    pub fn new(repository: Arc<MR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<MR> MovieServicePort for MovieService<MR>
where
    MR: MovieRepository,
{
    async fn create_movie(&self, command: CreateMovieCommand) -> Result<Movie, MovieError> {
        let movie = Movie {
            id: MovieId::new(),
            title: command.title,
            description: command.description,
            duration: command.duration,
            release_date: command.release_date,
            genre_id: command.genre_id,
            created_at: Utc::now(),
        };

        let created = self.repository.create(movie).await?;
        tracing::info!(movie_id = %created.id, title = %created.title, "Movie created");
        Ok(created)
    }

    async fn get_movie(&self, id: &MovieId) -> Result<Movie, MovieError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(MovieError::NotFound(*id))
    }

    async fn list_movies(&self, genre_id: Option<GenreId>) -> Result<Vec<Movie>, MovieError> {
        self.repository.list(genre_id).await
    }

    async fn update_movie(
        &self,
        id: &MovieId,
        command: UpdateMovieCommand,
    ) -> Result<Movie, MovieError> {
        let mut movie = self.get_movie(id).await?;

        if let Some(title) = command.title {
            movie.title = title;
        }
        if let Some(description) = command.description {
            movie.description = Some(description);
        }
        if let Some(duration) = command.duration {
            movie.duration = duration;
        }
        if let Some(release_date) = command.release_date {
            movie.release_date = Some(release_date);
        }
        if let Some(genre_id) = command.genre_id {
            movie.genre_id = genre_id;
        }

        self.repository.update(movie).await
    }

    async fn delete_movie(&self, id: &MovieId) -> Result<(), MovieError> {
        self.repository.delete(id).await?;
        tracing::info!(movie_id = %id, "Movie deleted");
        Ok(())
    }
}
