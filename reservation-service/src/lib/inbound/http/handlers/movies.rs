use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::Json;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiSuccess;
use super::Violations;
use crate::domain::genre::models::GenreId;
use crate::domain::movie::errors::MovieError;
use crate::domain::movie::models::CreateMovieCommand;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::models::MovieTitle;
use crate::domain::movie::models::Runtime;
use crate::domain::movie::models::UpdateMovieCommand;
use crate::inbound::http::exception::HttpException;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    pub title: String,
    pub description: Option<String>,
    pub duration: i32,
    pub release_date: Option<NaiveDate>,
    pub genre_id: String,
}

impl CreateMovieRequest {
    fn try_into_command(self) -> Result<CreateMovieCommand, HttpException> {
        let mut violations = Violations::default();

        let title = violations.check(MovieTitle::new(self.title));
        let duration = violations.check(Runtime::new(self.duration));
        let genre_id = violations.check(GenreId::from_string(&self.genre_id));

        match (title, duration, genre_id) {
            (Some(title), Some(duration), Some(genre_id)) => Ok(CreateMovieCommand {
                title,
                description: self.description,
                duration,
                release_date: self.release_date,
                genre_id,
            }),
            _ => Err(violations.into_exception()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateMovieRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub release_date: Option<NaiveDate>,
    pub genre_id: Option<String>,
}

impl UpdateMovieRequest {
    fn try_into_command(self) -> Result<UpdateMovieCommand, HttpException> {
        let mut violations = Violations::default();

        let title = self.title.map(|title| violations.check(MovieTitle::new(title)));
        let duration = self
            .duration
            .map(|minutes| violations.check(Runtime::new(minutes)));
        let genre_id = self
            .genre_id
            .map(|id| violations.check(GenreId::from_string(&id)));

        if !violations.is_empty() {
            return Err(violations.into_exception());
        }

        Ok(UpdateMovieCommand {
            title: title.flatten(),
            description: self.description,
            duration: duration.flatten(),
            release_date: self.release_date,
            genre_id: genre_id.flatten(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct MovieQuery {
    pub genre_id: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MovieResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub duration: i32,
    pub release_date: Option<NaiveDate>,
    pub genre_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id.to_string(),
            title: movie.title.as_str().to_string(),
            description: movie.description,
            duration: movie.duration.minutes(),
            release_date: movie.release_date,
            genre_id: movie.genre_id.to_string(),
            created_at: movie.created_at,
        }
    }
}

fn parse_id(id: &str) -> Result<MovieId, HttpException> {
    MovieId::from_string(id).map_err(|e| MovieError::from(e).into())
}

pub async fn create_movie(
    State(state): State<AppState>,
    Json(body): Json<CreateMovieRequest>,
) -> Result<ApiSuccess<MovieResponse>, HttpException> {
    let command = body.try_into_command()?;

    state
        .movie_service
        .create_movie(command)
        .await
        .map_err(HttpException::from)
        .map(|movie| ApiSuccess::created(movie.into()))
}

pub async fn list_movies(
    State(state): State<AppState>,
    Query(query): Query<MovieQuery>,
) -> Result<ApiSuccess<Vec<MovieResponse>>, HttpException> {
    let genre_id = query
        .genre_id
        .map(|id| GenreId::from_string(&id))
        .transpose()
        .map_err(MovieError::from)?;

    state
        .movie_service
        .list_movies(genre_id)
        .await
        .map_err(HttpException::from)
        .map(|movies| ApiSuccess::ok(movies.into_iter().map(Into::into).collect()))
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<MovieResponse>, HttpException> {
    let id = parse_id(&id)?;

    state
        .movie_service
        .get_movie(&id)
        .await
        .map_err(HttpException::from)
        .map(|movie| ApiSuccess::ok(movie.into()))
}

pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateMovieRequest>,
) -> Result<ApiSuccess<MovieResponse>, HttpException> {
    let id = parse_id(&id)?;
    let command = body.try_into_command()?;

    state
        .movie_service
        .update_movie(&id, command)
        .await
        .map_err(HttpException::from)
        .map(|movie| ApiSuccess::ok(movie.into()))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, HttpException> {
    let id = parse_id(&id)?;

    state
        .movie_service
        .delete_movie(&id)
        .await
        .map_err(HttpException::from)
        .map(|_| ApiSuccess::ok(()))
}
