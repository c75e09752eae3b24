use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiSuccess;
use crate::domain::genre::errors::GenreError;
use crate::domain::genre::models::CreateGenreCommand;
use crate::domain::genre::models::Genre;
use crate::domain::genre::models::GenreId;
use crate::domain::genre::models::GenreName;
use crate::domain::genre::models::UpdateGenreCommand;
use crate::inbound::http::exception::HttpException;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct GenreRequest {
    pub name: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct GenreResponse {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Genre> for GenreResponse {
    fn from(genre: Genre) -> Self {
        Self {
            id: genre.id.to_string(),
            name: genre.name.as_str().to_string(),
            created_at: genre.created_at,
        }
    }
}

fn parse_id(id: &str) -> Result<GenreId, HttpException> {
    GenreId::from_string(id).map_err(|e| GenreError::from(e).into())
}

pub async fn create_genre(
    State(state): State<AppState>,
    Json(body): Json<GenreRequest>,
) -> Result<ApiSuccess<GenreResponse>, HttpException> {
    let name = GenreName::new(body.name).map_err(GenreError::from)?;

    state
        .genre_service
        .create_genre(CreateGenreCommand { name })
        .await
        .map_err(HttpException::from)
        .map(|genre| ApiSuccess::created(genre.into()))
}

pub async fn list_genres(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<GenreResponse>>, HttpException> {
    state
        .genre_service
        .list_genres()
        .await
        .map_err(HttpException::from)
        .map(|genres| ApiSuccess::ok(genres.into_iter().map(Into::into).collect()))
}

pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<GenreResponse>, HttpException> {
    let id = parse_id(&id)?;

    state
        .genre_service
        .get_genre(&id)
        .await
        .map_err(HttpException::from)
        .map(|genre| ApiSuccess::ok(genre.into()))
}

pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<GenreRequest>,
) -> Result<ApiSuccess<GenreResponse>, HttpException> {
    let id = parse_id(&id)?;
    let name = GenreName::new(body.name).map_err(GenreError::from)?;

    state
        .genre_service
        .update_genre(&id, UpdateGenreCommand { name })
        .await
        .map_err(HttpException::from)
        .map(|genre| ApiSuccess::ok(genre.into()))
}

pub async fn delete_genre(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, HttpException> {
    let id = parse_id(&id)?;

    state
        .genre_service
        .delete_genre(&id)
        .await
        .map_err(HttpException::from)
        .map(|_| ApiSuccess::ok(()))
}
