use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiSuccess;
use super::Violations;
use crate::domain::theater::errors::TheaterError;
use crate::domain::theater::models::CreateTheaterCommand;
use crate::domain::theater::models::SeatCapacity;
use crate::domain::theater::models::Theater;
use crate::domain::theater::models::TheaterId;
use crate::domain::theater::models::TheaterName;
use crate::domain::theater::models::UpdateTheaterCommand;
use crate::inbound::http::exception::HttpException;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTheaterRequest {
    pub name: String,
    pub location: Option<String>,
    pub capacity: i32,
}

impl CreateTheaterRequest {
    fn try_into_command(self) -> Result<CreateTheaterCommand, HttpException> {
        let mut violations = Violations::default();

        let name = violations.check(TheaterName::new(self.name));
        let capacity = violations.check(SeatCapacity::new(self.capacity));

        match (name, capacity) {
            (Some(name), Some(capacity)) => Ok(CreateTheaterCommand {
                name,
                location: self.location,
                capacity,
            }),
            _ => Err(violations.into_exception()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateTheaterRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<i32>,
}

impl UpdateTheaterRequest {
    fn try_into_command(self) -> Result<UpdateTheaterCommand, HttpException> {
        let mut violations = Violations::default();

        let name = self.name.map(|name| violations.check(TheaterName::new(name)));
        let capacity = self
            .capacity
            .map(|seats| violations.check(SeatCapacity::new(seats)));

        if !violations.is_empty() {
            return Err(violations.into_exception());
        }

        Ok(UpdateTheaterCommand {
            name: name.flatten(),
            location: self.location,
            capacity: capacity.flatten(),
        })
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct TheaterResponse {
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Theater> for TheaterResponse {
    fn from(theater: Theater) -> Self {
        Self {
            id: theater.id.to_string(),
            name: theater.name.as_str().to_string(),
            location: theater.location,
            capacity: theater.capacity.seats(),
            created_at: theater.created_at,
        }
    }
}

fn parse_id(id: &str) -> Result<TheaterId, HttpException> {
    TheaterId::from_string(id).map_err(|e| TheaterError::from(e).into())
}

pub async fn create_theater(
    State(state): State<AppState>,
    Json(body): Json<CreateTheaterRequest>,
) -> Result<ApiSuccess<TheaterResponse>, HttpException> {
    let command = body.try_into_command()?;

    state
        .theater_service
        .create_theater(command)
        .await
        .map_err(HttpException::from)
        .map(|theater| ApiSuccess::created(theater.into()))
}

pub async fn list_theaters(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<TheaterResponse>>, HttpException> {
    state
        .theater_service
        .list_theaters()
        .await
        .map_err(HttpException::from)
        .map(|theaters| ApiSuccess::ok(theaters.into_iter().map(Into::into).collect()))
}

pub async fn get_theater(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<TheaterResponse>, HttpException> {
    let id = parse_id(&id)?;

    state
        .theater_service
        .get_theater(&id)
        .await
        .map_err(HttpException::from)
        .map(|theater| ApiSuccess::ok(theater.into()))
}

pub async fn update_theater(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTheaterRequest>,
) -> Result<ApiSuccess<TheaterResponse>, HttpException> {
    let id = parse_id(&id)?;
    let command = body.try_into_command()?;

    state
        .theater_service
        .update_theater(&id, command)
        .await
        .map_err(HttpException::from)
        .map(|theater| ApiSuccess::ok(theater.into()))
}

pub async fn delete_theater(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, HttpException> {
    let id = parse_id(&id)?;

    state
        .theater_service
        .delete_theater(&id)
        .await
        .map_err(HttpException::from)
        .map(|_| ApiSuccess::ok(()))
}
