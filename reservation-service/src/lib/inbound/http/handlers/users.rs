use axum::extract::Path;
use axum::extract::State;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiSuccess;
use super::Violations;
use crate::domain::user::models::Password;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserName;
use crate::domain::user::models::UserProfile;
use crate::inbound::http::exception::HttpException;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Public view of an account.
#[derive(Debug, Serialize, PartialEq)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserProfile> for UserResponse {
    fn from(user: UserProfile) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, HttpException> {
        let mut violations = Violations::default();

        let name = self.name.map(|name| violations.check(UserName::new(name)));
        let password = self
            .password
            .map(|password| violations.check(Password::new(password)));

        if !violations.is_empty() {
            return Err(violations.into_exception());
        }

        Ok(UpdateUserCommand {
            name: name.flatten(),
            password: password.flatten(),
        })
    }
}

pub async fn get_me(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserResponse>, HttpException> {
    state
        .user_service
        .get_user(&caller.user_id)
        .await
        .map_err(HttpException::from)
        .map(|user| ApiSuccess::ok(user.into()))
}

pub async fn update_me(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserResponse>, HttpException> {
    let command = body.try_into_command()?;

    state
        .user_service
        .update_user(&caller.user_id, command)
        .await
        .map_err(HttpException::from)
        .map(|user| ApiSuccess::ok(user.into()))
}

pub async fn delete_me(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<()>, HttpException> {
    state
        .user_service
        .delete_user(&caller.user_id)
        .await
        .map_err(HttpException::from)
        .map(|_| ApiSuccess::ok(()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<UserResponse>, HttpException> {
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;

    state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(HttpException::from)
        .map(|user| ApiSuccess::ok(user.into()))
}
