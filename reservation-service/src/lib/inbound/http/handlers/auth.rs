use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::users::UserResponse;
use super::ApiSuccess;
use super::Violations;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::Session;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::UserName;
use crate::inbound::http::exception::HttpException;
use crate::inbound::http::router::AppState;

/// Missing fields deserialize as empty strings and fail validation.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, HttpException> {
        let mut violations = Violations::default();

        let name = violations.check(UserName::new(self.name));
        let email = violations.check(EmailAddress::new(self.email));
        let password = violations.check(Password::new(self.password));

        match (name, email, password) {
            (Some(name), Some(email), Some(password)) => Ok(RegisterCommand {
                name,
                email,
                password,
            }),
            _ => Err(violations.into_exception()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, HttpException> {
        let mut violations = Violations::default();

        let email = violations.check(EmailAddress::new(self.email));
        if self.password.is_empty() {
            violations.push("password should not be empty");
        }

        match email {
            Some(email) if violations.is_empty() => Ok(LoginCommand {
                email,
                password: self.password,
            }),
            _ => Err(violations.into_exception()),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SessionResponse {
    pub user: UserResponse,
    pub token: String,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            user: session.user.into(),
            token: session.token,
        }
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<UserResponse>, HttpException> {
    let command = body.try_into_command()?;

    state
        .auth_service
        .register(command)
        .await
        .map_err(HttpException::from)
        .map(|user| ApiSuccess::created(user.into()))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<SessionResponse>, HttpException> {
    let command = body.try_into_command()?;

    state
        .auth_service
        .login(command)
        .await
        .map_err(HttpException::from)
        .map(|session| ApiSuccess::ok(session.into()))
}
