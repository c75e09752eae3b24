use std::sync::Arc;

use async_trait::async_trait;
use auth::Claims;
use auth::JwtHandler;
use chrono::Utc;

use crate::common::try_catch;
use crate::common::TryCatchOptions;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::Session;
use crate::domain::auth::models::TOKEN_TTL_HOURS;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::HashAdapter;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

const LOG_CONTEXT: &str = "AuthService";

/// Registration and login over a user repository and a hash adapter.
pub struct AuthService<UR, H>
where
    UR: UserRepository,
    H: HashAdapter,
{
    repository: Arc<UR>,
    hasher: Arc<H>,
    tokens: Arc<JwtHandler>,
}

impl<UR, H> AuthService<UR, H>
where
    UR: UserRepository,
    H: HashAdapter,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `hasher` - Password hashing implementation
    /// * `tokens` - Signer for access tokens
    pub fn new(repository: Arc<UR>, hasher: Arc<H>, tokens: Arc<JwtHandler>) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl<UR, H> AuthServicePort for AuthService<UR, H>
where
    UR: UserRepository,
    H: HashAdapter,
{
    async fn register(&self, command: RegisterCommand) -> Result<UserProfile, AuthError> {
        let RegisterCommand {
            name,
            email,
            password,
        } = command;

        let existing = try_catch(
            || self.repository.find_by_email(&email),
            TryCatchOptions::new().logged(LOG_CONTEXT),
        )
        .await
        .map_err(|e| AuthError::CheckExistingUser(e.to_string()))?;

        if existing.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = try_catch(
            || self.hasher.hash(password.as_str()),
            TryCatchOptions::new().logged(LOG_CONTEXT),
        )
        .await
        .map_err(|e| AuthError::HashPassword(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            name,
            email,
            password_hash,
            created_at: Utc::now(),
        };

        // A concurrent registration can still win the unique index.
        let created = try_catch(
            || self.repository.create(user),
            TryCatchOptions::new().logged(LOG_CONTEXT),
        )
        .await
        .map_err(|e| match e {
            UserError::EmailAlreadyExists(_) => AuthError::UserAlreadyExists,
            other => AuthError::CreateUser(other.to_string()),
        })?;

        tracing::info!(user_id = %created.id, "User registered");

        Ok(created.into_profile())
    }

    async fn login(&self, command: LoginCommand) -> Result<Session, AuthError> {
        let user = try_catch(
            || self.repository.find_by_email(&command.email),
            TryCatchOptions::new().logged(LOG_CONTEXT),
        )
        .await
        .map_err(|e| AuthError::FindUser(e.to_string()))?
        .ok_or(AuthError::InvalidCredentials)?;

        let matches = try_catch(
            || self.hasher.compare(&command.password, &user.password_hash),
            TryCatchOptions::new().logged(LOG_CONTEXT),
        )
        .await
        .map_err(|e| AuthError::ValidateCredentials(e.to_string()))?;

        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        let claims = Claims::for_user(user.id, user.name.as_str(), TOKEN_TTL_HOURS);
        let token = self
            .tokens
            .encode(&claims)
            .map_err(|e| AuthError::SignToken(e.to_string()))?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(Session {
            user: user.into_profile(),
            token,
        })
    }

    async fn validate_user(&self, id: &UserId) -> Result<UserProfile, AuthError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|e| AuthError::FindUser(e.to_string()))?
            .map(User::into_profile)
            .ok_or(AuthError::InvalidToken)
    }
}
