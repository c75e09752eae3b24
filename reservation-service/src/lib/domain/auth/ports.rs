use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::HashError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::Session;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;

/// One-way password hashing capability.
///
/// Consumers only see this trait; the algorithm is chosen when the
/// application is wired together.
#[async_trait]
pub trait HashAdapter: Send + Sync + 'static {
    /// Produce a salted digest of `plaintext`.
    async fn hash(&self, plaintext: &str) -> Result<String, HashError>;

    /// Check `plaintext` against a digest produced by [`HashAdapter::hash`].
    ///
    /// A mismatch is `Ok(false)`; `Err` means the comparison itself failed.
    async fn compare(&self, plaintext: &str, digest: &str) -> Result<bool, HashError>;
}

/// Port for registration, login and token subject validation.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Create an account.
    ///
    /// # Returns
    /// The created user without its password hash
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `CheckExistingUser` / `HashPassword` / `CreateUser` - Internal failures
    async fn register(&self, command: RegisterCommand) -> Result<UserProfile, AuthError>;

    /// Verify credentials and issue an access token valid for one day.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `FindUser` / `ValidateCredentials` / `SignToken` - Internal failures
    async fn login(&self, command: LoginCommand) -> Result<Session, AuthError>;

    /// Resolve the subject of a verified token.
    ///
    /// # Errors
    /// * `InvalidToken` - Subject no longer exists
    /// * `FindUser` - Internal failure
    async fn validate_user(&self, id: &UserId) -> Result<UserProfile, AuthError>;
}
