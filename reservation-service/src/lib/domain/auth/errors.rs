use thiserror::Error;

/// Failures of a hash adapter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HashError {
    #[error("Hashing failed: {0}")]
    HashingFailed(String),

    #[error("Comparison failed: {0}")]
    ComparisonFailed(String),
}

/// Errors surfaced by registration, login and token validation.
///
/// The display text is what the client sees; the payload of internal
/// variants is diagnostic detail for the logs only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Error checking existing user")]
    CheckExistingUser(String),

    #[error("Error hashing password")]
    HashPassword(String),

    #[error("Error creating user")]
    CreateUser(String),

    #[error("Error finding user")]
    FindUser(String),

    #[error("Error validating credentials")]
    ValidateCredentials(String),

    #[error("Error signing token")]
    SignToken(String),
}

impl AuthError {
    /// Whether the failure is attributable to the caller rather than the system.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::UserAlreadyExists | AuthError::InvalidCredentials | AuthError::InvalidToken
        )
    }

    /// Diagnostic detail of internal failures.
    pub fn detail(&self) -> Option<&str> {
        match self {
            AuthError::CheckExistingUser(detail)
            | AuthError::HashPassword(detail)
            | AuthError::CreateUser(detail)
            | AuthError::FindUser(detail)
            | AuthError::ValidateCredentials(detail)
            | AuthError::SignToken(detail) => Some(detail),
            AuthError::UserAlreadyExists
            | AuthError::InvalidCredentials
            | AuthError::InvalidToken => None,
        }
    }
}
