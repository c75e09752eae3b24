use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::UserName;
use crate::domain::user::models::UserProfile;

/// Lifetime of an issued access token.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Command to register a new account with validated fields.
#[derive(Debug)]
pub struct RegisterCommand {
    pub name: UserName,
    pub email: EmailAddress,
    pub password: Password,
}

/// Command to exchange credentials for a token.
///
/// The password is not run through the length policy: a wrong password is
/// reported as invalid credentials, not as a validation failure.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

/// Successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: UserProfile,
    pub token: String,
}
