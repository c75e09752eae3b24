use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Access token payload.
///
/// `sub` and `userId` both carry the user identifier; token consumers read
/// whichever they prefer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    #[serde(rename = "userId")]
    pub user_id: String,

    /// Display name of the user
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for an authenticated user.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `username` - Display name embedded in the token
    /// * `expiration_hours` - Hours until token expires
    pub fn for_user(
        user_id: impl ToString,
        username: impl Into<String>,
        expiration_hours: i64,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(expiration_hours);
        let user_id = user_id.to_string();

        Self {
            sub: user_id.clone(),
            user_id,
            username: username.into(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }
}
