use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;

use crate::domain::auth::errors::HashError;
use crate::domain::auth::ports::HashAdapter;

/// [`HashAdapter`] backed by the Argon2id hasher of the `auth` crate.
///
/// Hashing is CPU bound, so each call runs on the blocking thread pool.
#[derive(Clone)]
pub struct Argon2HashAdapter {
    hasher: Arc<PasswordHasher>,
}

impl Argon2HashAdapter {
    pub fn new() -> Self {
        Self {
            hasher: Arc::new(PasswordHasher::new()),
        }
    }
}

impl Default for Argon2HashAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HashAdapter for Argon2HashAdapter {
    async fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        let hasher = Arc::clone(&self.hasher);
        let plaintext = plaintext.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| HashError::HashingFailed(e.to_string()))?
            .map_err(|e| HashError::HashingFailed(e.to_string()))
    }

    async fn compare(&self, plaintext: &str, digest: &str) -> Result<bool, HashError> {
        let hasher = Arc::clone(&self.hasher);
        let plaintext = plaintext.to_owned();
        let digest = digest.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &digest))
            .await
            .map_err(|e| HashError::ComparisonFailed(e.to_string()))?
            .map_err(|e| HashError::ComparisonFailed(e.to_string()))
    }
}
