use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::auth::ports::HashAdapter;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for account operations.
pub struct UserService<UR, H>
where
    UR: UserRepository,
    H: HashAdapter,
{
    repository: Arc<UR>,
    hasher: Arc<H>,
}

impl<UR, H> UserService<UR, H>
where
    UR: UserRepository,
    H: HashAdapter,
{
    pub fn new(repository: Arc<UR>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }
}

#[async_trait]
impl<UR, H> UserServicePort for UserService<UR, H>
where
    UR: UserRepository,
    H: HashAdapter,
{
    async fn get_user(&self, id: &UserId) -> Result<UserProfile, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(User::into_profile)
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<UserProfile, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(name) = command.name {
            user.name = name;
        }

        if let Some(password) = command.password {
            user.password_hash = self
                .hasher
                .hash(password.as_str())
                .await
                .map_err(|e| UserError::HashingFailed(e.to_string()))?;
        }

        let updated = self.repository.update(user).await?;

        Ok(updated.into_profile())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
