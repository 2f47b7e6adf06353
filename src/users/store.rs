use axum::async_trait;
use uuid::Uuid;

use super::repo_types::{NewUser, User, UserWithSecret};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered")]
    Conflict,
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Persistence boundary for user records.
///
/// Lookups return `Ok(None)` when nothing matches. `create` must reject a
/// duplicate email with [`StoreError::Conflict`] atomically with the insert.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_email_with_secret(
        &self,
        email: &str,
    ) -> Result<Option<UserWithSecret>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;
}
