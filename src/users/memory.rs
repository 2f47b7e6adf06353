use std::collections::HashMap;

use axum::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    repo_types::{NewUser, User, UserWithSecret},
    store::{StoreError, UserStore},
};

/// Process-local user store keyed by email.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, UserWithSecret>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(email).map(|u| u.user.clone()))
    }

    async fn find_by_email_with_secret(
        &self,
        email: &str,
    ) -> Result<Option<UserWithSecret>, StoreError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.user.id == id)
            .map(|u| u.user.clone()))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        // check and insert under one write guard
        let mut users = self.users.write().await;
        if users.contains_key(&new_user.email) {
            return Err(StoreError::Conflict);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email.clone(),
            name: new_user.name,
            role: new_user.role,
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(
            new_user.email,
            UserWithSecret {
                user: user.clone(),
                password_hash: new_user.password_hash,
            },
        );
        Ok(user)
    }
}
