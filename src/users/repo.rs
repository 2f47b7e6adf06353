use axum::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    repo_types::{NewUser, User, UserRow, UserWithSecret},
    store::{StoreError, UserStore},
};

/// PostgreSQL-backed user store. Uniqueness comes from `users_email_key`.
#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    let is_unique_violation = e
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);
    if is_unique_violation {
        StoreError::Conflict
    } else {
        StoreError::Backend(e.into())
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .find_by_email_with_secret(email)
            .await?
            .map(|found| found.user))
    }

    async fn find_by_email_with_secret(
        &self,
        email: &str,
    ) -> Result<Option<UserWithSecret>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, name, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(backend)?;
        row.map(UserWithSecret::try_from).transpose().map_err(StoreError::Backend)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, name, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(backend)?;
        Ok(row
            .map(UserWithSecret::try_from)
            .transpose()?
            .map(|found| found.user))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, email, password_hash, name, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, password_hash, name, role, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.name)
        .bind(new_user.role.as_str())
        .fetch_one(&self.db)
        .await
        .map_err(backend)?;
        Ok(UserWithSecret::try_from(row)?.user)
    }
}
