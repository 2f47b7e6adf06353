use std::sync::Arc;

use anyhow::Context;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::auth::jwt::JwtKeys;
use crate::auth::password::hash_password_blocking;
use crate::config::{AppConfig, JwtConfig};
use crate::users::{MemoryUserStore, PgUserStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub jwt: Arc<JwtKeys>,
    /// Hash verified against when a login names an unknown email.
    decoy_hash: Arc<OnceCell<String>>,
}

impl AppState {
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn UserStore> = match &config.database_url {
            Some(url) => {
                let db = sqlx::postgres::PgPoolOptions::new()
                    .max_connections(10)
                    .connect(url)
                    .await
                    .context("connect to database")?;
                sqlx::migrate!("./migrations")
                    .run(&db)
                    .await
                    .context("run migrations")?;
                info!("using postgres user store");
                Arc::new(PgUserStore::new(db))
            }
            None => {
                warn!("DATABASE_URL not set; users are kept in memory and lost on restart");
                Arc::new(MemoryUserStore::new())
            }
        };

        let state = Self::from_parts(store, &config.jwt);
        state.decoy_hash().await.context("compute decoy hash")?;
        Ok(state)
    }

    pub fn from_parts(store: Arc<dyn UserStore>, jwt: &JwtConfig) -> Self {
        Self {
            store,
            jwt: Arc::new(JwtKeys::new(jwt)),
            decoy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Computed once on the blocking pool; later calls return the cached hash.
    pub async fn decoy_hash(&self) -> anyhow::Result<&str> {
        let hash = self
            .decoy_hash
            .get_or_try_init(|| hash_password_blocking("credgate-timing-equalizer".into()))
            .await?;
        Ok(hash.as_str())
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::fake_with_store(Arc::new(MemoryUserStore::new()))
    }

    #[cfg(test)]
    pub fn fake_with_store(store: Arc<dyn UserStore>) -> Self {
        let jwt = JwtConfig {
            secret: "test".into(),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            ttl_minutes: 60 * 24,
        };
        Self::from_parts(store, &jwt)
    }

    #[cfg(test)]
    pub fn decoy_hash_ready(&self) -> bool {
        self.decoy_hash.initialized()
    }
}
