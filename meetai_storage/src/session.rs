use std::sync::Arc;

use anyhow::Context;
use meetai_models::user::User;

use crate::KeyValueStore;

pub const USER_KEY: &str = "meetai_user";
pub const ACCESS_TOKEN_KEY: &str = "meetai_access_token";

/// The signed-in user and their access token.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn save_user(&self, user: &User) -> anyhow::Result<()> {
        let serialized = serde_json::to_string(user)?;
        self.store.set(USER_KEY, serialized).await
    }

    /// Persisted users are trusted as written; a malformed record is an error.
    pub async fn load_user(&self) -> anyhow::Result<Option<User>> {
        let Some(serialized) = self.store.get(USER_KEY).await? else {
            return Ok(None);
        };

        let user = serde_json::from_str(&serialized).context("Stored user is malformed")?;
        Ok(Some(user))
    }

    pub async fn save_access_token(&self, token: &str) -> anyhow::Result<()> {
        self.store.set(ACCESS_TOKEN_KEY, token.to_owned()).await
    }

    pub async fn load_access_token(&self) -> anyhow::Result<Option<String>> {
        self.store.get(ACCESS_TOKEN_KEY).await
    }

    pub async fn clear(&self) -> anyhow::Result<()> {
        self.store.remove(USER_KEY).await?;
        self.store.remove(ACCESS_TOKEN_KEY).await?;
        log::info!("Cleared stored session");
        Ok(())
    }
}
