use std::sync::Arc;

use anyhow::Context;
use tokio::sync::RwLock;

use crate::auth::services::hash_password;
use crate::catalog::CatalogStore;
use crate::config::AppConfig;

/// Password shared by the sample accounts.
const SAMPLE_PASSWORD: &str = "password";

/// Shared handle to the catalog. Mutators hold the write lock for their whole
/// read-modify-write sequence.
pub type SharedStore = Arc<RwLock<CatalogStore>>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let store = if config.seed_sample_data {
            let hash = hash_password(SAMPLE_PASSWORD)?;
            CatalogStore::seeded(&hash).context("load sample data")?
        } else {
            CatalogStore::new()
        };

        Ok(Self::from_parts(store, config))
    }

    pub fn from_parts(store: CatalogStore, config: AppConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            config: Arc::new(config),
        }
    }

    /// Isolated state for tests: the given store, test JWT settings.
    #[cfg(test)]
    pub fn fake(store: CatalogStore, mode: crate::config::CatalogMode) -> Self {
        use crate::config::JwtConfig;

        let config = AppConfig {
            jwt: JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
            },
            mode,
            seed_sample_data: false,
            public_dir: "public".into(),
        };
        Self::from_parts(store, config)
    }

    #[cfg(test)]
    pub fn with_public_dir(self, dir: &std::path::Path) -> Self {
        let mut config = (*self.config).clone();
        config.public_dir = dir.to_path_buf();
        Self {
            store: self.store,
            config: Arc::new(config),
        }
    }
}
