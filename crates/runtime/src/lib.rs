use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use entry_config::{AppConfig, SessionBackend, SessionConfig};
use entry_database::{initialize_database, UserRepository};
use entry_identity::{
    CredentialValidator, IdentityService, MemorySessionStore, RedisSessionStore, SessionStore,
};
use sqlx::SqlitePool;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Collaborators built from configuration, with the identity service wired on top.
#[derive(Clone)]
pub struct IdentityRuntime {
    pub db_pool: SqlitePool,
    pub service: IdentityService,
    pub session_backend: SessionBackend,
}

impl IdentityRuntime {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let db_pool = initialize_database(&config.database)
            .await
            .context("failed to initialise user database")?;

        let sessions = build_session_store(&config.session)
            .await
            .context("failed to initialise session store")?;

        let credentials = CredentialValidator::from_config(&config.auth);
        info!(scheme = ?credentials.scheme(), "password scheme selected");

        let service = IdentityService::new(
            Arc::new(UserRepository::new(db_pool.clone())),
            sessions,
            credentials,
        );

        Ok(Self {
            db_pool,
            service,
            session_backend: config.session.backend,
        })
    }
}

async fn build_session_store(config: &SessionConfig) -> Result<Arc<dyn SessionStore>> {
    match config.backend {
        SessionBackend::Memory => {
            info!(ttl_seconds = config.ttl_seconds, "using in-process session cache");
            Ok(Arc::new(MemorySessionStore::new(Duration::from_secs(
                config.ttl_seconds,
            ))))
        }
        SessionBackend::Redis => {
            let store = RedisSessionStore::connect(
                &config.redis_url,
                config.key_prefix.clone(),
                config.ttl_seconds,
            )
            .await
            .with_context(|| format!("failed to connect to redis at {}", config.redis_url))?;
            info!(ttl_seconds = config.ttl_seconds, "using redis session store");
            Ok(Arc::new(store))
        }
    }
}
