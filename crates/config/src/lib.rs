use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "entry.toml",
    "config/entry.toml",
    "crates/config/entry.toml",
    "../entry.toml",
    "../config/entry.toml",
];

/// Upper bound applied to `session.ttl_seconds` (one year).
pub const MAX_SESSION_TTL_SECONDS: u64 = 365 * 86_400;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://entry.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Where issued session tokens are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// In-process cache, lost on restart.
    Memory,
    /// Shared redis instance.
    Redis,
}

/// Session cache settings.
///
/// Expiry is owned entirely by the cache; the identity core never inspects it.
///
/// ```
/// use entry_config::{SessionBackend, SessionConfig};
///
/// let session = SessionConfig::default();
/// assert_eq!(session.backend, SessionBackend::Memory);
/// assert_eq!(session.ttl_seconds, 86_400);
/// assert_eq!(session.key_prefix, "session:");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "SessionConfig::default_backend")]
    pub backend: SessionBackend,
    #[serde(default = "SessionConfig::default_redis_url")]
    pub redis_url: String,
    #[serde(default = "SessionConfig::default_key_prefix")]
    pub key_prefix: String,
    #[serde(default = "SessionConfig::default_ttl")]
    pub ttl_seconds: u64,
}

impl SessionConfig {
    const fn default_backend() -> SessionBackend {
        SessionBackend::Memory
    }

    fn default_redis_url() -> String {
        "redis://127.0.0.1:6379".to_string()
    }

    fn default_key_prefix() -> String {
        "session:".to_string()
    }

    const fn default_ttl() -> u64 {
        86_400
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: Self::default_backend(),
            redis_url: Self::default_redis_url(),
            key_prefix: Self::default_key_prefix(),
            ttl_seconds: Self::default_ttl(),
        }
    }
}

/// Password hashing scheme used for new registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    /// Salted Argon2id PHC strings.
    #[default]
    Argon2,
    /// Unsalted hex SHA-256, kept for rows written by older deployments.
    Sha256,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub password_scheme: PasswordScheme,
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use entry_config::load;
///
/// std::env::remove_var("ENTRY_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.database.url.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let session_ttl = i64::try_from(defaults.session.ttl_seconds).unwrap_or(i64::MAX);

    let mut builder = config::Config::builder()
        .set_default("database.url", defaults.database.url.clone())?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default("session.backend", "memory")?
        .set_default("session.redis_url", defaults.session.redis_url.clone())?
        .set_default("session.key_prefix", defaults.session.key_prefix.clone())?
        .set_default("session.ttl_seconds", session_ttl)?
        .set_default("auth.password_scheme", "argon2")?;

    let environment_overrides = config::Environment::with_prefix("ENTRY").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("ENTRY_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via ENTRY_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    config.session.ttl_seconds = config.session.ttl_seconds.clamp(1, MAX_SESSION_TTL_SECONDS);

    debug!(?config, "loaded identity configuration");
    Ok(config)
}
