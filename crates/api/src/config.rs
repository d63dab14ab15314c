use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Configuration error raised while reading the environment.
#[derive(Debug, thiserror::Error)]
#[error("{name} must be a valid {kind}, got {value:?}")]
pub struct ConfigError {
    name: &'static str,
    kind: &'static str,
    value: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// PostgreSQL connection URL. Pages are kept in memory when unset.
    pub database_url: Option<String>,
    /// Maximum database connections in the pool.
    pub db_max_connections: u32,
    /// Minimum database connections in the pool.
    pub db_min_connections: u32,
    /// Undo snapshots kept per builder session (0 = unlimited).
    pub history_capacity: usize,
    /// Event bus channel capacity. Never 0.
    pub event_bus_capacity: usize,
    /// Seconds a session may sit untouched before it is discarded (0 = never).
    pub session_idle_secs: u64,
    /// Host shown in search previews, e.g. `shop.example.com`.
    pub preview_host: String,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3030,
            database_url: None,
            db_max_connections: 20,
            db_min_connections: 5,
            history_capacity: 100,
            event_bus_capacity: 1024,
            session_idle_secs: 30 * 60,
            preview_host: "localhost".to_string(),
            max_body_bytes: 2 * 1024 * 1024,
            log_level: "info".to_string(),
        }
    }
}

/// Reads variables through `lookup` so tests need not touch the process
/// environment.
struct Vars<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    fn string(&self, name: &str, default: String) -> String {
        (self.lookup)(name).unwrap_or(default)
    }

    fn parse<T: FromStr>(
        &self,
        name: &'static str,
        kind: &'static str,
        default: T,
    ) -> Result<T, ConfigError> {
        match (self.lookup)(name) {
            Some(value) => value.parse().map_err(|_| ConfigError { name, kind, value }),
            None => Ok(default),
        }
    }

    fn positive(&self, name: &'static str, default: usize) -> Result<usize, ConfigError> {
        let value = self.parse(name, "positive usize", default)?;
        if value == 0 {
            return Err(ConfigError {
                name,
                kind: "positive usize",
                value: value.to_string(),
            });
        }
        Ok(value)
    }
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars { lookup };
        let defaults = Self::default();
        Ok(Self {
            host: vars.string("HOST", defaults.host),
            port: vars.parse("PORT", "u16", defaults.port)?,
            database_url: (vars.lookup)("DATABASE_URL").filter(|url| !url.is_empty()),
            db_max_connections: vars.parse(
                "DB_MAX_CONNECTIONS",
                "u32",
                defaults.db_max_connections,
            )?,
            db_min_connections: vars.parse(
                "DB_MIN_CONNECTIONS",
                "u32",
                defaults.db_min_connections,
            )?,
            history_capacity: vars.parse("HISTORY_CAPACITY", "usize", defaults.history_capacity)?,
            event_bus_capacity: vars.positive("EVENT_BUS_CAPACITY", defaults.event_bus_capacity)?,
            session_idle_secs: vars.parse("SESSION_IDLE_SECS", "u64", defaults.session_idle_secs)?,
            preview_host: vars.string("PREVIEW_HOST", defaults.preview_host),
            max_body_bytes: vars.parse("MAX_BODY_BYTES", "usize", defaults.max_body_bytes)?,
            log_level: vars.string("LOG_LEVEL", defaults.log_level),
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// How long an untouched session is kept, or `None` to keep them all.
    pub fn session_idle(&self) -> Option<Duration> {
        (self.session_idle_secs > 0).then(|| Duration::from_secs(self.session_idle_secs))
    }
}
