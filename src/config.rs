//! Store configuration loaded from the process environment.
//!
//! A `.env` file in the working directory is read first when present.
//! Recognised variables:
//!
//! - `TASKBOARD_DATABASE_URL` (or `DATABASE_URL`): `PostgreSQL` connection
//!   string. When neither is set the in-memory store is used.
//! - `TASKBOARD_POOL_MAX_SIZE`: maximum pooled connections, default 8.

use thiserror::Error;
use tracing::debug;

/// Primary database URL variable.
pub const DATABASE_URL_ENV: &str = "TASKBOARD_DATABASE_URL";

/// Database URL variable consulted when [`DATABASE_URL_ENV`] is unset.
pub const FALLBACK_DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Pool size variable.
pub const POOL_MAX_SIZE_ENV: &str = "TASKBOARD_POOL_MAX_SIZE";

/// Pool size used when [`POOL_MAX_SIZE_ENV`] is unset.
pub const DEFAULT_POOL_MAX_SIZE: u32 = 8;

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The pool size is not a positive integer.
    #[error("invalid TASKBOARD_POOL_MAX_SIZE value '{0}', expected a positive integer")]
    InvalidPoolSize(String),
}

/// Where task records are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    database_url: Option<String>,
    pool_max_size: u32,
}

/// Backend selected by a [`StoreConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend<'a> {
    /// Process-local store; contents vanish on exit.
    InMemory,
    /// `PostgreSQL` store reached through a connection pool.
    Postgres {
        /// Connection string.
        database_url: &'a str,
        /// Maximum pooled connections.
        pool_max_size: u32,
    },
}

impl StoreConfig {
    /// Configuration selecting the in-memory store.
    #[must_use]
    pub const fn in_memory() -> Self {
        Self {
            database_url: None,
            pool_max_size: DEFAULT_POOL_MAX_SIZE,
        }
    }

    /// Configuration selecting a `PostgreSQL` store.
    #[must_use]
    pub fn postgres(database_url: impl Into<String>) -> Self {
        Self {
            database_url: Some(database_url.into()),
            pool_max_size: DEFAULT_POOL_MAX_SIZE,
        }
    }

    /// Sets the maximum pool size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPoolSize`] when `size` is zero.
    pub fn with_pool_max_size(mut self, size: u32) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::InvalidPoolSize(size.to_string()));
        }
        self.pool_max_size = size;
        Ok(self)
    }

    /// Loads configuration from `.env` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            debug!(%err, "no .env file loaded");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url =
            non_blank(DATABASE_URL_ENV).or_else(|| non_blank(FALLBACK_DATABASE_URL_ENV));
        let pool_max_size = match non_blank(POOL_MAX_SIZE_ENV) {
            Some(raw) => parse_pool_size(&raw)?,
            None => DEFAULT_POOL_MAX_SIZE,
        };

        Ok(Self {
            database_url,
            pool_max_size,
        })
    }

    /// Returns the configured backend.
    #[must_use]
    pub fn backend(&self) -> StoreBackend<'_> {
        self.database_url
            .as_deref()
            .map_or(StoreBackend::InMemory, |database_url| {
                StoreBackend::Postgres {
                    database_url,
                    pool_max_size: self.pool_max_size,
                }
            })
    }

    /// Returns the maximum pool size.
    #[must_use]
    pub const fn pool_max_size(&self) -> u32 {
        self.pool_max_size
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn parse_pool_size(raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|size| *size > 0)
        .ok_or_else(|| ConfigError::InvalidPoolSize(raw.to_owned()))
}
