//! Layered runtime settings.
//!
//! Settings are read from built-in defaults, then an optional TOML file, then
//! `LANEBOARD_`-prefixed environment variables. Nested keys use `__` in
//! variable names, so `LANEBOARD_MEMBER_SEARCH__LIMIT=25` sets
//! `member_search.limit`.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default configuration file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "laneboard.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "LANEBOARD_";

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider produced a value that does not fit the settings shape.
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// A loaded value is out of range.
    #[error("invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Dotted key of the offending value.
        key: &'static str,
        /// What is wrong with it.
        message: &'static str,
    },

    /// An operation needs a database but none is configured.
    #[error("database.url is not configured")]
    MissingDatabaseUrl,
}

/// Member search tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberSearchSettings {
    /// Maximum number of directory candidates fetched per search.
    pub limit: usize,
    /// Queries shorter than this return no candidates.
    pub min_query_chars: usize,
}

impl Default for MemberSearchSettings {
    fn default() -> Self {
        Self {
            limit: 15,
            min_query_chars: 2,
        }
    }
}

/// Database connection settings for the `PostgreSQL` adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Connection URL; unset when running purely in memory.
    pub url: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            pool_max_size: 8,
        }
    }
}

impl DatabaseSettings {
    /// Returns the configured connection URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] when no URL is set.
    pub fn require_url(&self) -> Result<&str, ConfigError> {
        self.url.as_deref().ok_or(ConfigError::MissingDatabaseUrl)
    }
}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// Member search tuning.
    pub member_search: MemberSearchSettings,
    /// Database connection.
    pub database: DatabaseSettings,
}

impl BoardSettings {
    /// Loads settings from defaults, `laneboard.toml`, and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a provider fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Loads settings using `path` as the configuration file.
    ///
    /// A missing file is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a provider fails or a value is invalid.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::from_figment(
            Self::base_figment()
                .merge(Toml::file(path))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    /// Returns a figment seeded with the defaults only.
    #[must_use]
    pub fn base_figment() -> Figment {
        Figment::new().merge(Serialized::defaults(Self::default()))
    }

    /// Extracts and validates settings from an assembled figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction fails or a value is invalid.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let settings: Self = figment.extract().map_err(Box::new)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.member_search.limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "member_search.limit",
                message: "must be at least 1",
            });
        }
        if self.database.pool_max_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "database.pool_max_size",
                message: "must be at least 1",
            });
        }
        Ok(())
    }
}
