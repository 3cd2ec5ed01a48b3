//! Configuration management for fleetroster.
//!
//! Configuration is loaded with figment from defaults, an optional TOML file
//! and `FLEETROSTER_`-prefixed environment variables.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "fleetroster";

/// Default fleet database file name.
const DATABASE_FILE_NAME: &str = "fleet.db";

/// Default session database file name.
const SESSION_FILE_NAME: &str = "session.db";

/// Storage key holding the serialized fleet.
pub const DEFAULT_FLEET_KEY: &str = "fleetData";

/// Session key holding the logged-in flag.
pub const DEFAULT_SESSION_KEY: &str = "fleetAppLoggedIn";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FLEETROSTER_`)
/// 2. TOML config file at `~/.config/fleetroster/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Persistent fleet storage.
    pub storage: StorageConfig,
    /// Login session storage.
    pub session: SessionConfig,
}

/// Persistent storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the fleet database.
    /// Defaults to `~/.local/share/fleetroster/fleet.db`
    pub database_path: Option<PathBuf>,
    /// Key the fleet collection is stored under.
    pub fleet_key: String,
}

/// Session storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Path to the session database.
    /// Defaults to `~/.local/share/fleetroster/session.db`
    pub database_path: Option<PathBuf>,
    /// Key the logged-in flag is stored under.
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            fleet_key: DEFAULT_FLEET_KEY.to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            key: DEFAULT_SESSION_KEY.to_string(),
        }
    }
}

impl Config {
    /// Load configuration, reading the TOML file at `config_path` or at
    /// [`Config::default_config_path`] when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("FLEETROSTER_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.fleet_key.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "storage.fleet_key must not be empty".to_string(),
            });
        }

        if self.session.key.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "session.key must not be empty".to_string(),
            });
        }

        if self.database_path() == self.session_database_path() {
            return Err(Error::ConfigValidation {
                message: format!(
                    "storage and session databases must differ (both are {})",
                    self.database_path().display()
                ),
            });
        }

        Ok(())
    }

    /// Get the fleet database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the session database path, resolving defaults if not set.
    #[must_use]
    pub fn session_database_path(&self) -> PathBuf {
        self.session
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(SESSION_FILE_NAME))
    }
}
