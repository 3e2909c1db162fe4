//! # gb-config
//!
//! Layered configuration loading for the gradebook server using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`GRADEBOOK_*` prefix, `__` as separator)
//! 2. Project-level `.gradebook/config.toml`
//! 3. User-level `~/.config/gradebook/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `GRADEBOOK_AUTH__JWT_SECRET` -> `auth.jwt_secret`,
//! `GRADEBOOK_REGISTRAR__URL` -> `registrar.url`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use gb_config::GradebookConfig;
//!
//! let config = GradebookConfig::load_with_dotenv().expect("config");
//! if config.registrar.is_configured() {
//!     println!("registrar at {}", config.registrar.url);
//! }
//! ```

mod auth;
mod database;
mod error;
mod general;
mod registrar;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use registrar::RegistrarConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "GRADEBOOK_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GradebookConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub registrar: RegistrarConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl GradebookConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source is malformed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the CLI can layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".gradebook/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check the settings `serve` cannot run without.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when no JWT secret is set, or
    /// `ConfigError::InvalidValue` for an unparsable bind address or a zero
    /// queue capacity.
    pub fn validate_for_serve(&self) -> Result<(), ConfigError> {
        if !self.auth.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "auth".into(),
            });
        }
        self.server.socket_addr()?;
        if self.registrar.queue_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "registrar.queue_capacity".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.registrar.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "registrar.max_attempts".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gradebook").join("config.toml"))
    }

    /// Load `.env` from the current directory. Silently does nothing if
    /// there is none.
    fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }
}
