//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use tasklane_core::TasklaneError;
use tracing::{debug, info, warn};

/// Listen address in Go `host:port` form, e.g. `:8080`.
pub const APP_ADDR_VAR: &str = "APP_ADDR";
/// Path of the SQLite database file.
pub const SQLITE_PATH_VAR: &str = "SQLITE_PATH";
/// Redis `host:port` address.
pub const REDIS_ADDR_VAR: &str = "REDIS_ADDR";

/// Configuration loader with layered sources.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `TASKLANE_` prefix (`TASKLANE_SERVER__PORT=9000`)
    /// 5. `APP_ADDR`, `SQLITE_PATH` and `REDIS_ADDR`
    pub fn new(config_dir: impl AsRef<str>) -> Result<Self, TasklaneError> {
        let config = Self::load_config(config_dir.as_ref())?;
        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, TasklaneError> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, TasklaneError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment = std::env::var("TASKLANE_ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        let default_path = format!("{}/default.toml", config_dir);
        if Path::new(&default_path).exists() {
            debug!("Loading default config from: {}", default_path);
            builder = builder.add_source(File::with_name(&default_path).required(false));
        }

        let env_path = format!("{}/{}.toml", config_dir, environment);
        if Path::new(&env_path).exists() {
            debug!("Loading environment config from: {}", env_path);
            builder = builder.add_source(File::with_name(&env_path).required(false));
        }

        let local_path = format!("{}/local.toml", config_dir);
        if Path::new(&local_path).exists() {
            debug!("Loading local config from: {}", local_path);
            builder = builder.add_source(File::with_name(&local_path).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("TASKLANE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_tasklane_error)?;

        let mut app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_tasklane_error)?;
        app_config.app.environment = environment;

        apply_legacy_overrides(&mut app_config, |name| std::env::var(name).ok());

        ConfigValidator::validate(&app_config)
            .map_err(|errors| TasklaneError::Configuration(format_validation_errors(&errors)))?;

        Ok(app_config)
    }
}

/// Applies the plain deployment variables on top of the layered configuration.
///
/// Blank values are ignored. An unparsable `APP_ADDR` is logged and skipped.
pub fn apply_legacy_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(addr) = lookup(APP_ADDR_VAR) {
        if config.server.apply_listen_addr(&addr) {
            debug!(addr = %addr, "Listen address taken from {}", APP_ADDR_VAR);
        } else {
            warn!(addr = %addr, "Ignoring unparsable {}", APP_ADDR_VAR);
        }
    }

    if let Some(path) = lookup(SQLITE_PATH_VAR) {
        debug!(path = %path, "Database path taken from {}", SQLITE_PATH_VAR);
        config.database.set_sqlite_path(path.trim());
    }

    if let Some(addr) = lookup(REDIS_ADDR_VAR) {
        debug!(addr = %addr, "Redis address taken from {}", REDIS_ADDR_VAR);
        config.redis.set_addr(&addr);
    }
}

fn config_error_to_tasklane_error(err: ConfigError) -> TasklaneError {
    TasklaneError::Configuration(err.to_string())
}
