//! Configuration loading for the listings service.
//!
//! Loads layered `.env` files and environment variables prefixed with
//! `LISTINGS_`, producing a typed [`AppConfig`].

use std::{collections::BTreeMap, env, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application configuration derived from `LISTINGS_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AppConfig {
    #[serde(default = "default_profile")]
    pub profile: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    #[serde(default = "default_db_acquire_timeout_ms")]
    pub db_acquire_timeout_ms: u64,
    #[serde(default = "default_seed_on_startup")]
    pub seed_on_startup: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            database_url: default_database_url(),
            db_max_connections: default_db_max_connections(),
            db_acquire_timeout_ms: default_db_acquire_timeout_ms(),
            seed_on_startup: default_seed_on_startup(),
        }
    }
}

impl AppConfig {
    /// Serializes the configuration for startup logging. No field carries a
    /// secret, so everything is emitted as-is.
    pub fn as_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Validates the loaded configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections {
                value: self.db_max_connections,
            });
        }
        if self.db_acquire_timeout_ms == 0 {
            return Err(ConfigError::InvalidAcquireTimeout {
                value: self.db_acquire_timeout_ms,
            });
        }
        Ok(())
    }
}

fn default_profile() -> String {
    "dev".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_database_url() -> String {
    "sqlite://listings.db?mode=rwc".to_string()
}

fn default_db_max_connections() -> u32 {
    5
}

fn default_db_acquire_timeout_ms() -> u64 {
    5_000
}

fn default_seed_on_startup() -> bool {
    true
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load environment file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
    #[error("LISTINGS_DB_MAX_CONNECTIONS must be at least 1, got {value}")]
    InvalidMaxConnections { value: u32 },
    #[error("LISTINGS_DB_ACQUIRE_TIMEOUT_MS must be at least 1, got {value}")]
    InvalidAcquireTimeout { value: u64 },
}

/// Loads configuration using layered `.env` files and `LISTINGS_*` env vars.
pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a new loader rooted at the current working directory.
    pub fn new() -> Self {
        Self {
            base_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Creates a loader rooted at the provided directory (useful for tests).
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Loads and validates the configuration.
    ///
    /// Layering order, later wins: `.env`, `.env.local`, `.env.<profile>`,
    /// `.env.<profile>.local`, then the process environment.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let (mut layered, profile_hint) = self.collect_layered_env()?;

        // Overlay process environment last so it wins.
        for (key, value) in env::vars() {
            if let Some(stripped) = key.strip_prefix("LISTINGS_") {
                layered.insert(stripped.to_string(), value);
            }
        }

        let profile = layered
            .remove("PROFILE")
            .filter(|v| !v.is_empty())
            .unwrap_or(profile_hint);
        let log_level = layered
            .remove("LOG_LEVEL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_log_level);
        let log_format = layered
            .remove("LOG_FORMAT")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_log_format);
        let database_url = layered
            .remove("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_database_url);
        let db_max_connections = layered
            .remove("DB_MAX_CONNECTIONS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_db_max_connections);
        let db_acquire_timeout_ms = layered
            .remove("DB_ACQUIRE_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_db_acquire_timeout_ms);
        let seed_on_startup = layered
            .remove("SEED_ON_STARTUP")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_seed_on_startup);

        let config = AppConfig {
            profile,
            log_level,
            log_format,
            database_url,
            db_max_connections,
            db_acquire_timeout_ms,
            seed_on_startup,
        };

        config.validate()?;
        Ok(config)
    }

    fn collect_layered_env(&self) -> Result<(BTreeMap<String, String>, String), ConfigError> {
        let mut values = BTreeMap::new();

        self.merge_dotenv(self.base_dir.join(".env"), &mut values)?;
        self.merge_dotenv(self.base_dir.join(".env.local"), &mut values)?;

        let profile = env::var("LISTINGS_PROFILE")
            .ok()
            .or_else(|| values.get("PROFILE").cloned())
            .unwrap_or_else(default_profile);

        self.merge_dotenv(
            self.base_dir.join(format!(".env.{}", &profile)),
            &mut values,
        )?;
        self.merge_dotenv(
            self.base_dir.join(format!(".env.{}.local", &profile)),
            &mut values,
        )?;

        Ok((values, profile))
    }

    fn merge_dotenv(
        &self,
        path: PathBuf,
        values: &mut BTreeMap<String, String>,
    ) -> Result<(), ConfigError> {
        match dotenvy::from_path_iter(&path) {
            Ok(iter) => {
                for item in iter {
                    let (key, value) = item.map_err(|source| ConfigError::EnvFile {
                        path: path.clone(),
                        source,
                    })?;
                    if let Some(stripped) = key.strip_prefix("LISTINGS_") {
                        values.insert(stripped.to_string(), value);
                    }
                }
                Ok(())
            }
            Err(dotenvy::Error::Io(ref io_err))
                if io_err.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(())
            }
            Err(err) => Err(ConfigError::EnvFile { path, source: err }),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert_eq!(config.profile, "dev");
        assert_eq!(config.db_max_connections, 5);
        assert!(config.seed_on_startup);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_from_layered_env_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".env"),
            "LISTINGS_PROFILE=test\nLISTINGS_DATABASE_URL=sqlite://base.db\nLISTINGS_LOG_LEVEL=debug\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(".env.test"),
            "LISTINGS_DATABASE_URL=sqlite://profile.db\nLISTINGS_SEED_ON_STARTUP=false\n",
        )
        .unwrap();

        let config = ConfigLoader::with_base_dir(dir.path().to_path_buf())
            .load()
            .unwrap();

        assert_eq!(config.profile, "test");
        // Profile layer overrides the base layer.
        assert_eq!(config.database_url, "sqlite://profile.db");
        assert_eq!(config.log_level, "debug");
        assert!(!config.seed_on_startup);
    }

    #[test]
    fn missing_env_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::with_base_dir(dir.path().to_path_buf())
            .load()
            .unwrap();

        assert_eq!(config.database_url, default_database_url());
        assert_eq!(config.db_acquire_timeout_ms, 5_000);
    }

    #[test]
    fn unparsable_numeric_values_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".env"),
            "LISTINGS_DB_MAX_CONNECTIONS=not-a-number\n",
        )
        .unwrap();

        let config = ConfigLoader::with_base_dir(dir.path().to_path_buf())
            .load()
            .unwrap();
        assert_eq!(config.db_max_connections, default_db_max_connections());
    }

    #[test]
    fn zero_max_connections_is_rejected() {
        let config = AppConfig {
            db_max_connections: 0,
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMaxConnections { value: 0 })
        ));
    }
}
