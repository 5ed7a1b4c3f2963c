//! # plan-config
//!
//! Layered configuration loading for the planner using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PLAN_*` prefix, `__` as separator)
//! 2. Project-level `.plan/config.toml`
//! 3. User-level `~/.config/plan/config.toml`
//! 4. Built-in defaults
//!
//! `PLAN_DATABASE__PATH` maps to `database.path`,
//! `PLAN_GENERAL__DEFAULT_PAGE_SIZE` to `general.default_page_size`.

mod database;
mod error;
mod general;

pub use database::{DatabaseConfig, IN_MEMORY};
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlanConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl PlanConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the current directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".plan/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("PLAN_").split("__"))
    }

    /// Reject values the store cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero page size or an empty
    /// database path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.default_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_page_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("plan").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn figment_builds_without_files() {
        let config: PlanConfig = PlanConfig::figment()
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.general.default_page_size, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("PLAN_DATABASE__PATH", ":memory:");
            jail.set_env("PLAN_GENERAL__DEFAULT_PAGE_SIZE", "50");
            let config: PlanConfig = PlanConfig::figment().extract()?;
            assert!(config.database.is_in_memory());
            assert_eq!(config.general.default_page_size, 50);
            assert_eq!(config.general.history_retention_days, 90);
            Ok(())
        });
    }

    #[test]
    fn project_file_is_read_and_env_wins() {
        Jail::expect_with(|jail| {
            std::fs::create_dir(jail.directory().join(".plan")).map_err(|e| e.to_string())?;
            jail.create_file(
                ".plan/config.toml",
                r#"
                [database]
                path = "project.db"

                [general]
                history_retention_days = 30
                "#,
            )?;
            jail.set_env("PLAN_GENERAL__HISTORY_RETENTION_DAYS", "7");
            let config: PlanConfig = PlanConfig::figment().extract()?;
            assert_eq!(config.database.path, "project.db");
            assert_eq!(config.general.history_retention_days, 7);
            Ok(())
        });
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let mut config = PlanConfig::default();
        config.general.default_page_size = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
