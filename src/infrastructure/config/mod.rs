//! Configuration loading with hierarchical merging.

use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Environment variable holding the GitHub API token.
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
/// Environment variable holding the Slack incoming-webhook URL.
pub const ENV_SLACK_WEBHOOK_URL: &str = "SLACK_WEBHOOK_URL";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),

    #[error("github.org must be set (HERALD_GITHUB__ORG or github.org in the config file)")]
    MissingOrg,

    #[error("invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("database path cannot be empty")]
    EmptyDatabasePath,

    #[error("search delay of {0}ms is below the 1000ms upstream rate-limit floor")]
    SearchDelayTooShort(u64),
}

/// Credentials read once at startup, kept out of the serializable config so
/// they never end up in a file.
pub struct Credentials {
    pub github_token: String,
    pub slack_webhook_url: String,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `herald.yaml` in the working directory, or the given path
    /// 3. Environment variables (`HERALD_*` prefix, `__` splits nesting)
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let file = path.unwrap_or_else(|| Path::new("herald.yaml"));

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(file))
            .merge(Env::prefixed("HERALD_").split("__"))
            .extract()
            .context("failed to extract configuration")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Read the required credentials from the environment.
    pub fn credentials() -> Result<Credentials, ConfigError> {
        let github_token = std::env::var(ENV_GITHUB_TOKEN)
            .map_err(|_| ConfigError::MissingEnv(ENV_GITHUB_TOKEN))?;
        let slack_webhook_url = std::env::var(ENV_SLACK_WEBHOOK_URL)
            .map_err(|_| ConfigError::MissingEnv(ENV_SLACK_WEBHOOK_URL))?;

        Ok(Credentials {
            github_token,
            slack_webhook_url,
        })
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.github.org.is_empty() {
            return Err(ConfigError::MissingOrg);
        }

        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        if config.github.search_delay_ms < 1000 {
            return Err(ConfigError::SearchDelayTooShort(
                config.github.search_delay_ms,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.github.org = "acme".to_string();
        config
    }

    #[test]
    fn test_defaults_fail_without_org() {
        let config = Config::default();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::MissingOrg)
        ));
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(ConfigLoader::validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_search_delay_floor_enforced() {
        let mut config = valid_config();
        config.github.search_delay_ms = 250;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::SearchDelayTooShort(250))
        ));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = valid_config();
        config.logging.level = "verbose".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_database_override_is_revalidated() {
        // A CLI-supplied database path replaces an already-validated one and
        // must pass the same checks a config-file value would.
        let mut config = valid_config();
        assert!(ConfigLoader::validate(&config).is_ok());

        config.database.path = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyDatabasePath)
        ));
    }

    #[test]
    fn test_empty_database_path_rejected() {
        let mut config = valid_config();
        config.database.path = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyDatabasePath)
        ));
    }
}
