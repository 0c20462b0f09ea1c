use serde::{Deserialize, Serialize};

/// Main configuration structure for Issue Herald
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// GitHub polling configuration
    #[serde(default)]
    pub github: GithubConfig,

    /// Slack webhook configuration
    #[serde(default)]
    pub slack: SlackConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github: GithubConfig::default(),
            slack: SlackConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// GitHub polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GithubConfig {
    /// Organization whose repositories are swept for new issues
    #[serde(default)]
    pub org: String,

    /// Base URL of the GitHub REST API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Restrict the repository search to public repositories.
    ///
    /// Off by default: the upstream `org:` search query does not filter by
    /// visibility, and that behavior is kept unless explicitly opted into.
    #[serde(default)]
    pub public_only: bool,

    /// Request timeout in seconds for API calls
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Delay in milliseconds before every search request. The search API
    /// rate-limits aggressively; anything below 1000ms fails validation.
    #[serde(default = "default_search_delay_ms")]
    pub search_delay_ms: u64,
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_search_delay_ms() -> u64 {
    1000
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            org: String::new(),
            api_base: default_api_base(),
            public_only: false,
            request_timeout_secs: default_request_timeout_secs(),
            search_delay_ms: default_search_delay_ms(),
        }
    }
}

/// Slack webhook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SlackConfig {
    /// Channel key under which per-issue notifications record their last-post
    /// date. The webhook URL itself decides where messages land; this key
    /// only namespaces the bookkeeping.
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Request timeout in seconds for webhook delivery
    #[serde(default = "default_webhook_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_channel() -> String {
    "notifications".to_string()
}

const fn default_webhook_timeout_secs() -> u64 {
    10
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            request_timeout_secs: default_webhook_timeout_secs(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to the `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,
}

fn default_database_path() -> String {
    "herald.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl DatabaseConfig {
    /// Connection URL for sqlx
    pub fn url(&self) -> String {
        format!("sqlite:{}", self.path)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
