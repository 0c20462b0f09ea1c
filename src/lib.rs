//! Issue Herald - organization issue sweep notifier
//!
//! Polls GitHub for newly raised issues across an organization's repositories
//! and relays a summary of each to a Slack channel. Deduplication is a
//! per-repository *watermark*: the most recently observed issue creation
//! time, persisted in SQLite so repeated stateless invocations pick up where
//! the last one stopped.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models and the port traits the sweep runs
//!   against
//! - **Service Layer** (`services`): the sweep orchestrator
//! - **Infrastructure Layer** (`infrastructure`): SQLite store, GitHub search
//!   client, Slack webhook sink, configuration
//! - **CLI Layer** (`cli`): argument parsing for the binary
//!
//! One sweep per process invocation; scheduling is left to cron or similar.

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    latest_creation_time, AuthorOrigin, Config, Issue, Membership, Repository,
};
pub use domain::ports::{IssueSource, Notifier, WatermarkStore};
pub use infrastructure::config::{ConfigError, ConfigLoader, Credentials};
pub use infrastructure::database::{DatabaseConnection, SqliteWatermarkStore};
pub use infrastructure::github::{GithubClient, GithubClientConfig};
pub use infrastructure::slack::SlackWebhook;
pub use services::{SweepReport, SweepService, DIGEST_CHANNEL_KEY};
