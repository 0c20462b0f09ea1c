//! Domain models.

pub mod config;
pub mod issue;

pub use config::{Config, DatabaseConfig, GithubConfig, LoggingConfig, SlackConfig};
pub use issue::{latest_creation_time, AuthorOrigin, Issue, Membership, Repository};
