//! Port traits the sweep depends on, plus their error types.
//!
//! Infrastructure adapters (SQLite store, GitHub client, Slack webhook)
//! implement these; the sweep orchestrator only sees the traits, so tests can
//! substitute stubs.

use async_trait::async_trait;

use super::models::{AuthorOrigin, Issue, Membership, Repository};

/// Error type for watermark store operations
#[derive(Debug, thiserror::Error)]
pub enum WatermarkStoreError {
    #[error("query failed: {0}")]
    QueryFailed(#[from] sqlx::Error),
}

/// Error type for upstream issue-source queries
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("upstream query `{query}` failed: {source}")]
    UpstreamQuery {
        query: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("upstream query `{query}` returned status {status}")]
    UpstreamStatus {
        query: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode response for query `{query}`: {source}")]
    Decode {
        query: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Error type for notification delivery
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("webhook delivery failed: {0}")]
    Delivery(#[from] reqwest::Error),

    #[error("failed to record last-post date: {0}")]
    Store(#[from] WatermarkStoreError),
}

/// Durable key-value store tracking the most recently observed item per
/// source key.
///
/// Keys are repository slugs for issue watermarks and `lastpost:{channel}`
/// for notification bookkeeping. Values are opaque strings; callers decide
/// how to parse them.
#[async_trait]
pub trait WatermarkStore: Send + Sync {
    /// Upsert the value for `source`. Replace semantics: at most one row per
    /// key, a second write overwrites.
    async fn set(&self, source: &str, lastseen: &str) -> Result<(), WatermarkStoreError>;

    /// Get the value for `source`. Returns an empty string when the key has
    /// never been written; absence is not an error.
    async fn get(&self, source: &str) -> Result<String, WatermarkStoreError>;
}

/// Upstream source of repositories and issues.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// All repositories belonging to `org`, as returned by the upstream
    /// search. Visibility filtering is adapter configuration.
    async fn list_public_repositories(&self, org: &str) -> Result<Vec<Repository>, SourceError>;

    /// Issues in `repo_full_name` created strictly after `since` (ISO-8601),
    /// or all issues when `since` is `None`.
    async fn list_new_issues(
        &self,
        repo_full_name: &str,
        since: Option<&str>,
    ) -> Result<Vec<Issue>, SourceError>;

    /// Organization-membership lookup for `login`. Lookup failures are a
    /// normal outcome ([`Membership::CheckError`]), never an `Err`.
    async fn check_membership(&self, login: &str, org: &str) -> Membership;

    /// Classify an issue's author as internal or external to `org`. A failed
    /// membership check classifies as external rather than aborting.
    async fn classify_author(&self, issue: &Issue, org: &str) -> AuthorOrigin {
        self.check_membership(&issue.author, org).await.into()
    }
}

/// Sink for chat notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `message` and record today's date as the last-post time for
    /// `channel_key`.
    async fn post(&self, message: &str, channel_key: &str) -> Result<(), NotifyError>;

    /// Like [`Notifier::post`], but suppressed when a post under
    /// `channel_key` already happened on the current calendar day.
    async fn post_daily(&self, message: &str, channel_key: &str) -> Result<(), NotifyError>;
}
