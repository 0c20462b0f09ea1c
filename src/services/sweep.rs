use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::models::{latest_creation_time, AuthorOrigin, Issue};
use crate::domain::ports::{
    IssueSource, Notifier, NotifyError, SourceError, WatermarkStore, WatermarkStoreError,
};

/// Channel key under which the end-of-run digest records its last-post date.
/// Fixed, so at most one digest goes out per calendar day no matter how many
/// sweeps run.
pub const DIGEST_CHANNEL_KEY: &str = "sweep-digest";

/// Watermark string format. Matches the upstream `created:>` filter and has
/// no offset suffix; all stored times are UTC.
const WATERMARK_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Error type for a sweep run
#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error(transparent)]
    Store(#[from] WatermarkStoreError),
}

/// Counts from a completed sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub total_repos: usize,
    /// Repositories with no new issues since their watermark.
    pub quiet_repos: usize,
    pub issues_notified: usize,
}

/// One full poll-and-notify pass over an organization's repositories.
///
/// Strictly sequential: repositories are visited one at a time, and within a
/// repository every message is sent before the watermark advances, so a crash
/// mid-repo re-notifies that repo's issues on the next run rather than losing
/// them. A failing upstream query for any repository aborts the whole sweep.
pub struct SweepService {
    source: Arc<dyn IssueSource>,
    notifier: Arc<dyn Notifier>,
    store: Arc<dyn WatermarkStore>,
    org: String,
    channel: String,
}

impl SweepService {
    pub fn new(
        source: Arc<dyn IssueSource>,
        notifier: Arc<dyn Notifier>,
        store: Arc<dyn WatermarkStore>,
        org: String,
        channel: String,
    ) -> Self {
        Self {
            source,
            notifier,
            store,
            org,
            channel,
        }
    }

    /// Run one sweep: check every repository for issues created after its
    /// stored watermark, notify per issue, advance watermarks, then send the
    /// daily digest.
    pub async fn run(&self) -> Result<SweepReport, SweepError> {
        let repos = self.source.list_public_repositories(&self.org).await?;
        let total_repos = repos.len();
        info!(org = %self.org, total_repos, "starting sweep");

        let mut quiet_repos = 0;
        let mut issues_notified = 0;

        for repo in &repos {
            let watermark = self.store.get(&repo.full_name).await?;
            let since = (!watermark.is_empty()).then_some(watermark.as_str());

            let issues = self.source.list_new_issues(&repo.full_name, since).await?;
            if issues.is_empty() {
                debug!(repo = %repo.full_name, "no new issues");
                quiet_repos += 1;
                continue;
            }

            for issue in &issues {
                let origin = self.source.classify_author(issue, &self.org).await;
                let message = format_issue_message(&repo.full_name, issue, origin);
                self.notifier.post(&message, &self.channel).await?;
                issues_notified += 1;
            }

            // Persisted only after every message for this repo went out:
            // at-least-once delivery, never silent loss.
            if let Some(latest) = latest_creation_time(&issues) {
                self.store
                    .set(&repo.full_name, &latest.format(WATERMARK_FORMAT).to_string())
                    .await?;
            }

            debug!(repo = %repo.full_name, new_issues = issues.len(), "repo processed");
        }

        let digest = format_digest_message(total_repos, quiet_repos);
        self.notifier
            .post_daily(&digest, DIGEST_CHANNEL_KEY)
            .await?;

        info!(total_repos, quiet_repos, issues_notified, "sweep finished");
        Ok(SweepReport {
            total_repos,
            quiet_repos,
            issues_notified,
        })
    }
}

fn format_digest_message(total_repos: usize, quiet_repos: usize) -> String {
    format!(
        "Finished checking {total_repos} repos for new issues. \
         {quiet_repos}/{total_repos} repos contained no new issues."
    )
}

fn format_issue_message(repo_full_name: &str, issue: &Issue, origin: AuthorOrigin) -> String {
    format!(
        ":github_octocat: *New {origin} issue in {repo_full_name} raised by {author}*\n{title}\n{url}",
        author = issue.author,
        title = issue.title,
        url = issue.url,
    )
}
