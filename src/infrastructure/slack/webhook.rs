use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate};
use reqwest::{header, Client as ReqwestClient};
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{Notifier, NotifyError, WatermarkStore};

/// Slack incoming-webhook sink implementing [`Notifier`]
///
/// Posts `{"text": message}` to a fixed webhook URL and records the local
/// calendar date of each post per channel key in the shared watermark store,
/// which `post_daily` consults to suppress same-day repeats.
pub struct SlackWebhook {
    http: ReqwestClient,
    webhook_url: String,
    store: Arc<dyn WatermarkStore>,
}

/// Store key under which a channel's last-post date lives. Prefixed so
/// channel keys cannot collide with repository watermark keys.
fn lastpost_key(channel_key: &str) -> String {
    format!("lastpost:{channel_key}")
}

/// Calendar date as the integer YYYYMMDD, the format the suppression
/// arithmetic compares.
fn date_as_int(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 10_000 + i64::from(date.month()) * 100 + i64::from(date.day())
}

impl SlackWebhook {
    pub fn new(
        webhook_url: String,
        timeout: Duration,
        store: Arc<dyn WatermarkStore>,
    ) -> Result<Self> {
        let http = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            webhook_url,
            store,
        })
    }
}

#[async_trait]
impl Notifier for SlackWebhook {
    async fn post(&self, message: &str, channel_key: &str) -> Result<(), NotifyError> {
        let payload = json!({ "text": message });

        let response = self
            .http
            .post(&self.webhook_url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await?;

        // The date is recorded whatever the response status says; a non-2xx
        // answer still counts as today's post. Only a transport-level failure
        // (no response at all) skips the bookkeeping, by erroring out above.
        let today = date_as_int(Local::now().date_naive());
        self.store
            .set(&lastpost_key(channel_key), &today.to_string())
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(channel_key, %status, "webhook returned non-success status");
        }

        Ok(())
    }

    async fn post_daily(&self, message: &str, channel_key: &str) -> Result<(), NotifyError> {
        let recorded = self.store.get(&lastpost_key(channel_key)).await?;
        let today = date_as_int(Local::now().date_naive());

        // An absent or unparsable last-post date permits the post; only a
        // recorded same-day (or later) date suppresses it.
        if let Ok(lastpost) = recorded.parse::<i64>() {
            if today - lastpost <= 0 {
                info!(channel_key, "already posted today, skipping daily message");
                return Ok(());
            }
        }

        self.post(message, channel_key).await
    }
}
