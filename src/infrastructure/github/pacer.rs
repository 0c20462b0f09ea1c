use std::time::Duration;

use tokio::time::sleep;

/// Fixed pre-request delay for the upstream search API.
///
/// The search endpoints rate-limit far below the general API quota, so every
/// search request waits the full delay up front - including the first one.
/// This is deliberately a blocking pause on the single sweep task, not a
/// token bucket; the sweep issues requests strictly sequentially.
#[derive(Debug, Clone)]
pub struct RequestPacer {
    delay: Duration,
}

impl RequestPacer {
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Wait the configured delay. A zero delay returns immediately, which
    /// tests rely on.
    pub async fn wait(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}
