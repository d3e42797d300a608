// =============================================================================
// Webhook Delivery — POST the weekly report to the configured endpoint
// =============================================================================
//
// Delivery is best-effort: a failed POST is surfaced to the caller as an
// error to log, never as a reason to abort the run.  The 30 s timeout is
// generous because some automation backends (n8n and friends) run the whole
// downstream workflow before answering.

use anyhow::{Context, Result};
use tracing::info;

use crate::report::WeeklyReport;

/// Sends the weekly report to a webhook endpoint.
pub struct WebhookSender {
    client: reqwest::Client,
}

impl WebhookSender {
    /// Create a sender with a default HTTP client (30 s timeout).
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("failed to build reqwest client for WebhookSender"),
        }
    }

    /// Create a sender that re-uses an existing HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// POST `report` as JSON to `url`, treating any non-2xx answer as an
    /// error.
    pub async fn send(&self, url: &str, report: &WeeklyReport) -> Result<()> {
        info!(url, "delivering report to webhook");

        let resp = self
            .client
            .post(url)
            .json(report)
            .send()
            .await
            .with_context(|| format!("POST report to {url}"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("webhook returned {status}: {body}");
        }

        info!("webhook delivered");
        Ok(())
    }
}

impl Default for WebhookSender {
    fn default() -> Self {
        Self::new()
    }
}
