// =============================================================================
// COT Smart Money Monitor — Main Entry Point
// =============================================================================
//
// One-shot weekly run: fetch CFTC positioning for every configured asset,
// detect contrarian signals, print a summary, save the JSON report locally
// and deliver it to the configured webhook.  Scheduling is the host's job
// (cron / systemd timer); the binary itself never loops.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod cftc;
mod config;
mod monitor;
mod report;
mod signals;
mod types;
mod webhook;

use futures_util::future::join_all;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cftc::CftcClient;
use crate::config::MonitorConfig;
use crate::monitor::analyze_asset;
use crate::report::WeeklyReport;
use crate::types::AssetAnalysis;
use crate::webhook::WebhookSender;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║        COT Smart Money Monitor — Weekly Run              ║");
    info!("╚══════════════════════════════════════════════════════════╝");

    let config_path =
        std::env::var("COT_CONFIG").unwrap_or_else(|_| "config.json".to_string());
    let mut config = MonitorConfig::load_or_init(&config_path);

    // Override the webhook target from env if available.
    if let Ok(url) = std::env::var("COT_WEBHOOK_URL") {
        if !url.is_empty() {
            config.n8n_webhook_url = url;
        }
    }

    if !config.webhook_configured() {
        warn!("webhook URL is the placeholder, delivery will be skipped — update config.json");
    }

    // ── 2. Analyze all assets concurrently ───────────────────────────────
    let client = CftcClient::new();

    let analyses: Vec<AssetAnalysis> = join_all(
        config
            .assets
            .iter()
            .map(|(code, asset)| analyze_asset(&client, code, asset, &config.lookback)),
    )
    .await
    .into_iter()
    .flatten()
    .collect();

    // ── 3. Build, print and save the report ──────────────────────────────
    let report = WeeklyReport::build(analyses);
    report.log_summary();

    let report_path = WeeklyReport::default_file_name();
    if let Err(e) = report.save(&report_path) {
        warn!(error = %e, "failed to save report locally");
    }

    // ── 4. Deliver to the webhook ────────────────────────────────────────
    if config.webhook_configured() {
        if let Err(e) = WebhookSender::new()
            .send(&config.n8n_webhook_url, &report)
            .await
        {
            warn!(error = %e, "webhook delivery failed");
        }
    } else {
        info!("skipping webhook delivery (URL not configured)");
    }

    info!("analysis complete");
    Ok(())
}
