// =============================================================================
// Weekly Report — Aggregation, console summary, local JSON save
// =============================================================================
//
// Collects every per-asset analysis into one payload: the full asset list
// plus a filtered view of the non-neutral "active" signals that make the
// week worth reading.  The same payload is saved locally and delivered to
// the webhook.
//
// Saving uses the atomic tmp + rename pattern so a crash mid-write never
// leaves a truncated report on disk.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use tracing::info;

use crate::types::{AssetAnalysis, SignalStatus};

/// One non-neutral signal, summarised for the report header.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveSignal {
    /// Display label: "Nasdaq 100 (NQ)".
    pub asset: String,

    /// The resolved status.
    pub signal: SignalStatus,

    /// Hedge fund net position behind the signal.
    pub net_position: f64,
}

/// The full weekly report payload.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyReport {
    /// RFC 3339 timestamp of the run.
    pub timestamp: String,

    /// Date (YYYY-MM-DD) the report covers.
    pub week_ending: String,

    /// Number of assets successfully analyzed.
    pub total_assets: usize,

    /// Number of non-neutral signals.
    pub active_signals: usize,

    /// The non-neutral signals only.
    pub signals: Vec<ActiveSignal>,

    /// Every analyzed asset, active or not.
    pub all_assets: Vec<AssetAnalysis>,
}

impl WeeklyReport {
    /// Assemble the report from this run's analyses.
    pub fn build(all_assets: Vec<AssetAnalysis>) -> Self {
        let now = Local::now();

        let signals: Vec<ActiveSignal> = all_assets
            .iter()
            .filter(|a| a.signals.status.is_active())
            .map(|a| ActiveSignal {
                asset: format!("{} ({})", a.asset_name, a.asset_code),
                signal: a.signals.status,
                net_position: a.signals.current_net,
            })
            .collect();

        Self {
            timestamp: now.to_rfc3339(),
            week_ending: now.format("%Y-%m-%d").to_string(),
            total_assets: all_assets.len(),
            active_signals: signals.len(),
            signals,
            all_assets,
        }
    }

    /// Default local file name: `cot_report_YYYYMMDD.json`.
    pub fn default_file_name() -> String {
        format!("cot_report_{}.json", Local::now().format("%Y%m%d"))
    }

    /// Persist the report as pretty JSON using an atomic write (write to
    /// `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content =
            serde_json::to_string_pretty(self).context("failed to serialise report to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp report to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp report to {}", path.display()))?;

        info!(path = %path.display(), "report saved");
        Ok(())
    }

    /// Emit the end-of-run summary through the log.
    pub fn log_summary(&self) {
        info!(
            assets_analyzed = self.total_assets,
            active_signals = self.active_signals,
            "weekly analysis summary"
        );

        if self.signals.is_empty() {
            info!("no active signals this week");
            return;
        }

        for signal in &self.signals {
            info!(
                asset = %signal.asset,
                signal = %signal.signal,
                net_position = signal.net_position,
                "active signal"
            );
        }
    }
}
