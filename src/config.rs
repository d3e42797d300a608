// =============================================================================
// Monitor Configuration — JSON-file settings with atomic save
// =============================================================================
//
// Central configuration for the COT monitor: webhook target, the asset map
// (asset code -> CFTC contract identity) and the lookback windows for signal
// detection.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash.  All fields carry `#[serde(default)]` so that adding new fields
// never breaks loading an older config file.  A missing file is created with
// defaults on first run so the operator has something to edit.
//
// =============================================================================

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Placeholder webhook URL shipped in the default config.  Delivery is
/// skipped while the config still points here.
pub const WEBHOOK_PLACEHOLDER: &str = "https://your-n8n-instance.com/webhook/cot-report";

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_webhook_url() -> String {
    WEBHOOK_PLACEHOLDER.to_string()
}

fn default_divergence_weeks() -> usize {
    52
}

fn default_extreme_weeks() -> usize {
    156
}

fn default_assets() -> BTreeMap<String, AssetConfig> {
    let mut assets = BTreeMap::new();
    assets.insert(
        "NQ".to_string(),
        AssetConfig::new("Nasdaq 100", "NASDAQ MINI", "209742"),
    );
    assets.insert(
        "SPX".to_string(),
        AssetConfig::new("S&P 500", "E-MINI S&P 500", "13874A"),
    );
    assets.insert(
        "BTC".to_string(),
        AssetConfig::new("Bitcoin", "BITCOIN", "133741"),
    );
    assets.insert(
        "ETH".to_string(),
        AssetConfig::new("Ethereum", "ETHER CASH SETTLED", "ETH"),
    );
    assets.insert(
        "EUR".to_string(),
        AssetConfig::new("Euro FX", "EURO FX", "099741"),
    );
    assets.insert(
        "USD".to_string(),
        AssetConfig::new("US Dollar Index", "USD INDEX", "098662"),
    );
    assets
}

// =============================================================================
// AssetConfig
// =============================================================================

/// Identity of one monitored futures contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Display name used in reports (e.g. "Nasdaq 100").
    pub name: String,

    /// Exact `contract_market_name` value in the CFTC dataset.
    pub contract_name: String,

    /// CFTC contract market code (kept for reference / cross-checking).
    pub cftc_code: String,
}

impl AssetConfig {
    pub fn new(
        name: impl Into<String>,
        contract_name: impl Into<String>,
        cftc_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            contract_name: contract_name.into(),
            cftc_code: cftc_code.into(),
        }
    }
}

// =============================================================================
// LookbackConfig
// =============================================================================

/// Rolling-window sizes (in weeks) for signal detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookbackConfig {
    /// Divergence window.  Must be even and >= 52 so the half-window split
    /// is well-defined; invalid values are reset to the default on load.
    #[serde(default = "default_divergence_weeks")]
    pub divergence_weeks: usize,

    /// Extreme-positioning window.  Also used as the fetch limit, so it must
    /// be at least 2 (the minimum evaluable series length).
    #[serde(default = "default_extreme_weeks")]
    pub extreme_weeks: usize,
}

impl Default for LookbackConfig {
    fn default() -> Self {
        Self {
            divergence_weeks: default_divergence_weeks(),
            extreme_weeks: default_extreme_weeks(),
        }
    }
}

impl LookbackConfig {
    /// Half of the divergence window: the size of the "recent" and "older"
    /// sub-windows compared by the divergence detector.
    pub fn divergence_half(&self) -> usize {
        self.divergence_weeks / 2
    }

    /// Reset out-of-range window sizes to their defaults.
    ///
    /// The divergence window must be even (it is split exactly in half) and
    /// at least 52 weeks; the extreme window must cover at least 2 weeks.
    pub fn sanitize(&mut self) {
        if self.divergence_weeks < 52 || self.divergence_weeks % 2 != 0 {
            warn!(
                divergence_weeks = self.divergence_weeks,
                "invalid divergence window (must be even and >= 52), using default"
            );
            self.divergence_weeks = default_divergence_weeks();
        }
        if self.extreme_weeks < 2 {
            warn!(
                extreme_weeks = self.extreme_weeks,
                "invalid extreme window (must be >= 2), using default"
            );
            self.extreme_weeks = default_extreme_weeks();
        }
    }
}

// =============================================================================
// MonitorConfig
// =============================================================================

/// Top-level configuration for the COT monitor.
///
/// Every field has a serde default so that older JSON files missing new fields
/// will still deserialise correctly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Webhook endpoint the weekly report is POSTed to.
    #[serde(default = "default_webhook_url")]
    pub n8n_webhook_url: String,

    /// Monitored assets, keyed by short asset code.
    #[serde(default = "default_assets")]
    pub assets: BTreeMap<String, AssetConfig>,

    /// Signal-detection window sizes.
    #[serde(default)]
    pub lookback: LookbackConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            n8n_webhook_url: default_webhook_url(),
            assets: default_assets(),
            lookback: LookbackConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let mut config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;

        config.lookback.sanitize();

        info!(
            path = %path.display(),
            assets = config.assets.len(),
            divergence_weeks = config.lookback.divergence_weeks,
            extreme_weeks = config.lookback.extreme_weeks,
            "config loaded"
        );

        Ok(config)
    }

    /// Load `path`, or create it with defaults when it does not exist.
    ///
    /// A file that exists but fails to load falls back to defaults with a
    /// warning and is left untouched for the operator to fix.
    pub fn load_or_init(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            let config = Self::default();
            match config.save(path) {
                Ok(()) => info!(
                    path = %path.display(),
                    "config file created with defaults, please update the webhook URL"
                ),
                Err(e) => warn!(error = %e, "failed to write default config file"),
            }
            return config;
        }

        Self::load(path).unwrap_or_else(|e| {
            warn!(error = %e, "failed to load config, using defaults");
            Self::default()
        })
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content =
            serde_json::to_string_pretty(self).context("failed to serialise config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        Ok(())
    }

    /// True once the operator has replaced the placeholder webhook URL.
    pub fn webhook_configured(&self) -> bool {
        !self.n8n_webhook_url.is_empty() && !self.n8n_webhook_url.contains("your-n8n-instance")
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = MonitorConfig::default();
        assert_eq!(cfg.assets.len(), 6);
        assert_eq!(cfg.assets["NQ"].contract_name, "NASDAQ MINI");
        assert_eq!(cfg.assets["SPX"].cftc_code, "13874A");
        assert_eq!(cfg.assets["BTC"].name, "Bitcoin");
        assert_eq!(cfg.lookback.divergence_weeks, 52);
        assert_eq!(cfg.lookback.extreme_weeks, 156);
        assert_eq!(cfg.lookback.divergence_half(), 26);
        assert!(!cfg.webhook_configured());
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: MonitorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, MonitorConfig::default());
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "n8n_webhook_url": "https://hooks.example.com/cot" }"#;
        let cfg: MonitorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.n8n_webhook_url, "https://hooks.example.com/cot");
        assert!(cfg.webhook_configured());
        assert_eq!(cfg.assets.len(), 6);
        assert_eq!(cfg.lookback.extreme_weeks, 156);
    }

    #[test]
    fn partial_lookback_fills_defaults() {
        let json = r#"{ "lookback": { "divergence_weeks": 104 } }"#;
        let cfg: MonitorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.lookback.divergence_weeks, 104);
        assert_eq!(cfg.lookback.divergence_half(), 52);
        assert_eq!(cfg.lookback.extreme_weeks, 156);
    }

    #[test]
    fn roundtrip_serialisation() {
        let cfg = MonitorConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let cfg2: MonitorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, cfg2);
    }

    #[test]
    fn sanitize_rejects_odd_divergence_window() {
        let mut lookback = LookbackConfig {
            divergence_weeks: 53,
            extreme_weeks: 156,
        };
        lookback.sanitize();
        assert_eq!(lookback.divergence_weeks, 52);
    }

    #[test]
    fn sanitize_rejects_short_windows() {
        let mut lookback = LookbackConfig {
            divergence_weeks: 26,
            extreme_weeks: 1,
        };
        lookback.sanitize();
        assert_eq!(lookback.divergence_weeks, 52);
        assert_eq!(lookback.extreme_weeks, 156);
    }

    #[test]
    fn sanitize_keeps_valid_windows() {
        let mut lookback = LookbackConfig {
            divergence_weeks: 104,
            extreme_weeks: 260,
        };
        lookback.sanitize();
        assert_eq!(lookback.divergence_weeks, 104);
        assert_eq!(lookback.extreme_weeks, 260);
    }

    #[test]
    fn placeholder_webhook_is_not_configured() {
        let mut cfg = MonitorConfig::default();
        assert!(!cfg.webhook_configured());
        cfg.n8n_webhook_url = String::new();
        assert!(!cfg.webhook_configured());
        cfg.n8n_webhook_url = "https://hooks.example.com/cot".to_string();
        assert!(cfg.webhook_configured());
    }
}
