// =============================================================================
// Asset Monitor — Per-asset fetch → normalize → detect pipeline
// =============================================================================
//
// One call analyzes one configured asset end-to-end.  Failures are per-asset:
// a fetch error or an all-invalid response skips that asset with a warning
// and never aborts the run.  Analyses share nothing, so the caller is free to
// run them concurrently.

use tracing::{info, warn};

use crate::cftc::CftcClient;
use crate::config::{AssetConfig, LookbackConfig};
use crate::signals::{detect_signals, normalize};
use crate::types::AssetAnalysis;

/// Fetch and analyze a single asset.
///
/// Returns `None` when the fetch fails or yields no usable records; the
/// caller drops the asset from this week's report.
pub async fn analyze_asset(
    client: &CftcClient,
    code: &str,
    asset: &AssetConfig,
    lookback: &LookbackConfig,
) -> Option<AssetAnalysis> {
    info!(asset = code, name = %asset.name, "analyzing asset");

    let raw = match client
        .fetch_positioning(&asset.contract_name, lookback.extreme_weeks)
        .await
    {
        Ok(raw) => raw,
        Err(e) => {
            warn!(asset = code, error = %e, "fetch failed, skipping asset");
            return None;
        }
    };

    let series = normalize(&raw);
    if series.is_empty() {
        warn!(asset = code, "no valid positioning data, skipping asset");
        return None;
    }

    let signals = detect_signals(&series, lookback);

    info!(
        asset = code,
        status = %signals.status,
        hf_net = signals.current_net,
        "analysis complete"
    );

    Some(AssetAnalysis {
        asset_code: code.to_string(),
        asset_name: asset.name.clone(),
        signals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cftc::RawPositioningRecord;
    use crate::types::SignalStatus;

    fn raw_row(date: &str, long: &str, short: &str) -> RawPositioningRecord {
        RawPositioningRecord {
            report_date_as_yyyy_mm_dd: Some(date.to_string()),
            lev_money_positions_long: Some(long.to_string()),
            lev_money_positions_short: Some(short.to_string()),
            nonrept_positions_long_all: None,
            nonrept_positions_short_all: None,
        }
    }

    #[test]
    fn empty_raw_input_resolves_to_insufficient_data() {
        let result = detect_signals(&normalize(&[]), &LookbackConfig::default());
        assert_eq!(result.status, SignalStatus::InsufficientData);
        assert!(!result.bullish_divergence);
        assert!(!result.bearish_divergence);
        assert!(!result.extreme_bullish);
        assert!(!result.extreme_bearish);
    }

    #[test]
    fn all_dateless_rows_resolve_to_insufficient_data() {
        let raw = vec![RawPositioningRecord::default(), RawPositioningRecord::default()];
        let result = detect_signals(&normalize(&raw), &LookbackConfig::default());
        assert_eq!(result.status, SignalStatus::InsufficientData);
    }

    #[test]
    fn raw_rows_flow_through_to_a_classified_result() {
        // Current week at the window minimum: contrarian buy.
        let raw = vec![
            raw_row("2025-07-29", "100", "900"),
            raw_row("2025-07-22", "500", "400"),
            raw_row("2025-07-15", "600", "300"),
        ];
        let result = detect_signals(&normalize(&raw), &LookbackConfig::default());
        assert_eq!(result.current_net, -800.0);
        assert_eq!(result.date.as_deref(), Some("2025-07-29"));
        assert!(result.extreme_bullish);
        assert_eq!(result.status, SignalStatus::ExtremeBullish);
    }
}
