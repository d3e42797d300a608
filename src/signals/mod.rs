// =============================================================================
// Signal Detection Module
// =============================================================================
//
// The analytical core of the monitor.  A normalized positioning series flows
// through two independent detectors and a classifier:
//
//   1. Extreme Tracker      — is the current net position the most one-sided
//                             reading of the extreme window? (contrarian)
//   2. Divergence Detector  — is positioning forming a higher low / lower
//                             high against the latest reading? (reversal)
//   3. Classifier           — fixed precedence, exactly one status per pass
//
// Everything here is pure and synchronous: one series in, one `SignalResult`
// out, no shared state between calls or between assets.

pub mod classifier;
pub mod divergence;
pub mod extremes;
pub mod normalizer;

pub use classifier::classify;
pub use divergence::{detect_divergence, DivergenceFlags};
pub use extremes::{track_extremes, ExtremeFlags};
pub use normalizer::normalize;

use crate::config::LookbackConfig;
use crate::types::{PositionRecord, SignalResult};

/// Run the full detection pass over one asset's positioning series.
///
/// A series shorter than 2 weeks cannot be evaluated and resolves to the
/// `INSUFFICIENT_DATA` sentinel with every flag false — degenerate input
/// never surfaces as an error.
pub fn detect_signals(series: &[PositionRecord], lookback: &LookbackConfig) -> SignalResult {
    if series.len() < 2 {
        return SignalResult::insufficient_data(series.first());
    }

    let current = &series[0];

    let extremes = track_extremes(series, lookback.extreme_weeks);
    let divergence = detect_divergence(series, lookback.divergence_weeks);
    let status = classify(divergence, extremes);

    SignalResult {
        current_net: current.hf_net,
        hf_long: current.hf_long,
        hf_short: current.hf_short,
        date: Some(current.date.clone()),
        bullish_divergence: divergence.bullish_divergence,
        bearish_divergence: divergence.bearish_divergence,
        extreme_bullish: extremes.extreme_bullish,
        extreme_bearish: extremes.extreme_bearish,
        status,
    }
}
