// =============================================================================
// Divergence Detector — Higher-low / lower-high positioning reversals
// =============================================================================
//
// Splits the divergence window into two equal halves and compares their
// extremes against the latest reading:
//
//   bullish: the newest half's minimum sits above the older half's minimum
//            (hedge funds forming a higher low) while the current week is
//            still below the window's oldest baseline — an early contrarian
//            buy signal.
//   bearish: the mirror image — lower high while the current week is still
//            above the baseline.
//
// The half size is derived from the configured window (`window_weeks / 2`).
// A window with fewer usable records than `window_weeks` cannot be split and
// yields no signal; same for a malformed (odd or sub-2) window size, which
// the config layer normally rules out before we get here.

use crate::types::PositionRecord;

/// Divergence flags for the most recent week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DivergenceFlags {
    /// Higher low forming while the latest reading is below the baseline.
    pub bullish_divergence: bool,

    /// Lower high forming while the latest reading is above the baseline.
    pub bearish_divergence: bool,
}

/// Detect positioning divergences over the most recent `window_weeks` records.
pub fn detect_divergence(series: &[PositionRecord], window_weeks: usize) -> DivergenceFlags {
    let half = window_weeks / 2;
    if half == 0 || window_weeks % 2 != 0 || series.len() < window_weeks {
        return DivergenceFlags::default();
    }

    let window = &series[..window_weeks];
    let recent = &window[..half];
    let older = &window[half..2 * half];

    // Oldest record in the window anchors the comparison.
    let baseline = window[window_weeks - 1].hf_net;
    let current = window[0].hf_net;

    let recent_low = min_net(recent);
    let older_low = min_net(older);
    let recent_high = max_net(recent);
    let older_high = max_net(older);

    DivergenceFlags {
        bullish_divergence: recent_low > older_low && current < baseline,
        bearish_divergence: recent_high < older_high && current > baseline,
    }
}

fn min_net(records: &[PositionRecord]) -> f64 {
    records.iter().fold(f64::INFINITY, |m, r| m.min(r.hf_net))
}

fn max_net(records: &[PositionRecord]) -> f64 {
    records
        .iter()
        .fold(f64::NEG_INFINITY, |m, r| m.max(r.hf_net))
}
