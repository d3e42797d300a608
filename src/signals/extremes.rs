// =============================================================================
// Extreme Tracker — Rolling positioning extremes over a lookback window
// =============================================================================
//
// Extreme one-sided hedge fund positioning is a contrarian indicator: when the
// smart money is at its most bearish net position of the window, there is
// nobody left to sell (contrarian buy), and vice versa.
//
// The extremum is identified positionally: the current week is flagged when no
// other record in the window sits strictly beyond it.  This is equivalent to
// `current == min/max` without comparing derived floats for equality.

use crate::types::PositionRecord;

/// Extreme-positioning flags for the most recent week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtremeFlags {
    /// Current net is the window minimum: hedge funds at max bearish,
    /// contrarian buy.
    pub extreme_bullish: bool,

    /// Current net is the window maximum: hedge funds at max bullish,
    /// contrarian sell.
    pub extreme_bearish: bool,
}

/// Compare the current week's net position against the most recent
/// `window_weeks` records (clipped to the series length).
///
/// An empty series returns both flags false; callers are expected to have
/// already short-circuited series shorter than 2 records.
pub fn track_extremes(series: &[PositionRecord], window_weeks: usize) -> ExtremeFlags {
    let window = &series[..window_weeks.min(series.len())];

    let current = match series.first() {
        Some(record) => record.hf_net,
        None => return ExtremeFlags::default(),
    };

    ExtremeFlags {
        extreme_bullish: !window.iter().any(|r| r.hf_net < current),
        extreme_bearish: !window.iter().any(|r| r.hf_net > current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(nets: &[f64]) -> Vec<PositionRecord> {
        nets.iter()
            .enumerate()
            .map(|(i, &net)| PositionRecord {
                date: format!("week-{i}"),
                hf_long: net.max(0.0),
                hf_short: (-net).max(0.0),
                hf_net: net,
                retail_net: 0.0,
            })
            .collect()
    }

    #[test]
    fn empty_series_no_flags() {
        let flags = track_extremes(&[], 156);
        assert!(!flags.extreme_bullish);
        assert!(!flags.extreme_bearish);
    }

    #[test]
    fn current_at_window_minimum_is_extreme_bullish() {
        let flags = track_extremes(&series(&[-500.0, -100.0, 200.0, 350.0]), 156);
        assert!(flags.extreme_bullish);
        assert!(!flags.extreme_bearish);
    }

    #[test]
    fn current_at_window_maximum_is_extreme_bearish() {
        // 156-week series where the current week equals the maximum net
        // position of the whole window.
        let mut nets: Vec<f64> = (0..155).map(|i| (i % 40) as f64 * 100.0 - 2000.0).collect();
        nets.insert(0, 5000.0);
        assert_eq!(nets.len(), 156);

        let flags = track_extremes(&series(&nets), 156);
        assert!(flags.extreme_bearish);
        assert!(!flags.extreme_bullish);
    }

    #[test]
    fn mid_range_current_sets_no_flags() {
        let flags = track_extremes(&series(&[100.0, -500.0, 700.0]), 156);
        assert!(!flags.extreme_bullish);
        assert!(!flags.extreme_bearish);
    }

    #[test]
    fn window_clips_to_series_length() {
        // Current is only the minimum of the last 2 weeks; the older week at
        // -900 is outside the window.
        let flags = track_extremes(&series(&[-100.0, 50.0, -900.0]), 2);
        assert!(flags.extreme_bullish);
        assert!(!flags.extreme_bearish);
    }

    #[test]
    fn flat_series_is_both_extremes() {
        // Every week identical: current is simultaneously the window min and
        // max; precedence in the classifier resolves the tie.
        let flags = track_extremes(&series(&[250.0, 250.0, 250.0]), 156);
        assert!(flags.extreme_bullish);
        assert!(flags.extreme_bearish);
    }

    #[test]
    fn duplicate_minimum_elsewhere_still_flags_current() {
        // The window minimum value also occurs at an older index; the current
        // week still counts as sitting at the extreme.
        let flags = track_extremes(&series(&[-300.0, 100.0, -300.0, 400.0]), 156);
        assert!(flags.extreme_bullish);
        assert!(!flags.extreme_bearish);
    }
}
