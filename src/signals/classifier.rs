// =============================================================================
// Signal Classifier — Fixed-precedence status resolution
// =============================================================================
//
// Collapses the four boolean flags into exactly one status label.  Precedence
// order: bullish divergence, bearish divergence, extreme bullish, extreme
// bearish, neutral.  Divergences outrank extremes because they carry timing
// information; an extreme alone only says positioning is crowded.

use crate::signals::divergence::DivergenceFlags;
use crate::signals::extremes::ExtremeFlags;
use crate::types::SignalStatus;

/// Resolve detector outputs into a single status label.
pub fn classify(divergence: DivergenceFlags, extremes: ExtremeFlags) -> SignalStatus {
    if divergence.bullish_divergence {
        SignalStatus::BullishDivergence
    } else if divergence.bearish_divergence {
        SignalStatus::BearishDivergence
    } else if extremes.extreme_bullish {
        SignalStatus::ExtremeBullish
    } else if extremes.extreme_bearish {
        SignalStatus::ExtremeBearish
    } else {
        SignalStatus::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn divergence(bullish: bool, bearish: bool) -> DivergenceFlags {
        DivergenceFlags {
            bullish_divergence: bullish,
            bearish_divergence: bearish,
        }
    }

    fn extremes(bullish: bool, bearish: bool) -> ExtremeFlags {
        ExtremeFlags {
            extreme_bullish: bullish,
            extreme_bearish: bearish,
        }
    }

    #[test]
    fn no_flags_is_neutral() {
        assert_eq!(
            classify(divergence(false, false), extremes(false, false)),
            SignalStatus::Neutral
        );
    }

    #[test]
    fn bullish_divergence_outranks_everything() {
        assert_eq!(
            classify(divergence(true, true), extremes(true, true)),
            SignalStatus::BullishDivergence
        );
    }

    #[test]
    fn bearish_divergence_outranks_extremes() {
        assert_eq!(
            classify(divergence(false, true), extremes(true, true)),
            SignalStatus::BearishDivergence
        );
    }

    #[test]
    fn extreme_bullish_outranks_extreme_bearish() {
        // A flat window sets both extreme flags; precedence breaks the tie.
        assert_eq!(
            classify(divergence(false, false), extremes(true, true)),
            SignalStatus::ExtremeBullish
        );
    }

    #[test]
    fn extreme_bearish_when_nothing_else_fires() {
        assert_eq!(
            classify(divergence(false, false), extremes(false, true)),
            SignalStatus::ExtremeBearish
        );
    }

    #[test]
    fn exactly_one_status_per_flag_combination() {
        // Exhaustive sweep: every combination resolves to one defined label.
        for bits in 0..16u8 {
            let status = classify(
                divergence(bits & 1 != 0, bits & 2 != 0),
                extremes(bits & 4 != 0, bits & 8 != 0),
            );
            assert_ne!(status, SignalStatus::InsufficientData);
        }
    }
}
