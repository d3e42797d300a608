// =============================================================================
// Shared types used across the COT monitor
// =============================================================================

use serde::{Deserialize, Serialize};

/// One normalized week of COT positioning for a single contract.
///
/// Records are produced newest-first by the CFTC query (`$order` DESC) and
/// that order is preserved end-to-end: index 0 is always the most recent week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    /// Report date as published (YYYY-MM-DD).
    pub date: String,

    /// Leveraged-money (hedge fund) long contracts.
    pub hf_long: f64,

    /// Leveraged-money (hedge fund) short contracts.
    pub hf_short: f64,

    /// Hedge fund net position: `hf_long - hf_short`.
    pub hf_net: f64,

    /// Non-reportable (retail) net position.
    pub retail_net: f64,
}

/// Categorical outcome of one signal-detection pass.
///
/// Divergences outrank extremes: a divergence is an early-reversal pattern,
/// an extreme is only a crowding warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalStatus {
    BullishDivergence,
    BearishDivergence,
    ExtremeBullish,
    ExtremeBearish,
    Neutral,
    InsufficientData,
}

impl SignalStatus {
    /// True for any status worth reporting as an active signal.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Neutral | Self::InsufficientData)
    }
}

impl std::fmt::Display for SignalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BullishDivergence => write!(f, "BULLISH_DIVERGENCE"),
            Self::BearishDivergence => write!(f, "BEARISH_DIVERGENCE"),
            Self::ExtremeBullish => write!(f, "EXTREME_BULLISH"),
            Self::ExtremeBearish => write!(f, "EXTREME_BEARISH"),
            Self::Neutral => write!(f, "NEUTRAL"),
            Self::InsufficientData => write!(f, "INSUFFICIENT_DATA"),
        }
    }
}

/// Output of one signal-detection pass over a single contract's series.
///
/// Produced once per analysis run and never mutated afterwards. All fields are
/// populated at creation time; `date` is `None` only when the series was empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    /// Hedge fund net position of the most recent week.
    pub current_net: f64,

    /// Hedge fund long contracts of the most recent week.
    pub hf_long: f64,

    /// Hedge fund short contracts of the most recent week.
    pub hf_short: f64,

    /// Report date of the most recent week.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Hedge funds forming a higher low while the latest reading sits below
    /// the window baseline (contrarian buy).
    pub bullish_divergence: bool,

    /// Hedge funds forming a lower high while the latest reading sits above
    /// the window baseline (contrarian sell).
    pub bearish_divergence: bool,

    /// Current net is the most bearish reading of the extreme window
    /// (contrarian buy).
    pub extreme_bullish: bool,

    /// Current net is the most bullish reading of the extreme window
    /// (contrarian sell).
    pub extreme_bearish: bool,

    /// Resolved status label (exactly one per pass).
    pub status: SignalStatus,
}

impl SignalResult {
    /// Sentinel result for a series too short to evaluate.
    ///
    /// When a most-recent record exists its fields still flow through, so
    /// `current_net` mirrors the head of the series even in the degenerate
    /// case; all signal flags stay false.
    pub fn insufficient_data(head: Option<&PositionRecord>) -> Self {
        Self {
            current_net: head.map(|r| r.hf_net).unwrap_or(0.0),
            hf_long: head.map(|r| r.hf_long).unwrap_or(0.0),
            hf_short: head.map(|r| r.hf_short).unwrap_or(0.0),
            date: head.map(|r| r.date.clone()),
            bullish_divergence: false,
            bearish_divergence: false,
            extreme_bullish: false,
            extreme_bearish: false,
            status: SignalStatus::InsufficientData,
        }
    }
}

/// One analyzed asset: the configured identity plus its signal result.
#[derive(Debug, Clone, Serialize)]
pub struct AssetAnalysis {
    /// Short asset code from the config map (e.g. "NQ").
    pub asset_code: String,

    /// Display name (e.g. "Nasdaq 100").
    pub asset_name: String,

    /// Signal-detection output for this asset.
    #[serde(flatten)]
    pub signals: SignalResult,
}
