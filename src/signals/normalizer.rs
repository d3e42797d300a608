// =============================================================================
// Normalizer — Raw CFTC rows to a typed positioning series
// =============================================================================
//
// Socrata serialises every numeric column as an optional string, so the raw
// rows are loosely typed.  This is the single place where that looseness is
// resolved:
//
//   - a row without a report date is dropped (logged at debug, never an error)
//   - absent or unparsable quantities coerce to 0.0
//   - surviving rows keep their original relative order (newest first)
//
// Pure function, no side effects beyond the debug log.

use tracing::debug;

use crate::cftc::RawPositioningRecord;
use crate::types::PositionRecord;

/// Convert raw CFTC rows into a normalized positioning series.
pub fn normalize(raw: &[RawPositioningRecord]) -> Vec<PositionRecord> {
    let mut series = Vec::with_capacity(raw.len());

    for row in raw {
        let date = match &row.report_date_as_yyyy_mm_dd {
            Some(date) if !date.is_empty() => date.clone(),
            _ => {
                debug!("dropping positioning row without report date");
                continue;
            }
        };

        let hf_long = coerce(&row.lev_money_positions_long);
        let hf_short = coerce(&row.lev_money_positions_short);
        let retail_long = coerce(&row.nonrept_positions_long_all);
        let retail_short = coerce(&row.nonrept_positions_short_all);

        series.push(PositionRecord {
            date,
            hf_long,
            hf_short,
            hf_net: hf_long - hf_short,
            retail_net: retail_long - retail_short,
        });
    }

    series
}

/// Parse an optional Socrata decimal string, treating absence and garbage
/// both as zero.
fn coerce(field: &Option<String>) -> f64 {
    field
        .as_deref()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0.0)
}
