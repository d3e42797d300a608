// =============================================================================
// CFTC Data Access Module
// =============================================================================
//
// Thin client for the CFTC public reporting Socrata API.  The dataset exposes
// the weekly "Traders in Financial Futures" disclosures; we pull the
// leveraged-money (hedge fund) and non-reportable (retail) position columns
// for each configured contract.

pub mod client;

pub use client::{CftcClient, RawPositioningRecord};
