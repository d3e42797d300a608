// =============================================================================
// CFTC Socrata API Client — Weekly COT positioning fetch
// =============================================================================
//
// The public reporting endpoint needs no authentication.  Queries use the
// Socrata SoQL parameters: `$select` limits the response to the five columns
// we consume, `$where` filters by exact contract market name, `$order` sorts
// newest-first (the series-order invariant the whole pipeline relies on),
// and `$limit` caps the history at the extreme-lookback window.
//
// Socrata serialises every numeric column as a string; the raw record keeps
// them as `Option<String>` and the normalizer owns the coercion policy.
// =============================================================================

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// CFTC "Traders in Financial Futures" (futures only) dataset endpoint.
const CFTC_API_URL: &str = "https://publicreporting.cftc.gov/resource/gpe5-46if.json";

/// Columns requested from the dataset, in `$select` order.
const SELECT_COLUMNS: &str = "report_date_as_yyyy_mm_dd,contract_market_name,\
    lev_money_positions_long,lev_money_positions_short,\
    nonrept_positions_long_all,nonrept_positions_short_all";

/// One row of the Socrata response, exactly as it arrives on the wire.
///
/// Every field is optional: the dataset occasionally omits columns, and the
/// normalizer decides what each absence means (a missing date drops the row,
/// a missing quantity coerces to zero).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPositioningRecord {
    /// Report date (YYYY-MM-DD).  Mandatory downstream.
    pub report_date_as_yyyy_mm_dd: Option<String>,

    /// Leveraged-money long contracts, as a decimal string.
    pub lev_money_positions_long: Option<String>,

    /// Leveraged-money short contracts, as a decimal string.
    pub lev_money_positions_short: Option<String>,

    /// Non-reportable long contracts, as a decimal string.
    pub nonrept_positions_long_all: Option<String>,

    /// Non-reportable short contracts, as a decimal string.
    pub nonrept_positions_short_all: Option<String>,
}

/// Client for the CFTC public reporting Socrata API.
#[derive(Clone)]
pub struct CftcClient {
    base_url: String,
    client: reqwest::Client,
}

impl CftcClient {
    /// Create a new client with a default HTTP client (10 s timeout).
    pub fn new() -> Self {
        Self {
            base_url: CFTC_API_URL.to_string(),
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("failed to build reqwest client for CftcClient"),
        }
    }

    /// Create a client that re-uses an existing HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            base_url: CFTC_API_URL.to_string(),
            client,
        }
    }

    /// Fetch up to `limit` weekly positioning rows for `contract_name`,
    /// newest first.
    pub async fn fetch_positioning(
        &self,
        contract_name: &str,
        limit: usize,
    ) -> Result<Vec<RawPositioningRecord>> {
        let params = [
            ("$select", SELECT_COLUMNS.to_string()),
            (
                "$where",
                format!("contract_market_name='{contract_name}'"),
            ),
            ("$order", "report_date_as_yyyy_mm_dd DESC".to_string()),
            ("$limit", limit.to_string()),
        ];

        let resp = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .with_context(|| format!("GET COT positioning for {contract_name}"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("CFTC API returned {status} for {contract_name}: {body}");
        }

        let rows: Vec<RawPositioningRecord> = resp
            .json()
            .await
            .with_context(|| format!("failed to parse COT response for {contract_name}"))?;

        debug!(
            contract = contract_name,
            weeks = rows.len(),
            "COT positioning fetched"
        );

        Ok(rows)
    }
}

impl Default for CftcClient {
    fn default() -> Self {
        Self::new()
    }
}
