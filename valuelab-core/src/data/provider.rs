//! Provider traits and structured error types.
//!
//! The analytics never talk to a data vendor directly. They go through these
//! traits so a networked adapter can be wired in for production and an
//! in-memory one for tests.

use crate::domain::{Interval, PriceSeries};
use chrono::NaiveDate;
use thiserror::Error;

/// Loosely typed metadata for a ticker, as returned by a metadata source.
pub type TickerInfo = serde_json::Map<String, serde_json::Value>;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("no data returned for {symbol} between {start} and {}", display_end(.end))]
    NoData {
        symbol: String,
        start: NaiveDate,
        end: Option<NaiveDate>,
    },

    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("data error: {0}")]
    Other(String),
}

fn display_end(end: &Option<NaiveDate>) -> String {
    end.map_or_else(|| "latest".to_string(), |d| d.to_string())
}

/// Source of historical prices.
///
/// Implementations return "the" price per date: the dividend/split adjusted
/// close when the source has one, otherwise the raw close. An empty result
/// for the requested range must be reported as [`DataError::NoData`].
pub trait PriceSeriesProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch prices for `symbol` from `start` (inclusive) through `end`
    /// (inclusive, or the latest available when `None`).
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
        interval: Interval,
    ) -> Result<PriceSeries, DataError>;
}

/// Source of per-ticker metadata (beta, market cap, ...).
pub trait MetadataProvider: Send + Sync {
    fn name(&self) -> &str;

    fn info(&self, symbol: &str) -> Result<TickerInfo, DataError>;
}
