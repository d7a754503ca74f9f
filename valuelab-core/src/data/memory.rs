//! In-memory provider for offline use and tests.

use super::provider::{DataError, MetadataProvider, PriceSeriesProvider, TickerInfo};
use crate::domain::{DatedValues, Interval, PriceSeries};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Serves prices and metadata registered up front.
///
/// The interval argument is ignored: each symbol has exactly one stored
/// series, already sampled at whatever granularity the caller chose.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    prices: HashMap<String, PriceSeries>,
    info: Option<HashMap<String, TickerInfo>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a price series under its own symbol.
    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.prices.insert(series.symbol().to_string(), series);
        self
    }

    /// Register metadata for a symbol. Until the first call, metadata
    /// lookups fail as if the source were unavailable.
    pub fn with_info(mut self, symbol: impl Into<String>, info: TickerInfo) -> Self {
        self.info
            .get_or_insert_with(HashMap::new)
            .insert(symbol.into(), info);
        self
    }
}

impl PriceSeriesProvider for InMemoryProvider {
    fn name(&self) -> &str {
        "in_memory"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
        _interval: Interval,
    ) -> Result<PriceSeries, DataError> {
        let no_data = || DataError::NoData {
            symbol: symbol.to_string(),
            start,
            end,
        };
        let series = self.prices.get(symbol).ok_or_else(no_data)?;
        let window = series.between(start, end);
        if window.is_empty() {
            return Err(no_data());
        }
        Ok(window)
    }
}

impl MetadataProvider for InMemoryProvider {
    fn name(&self) -> &str {
        "in_memory"
    }

    fn info(&self, symbol: &str) -> Result<TickerInfo, DataError> {
        let Some(info) = &self.info else {
            return Err(DataError::ProviderUnavailable(
                "no metadata registered".into(),
            ));
        };
        Ok(info.get(symbol).cloned().unwrap_or_default())
    }
}
