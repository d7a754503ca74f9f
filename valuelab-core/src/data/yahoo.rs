//! Yahoo Finance adapter.
//!
//! Prices come from the v8 chart API, metadata from the v10 quoteSummary API.
//! One blocking request per call: no retry, no backoff, no caching. Callers
//! that need those policies wrap the provider.
//!
//! Yahoo Finance has no official API and is subject to unannounced format changes.

use super::provider::{DataError, MetadataProvider, PriceSeriesProvider, TickerInfo};
use crate::domain::{DatedValues, Interval, Observation, PriceSeries};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const CHART_BASE: &str = "https://query2.finance.yahoo.com/v8/finance/chart";
const SUMMARY_BASE: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";
const SUMMARY_MODULES: &str = "summaryDetail,defaultKeyStatistics";

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Yahoo Finance v10 quoteSummary API response.
#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: SummaryResult,
}

#[derive(Debug, Deserialize)]
struct SummaryResult {
    result: Option<Vec<serde_json::Map<String, Value>>>,
    error: Option<ApiError>,
}

/// Yahoo Finance provider for prices and ticker metadata.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
}

impl YahooProvider {
    pub fn new() -> Result<Self, DataError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| {
                DataError::ProviderUnavailable(format!("failed to build HTTP client: {e}"))
            })?;
        Ok(Self { client })
    }

    /// Build the chart API URL for a symbol, date range and interval.
    fn chart_url(
        symbol: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
        interval: Interval,
    ) -> String {
        let start_ts = start.and_hms_opt(0, 0, 0).map_or(0, |dt| dt.and_utc().timestamp());
        let end_ts = end
            .and_then(|e| e.and_hms_opt(23, 59, 59))
            .map_or_else(|| Utc::now().timestamp(), |dt| dt.and_utc().timestamp());
        format!(
            "{CHART_BASE}/{symbol}?period1={start_ts}&period2={end_ts}\
             &interval={interval}&includeAdjustedClose=true"
        )
    }

    fn summary_url(symbol: &str) -> String {
        format!("{SUMMARY_BASE}/{symbol}?modules={SUMMARY_MODULES}")
    }

    /// Parse the chart API response into a price series.
    ///
    /// The adjusted close column is used when present, the raw close otherwise.
    /// Missing prices become NaN and are dropped downstream.
    fn parse_chart(
        symbol: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
        resp: ChartResponse,
    ) -> Result<PriceSeries, DataError> {
        let no_data = || DataError::NoData {
            symbol: symbol.to_string(),
            start,
            end,
        };

        let result = resp.chart.result.ok_or_else(|| match resp.chart.error {
            Some(err) if err.code == "Not Found" => DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            },
            Some(err) if is_empty_range(&err) => no_data(),
            Some(err) => {
                DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
            }
            None => DataError::ResponseFormatChanged("empty result with no error".into()),
        })?;

        let Some(data) = result.into_iter().next() else {
            return Err(no_data());
        };
        let Some(timestamps) = data.timestamp else {
            return Err(no_data());
        };

        let adj_closes = data
            .indicators
            .adjclose
            .and_then(|v| v.into_iter().next())
            .map(|a| a.adjclose)
            .filter(|adj| !adj.is_empty());
        let prices = match adj_closes {
            Some(adj) => adj,
            None => data
                .indicators
                .quote
                .into_iter()
                .next()
                .map(|q| q.close)
                .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?,
        };

        let mut points = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;
            let price = prices.get(i).copied().flatten().unwrap_or(f64::NAN);
            points.push(Observation::new(date, price));
        }

        if points.is_empty() {
            return Err(no_data());
        }
        Ok(PriceSeries::from_points(symbol, points))
    }

    /// Flatten the quoteSummary modules into one key/value map.
    ///
    /// Yahoo wraps numbers as `{"raw": 1.23, "fmt": "1.23"}`; those become the raw value.
    fn parse_summary(symbol: &str, resp: SummaryResponse) -> Result<TickerInfo, DataError> {
        let result = resp.quote_summary.result.ok_or_else(|| match resp.quote_summary.error {
            Some(err) if err.code == "Not Found" => DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            },
            Some(err) => {
                DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
            }
            None => DataError::ResponseFormatChanged("empty summary with no error".into()),
        })?;

        let mut info = TickerInfo::new();
        for modules in result {
            for (_, module) in modules {
                let Value::Object(fields) = module else {
                    continue;
                };
                for (key, value) in fields {
                    info.insert(key, unwrap_raw(value));
                }
            }
        }
        Ok(info)
    }

    fn get(&self, url: &str, symbol: &str) -> Result<reqwest::blocking::Response, DataError> {
        let resp = self.client.get(url).send().map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                DataError::NetworkUnreachable(e.to_string())
            } else {
                DataError::Other(e.to_string())
            }
        })?;

        let status = resp.status();
        // The body of a 400 carries the API error; let the parser classify it.
        if status == reqwest::StatusCode::BAD_REQUEST {
            return Ok(resp);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        if status == reqwest::StatusCode::FORBIDDEN
            || status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::TOO_MANY_REQUESTS
        {
            return Err(DataError::ProviderUnavailable(format!(
                "HTTP {status} for {symbol}"
            )));
        }
        if !status.is_success() {
            return Err(DataError::Other(format!("HTTP {status} for {symbol}")));
        }
        Ok(resp)
    }
}

/// Yahoo answers a valid symbol with no bars in range with a 400 and this error.
fn is_empty_range(err: &ApiError) -> bool {
    err.code == "Bad Request" && err.description.starts_with("Data doesn't exist")
}

fn unwrap_raw(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("raw") => {
            map.remove("raw").unwrap_or(Value::Null)
        }
        // An empty object is how Yahoo reports a missing number.
        Value::Object(map) if map.is_empty() => Value::Null,
        other => other,
    }
}

impl PriceSeriesProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
        interval: Interval,
    ) -> Result<PriceSeries, DataError> {
        let url = Self::chart_url(symbol, start, end, interval);
        debug!(symbol, %start, ?end, %interval, "fetching price history");

        let chart: ChartResponse = self.get(&url, symbol)?.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse chart for {symbol}: {e}"))
        })?;
        let series = Self::parse_chart(symbol, start, end, chart)?;
        debug!(symbol, points = series.len(), "price history fetched");
        Ok(series)
    }
}

impl MetadataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn info(&self, symbol: &str) -> Result<TickerInfo, DataError> {
        let url = Self::summary_url(symbol);
        let summary: SummaryResponse = self.get(&url, symbol)?.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse summary for {symbol}: {e}"))
        })?;
        Self::parse_summary(symbol, summary)
    }
}
