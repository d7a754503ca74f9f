//! Regression beta of a stock against a market index.
//!
//! `beta = Cov(R_stock, R_market) / Var(R_market)`, the OLS slope of stock
//! returns on market returns. Both moments use the sample (N-1) denominator.

use super::returns::compute_returns;
use crate::config::BetaDefaults;
use crate::data::{align_pair, PriceSeriesProvider};
use crate::domain::{Interval, PriceSeries};
use crate::error::AnalyticsError;
use chrono::NaiveDate;
use tracing::debug;

/// Market index used when the caller does not name one (S&P 500).
pub const DEFAULT_MARKET_TICKER: &str = "^GSPC";

/// Fewest overlapping prices accepted before regressing.
pub const MIN_ALIGNED_OBSERVATIONS: usize = 6;

/// Parameters for a provider-backed beta estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct BetaRequest {
    pub ticker: String,
    pub market_ticker: String,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub interval: Interval,
}

impl BetaRequest {
    /// Monthly beta against the S&P 500 from `start` through the latest data.
    pub fn new(ticker: impl Into<String>, start: NaiveDate) -> Self {
        Self {
            ticker: ticker.into(),
            market_ticker: DEFAULT_MARKET_TICKER.to_string(),
            start,
            end: None,
            interval: Interval::Monthly,
        }
    }

    /// Build a request from configured defaults.
    pub fn from_config(ticker: impl Into<String>, defaults: &BetaDefaults) -> Self {
        Self {
            ticker: ticker.into(),
            market_ticker: defaults.market_ticker.clone(),
            start: defaults.start_date,
            end: None,
            interval: defaults.interval,
        }
    }

    pub fn with_market(mut self, market_ticker: impl Into<String>) -> Self {
        self.market_ticker = market_ticker.into();
        self
    }

    pub fn with_end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }
}

/// Fetch both series from `provider` and regress stock returns on market returns.
///
/// Provider failures (including no data) surface as [`AnalyticsError::Data`].
pub fn compute_beta(
    provider: &dyn PriceSeriesProvider,
    request: &BetaRequest,
) -> Result<f64, AnalyticsError> {
    let stock = provider.fetch(&request.ticker, request.start, request.end, request.interval)?;
    let market = provider.fetch(
        &request.market_ticker,
        request.start,
        request.end,
        request.interval,
    )?;
    let beta = beta_from_prices(&stock, &market)?;
    debug!(
        ticker = %request.ticker,
        market = %request.market_ticker,
        provider = provider.name(),
        beta,
        "computed regression beta"
    );
    Ok(beta)
}

/// Beta from two price series already in hand.
///
/// Prices are inner-joined on date first; fewer than
/// [`MIN_ALIGNED_OBSERVATIONS`] common prices is an error. Returns are then
/// taken on each side and re-joined, dropping any undefined pair.
pub fn beta_from_prices(
    stock: &PriceSeries,
    market: &PriceSeries,
) -> Result<f64, AnalyticsError> {
    let prices = align_pair(stock, market);
    if prices.len() < MIN_ALIGNED_OBSERVATIONS {
        return Err(AnalyticsError::InsufficientData {
            required: MIN_ALIGNED_OBSERVATIONS,
            actual: prices.len(),
        });
    }

    let stock_returns = compute_returns(&prices.left_series());
    let market_returns = compute_returns(&prices.right_series());
    let returns = align_pair(&stock_returns, &market_returns);
    debug!(
        prices = prices.len(),
        returns = returns.len(),
        "aligned price and return series"
    );

    // The sample variance needs at least two points.
    if returns.len() < 2 {
        return Err(AnalyticsError::InsufficientData {
            required: 2,
            actual: returns.len(),
        });
    }

    let var_m = sample_variance(&returns.right);
    if var_m == 0.0 {
        return Err(AnalyticsError::DegenerateMarket);
    }
    Ok(sample_covariance(&returns.left, &returns.right) / var_m)
}

fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Sample covariance (N-1). Callers guarantee equal lengths of at least 2.
fn sample_covariance(xs: &[f64], ys: &[f64]) -> f64 {
    let mx = mean(xs);
    let my = mean(ys);
    let sum: f64 = xs.iter().zip(ys).map(|(x, y)| (x - mx) * (y - my)).sum();
    sum / (xs.len() - 1) as f64
}

fn sample_variance(xs: &[f64]) -> f64 {
    sample_covariance(xs, xs)
}
