//! ValueLab Core — equity valuation from historical prices.
//!
//! This crate contains:
//! - Domain types (dated observations, price and return series, sampling intervals)
//! - Provider ports for price history and ticker metadata, with a Yahoo Finance
//!   adapter and an in-memory provider for offline use
//! - Date alignment of two series (inner join)
//! - Pure analytics: simple returns, regression beta, CAPM, Gordon growth, DCF
//!
//! Every computation is a function of its explicit inputs. Nothing is cached
//! and no state is shared between calls.

pub mod analytics;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;

pub use error::AnalyticsError;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: domain types and providers are Send + Sync so callers
    /// can run valuations from worker threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Observation>();
        require_sync::<domain::Observation>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();
        require_send::<domain::ReturnSeries>();
        require_sync::<domain::ReturnSeries>();
        require_send::<data::AlignedSeriesPair>();
        require_sync::<data::AlignedSeriesPair>();
        require_send::<data::YahooProvider>();
        require_sync::<data::YahooProvider>();
        require_send::<data::InMemoryProvider>();
        require_sync::<data::InMemoryProvider>();
        require_send::<AnalyticsError>();
        require_sync::<AnalyticsError>();
    }

    /// Providers are usable as trait objects.
    #[test]
    fn providers_are_object_safe() {
        fn _price(p: &dyn data::PriceSeriesProvider) -> &str {
            p.name()
        }
        fn _meta(p: &dyn data::MetadataProvider) -> &str {
            p.name()
        }
    }
}
