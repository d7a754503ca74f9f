//! Domain types: dated observations, price and return series, sampling intervals.

pub mod interval;
pub mod series;

pub use interval::{Interval, IntervalParseError};
pub use series::{DatedValues, Observation, PriceSeries, ReturnSeries};
