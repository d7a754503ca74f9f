//! Errors surfaced by the analytics layer.

use crate::data::DataError;
use thiserror::Error;

/// Failure modes of the valuation and beta computations.
///
/// All variants are terminal at this layer: no partial result is returned and
/// no default is substituted.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The price provider failed, including the no-data case.
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(
        "not enough overlapping observations to compute beta: need {required}, got {actual}; \
         try a longer range or a different interval"
    )]
    InsufficientData { required: usize, actual: usize },

    #[error("market returns have zero variance")]
    DegenerateMarket,

    #[error(
        "discount rate {discount_rate} must be greater than growth rate {growth_rate} \
         for a finite value"
    )]
    InvalidDiscountRate { discount_rate: f64, growth_rate: f64 },

    #[error("cashflows must contain at least one period")]
    EmptyCashflows,
}

impl AnalyticsError {
    /// True when the underlying provider returned nothing for the request.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::Data(DataError::NoData { .. }))
    }
}
