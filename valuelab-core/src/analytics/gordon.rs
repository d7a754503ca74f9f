//! Gordon Growth Model: a dividend growing at a constant rate forever.

use crate::error::AnalyticsError;
use serde::{Deserialize, Serialize};

/// Which dividend the caller is supplying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DividendBasis {
    /// The most recent dividend D0; it is grown one period to get D1.
    #[default]
    Current,
    /// Already the next-period dividend D1; used as given.
    NextPeriod,
}

impl DividendBasis {
    fn next_dividend(self, dividend: f64, growth_rate: f64) -> f64 {
        match self {
            Self::Current => dividend * (1.0 + growth_rate),
            Self::NextPeriod => dividend,
        }
    }
}

/// Inputs to a Gordon growth valuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GordonAssumptions {
    pub dividend: f64,
    pub growth_rate: f64,
    pub discount_rate: f64,
    #[serde(default)]
    pub dividend_basis: DividendBasis,
}

impl GordonAssumptions {
    pub fn new(dividend: f64, growth_rate: f64, discount_rate: f64) -> Self {
        Self {
            dividend,
            growth_rate,
            discount_rate,
            dividend_basis: DividendBasis::Current,
        }
    }

    pub fn with_dividend_basis(mut self, basis: DividendBasis) -> Self {
        self.dividend_basis = basis;
        self
    }

    /// D1, the dividend expected one period from now.
    pub fn next_dividend(&self) -> f64 {
        self.dividend_basis
            .next_dividend(self.dividend, self.growth_rate)
    }

    pub fn value(&self) -> Result<f64, AnalyticsError> {
        gordon_growth_value(
            self.dividend,
            self.growth_rate,
            self.discount_rate,
            self.dividend_basis,
        )
    }
}

/// Value = D1 / (r - g).
///
/// Fails with [`AnalyticsError::InvalidDiscountRate`] when `r <= g`, before
/// any division happens.
pub fn gordon_growth_value(
    dividend: f64,
    growth_rate: f64,
    discount_rate: f64,
    basis: DividendBasis,
) -> Result<f64, AnalyticsError> {
    if discount_rate <= growth_rate {
        return Err(AnalyticsError::InvalidDiscountRate {
            discount_rate,
            growth_rate,
        });
    }
    let d1 = basis.next_dividend(dividend, growth_rate);
    Ok(d1 / (discount_rate - growth_rate))
}
