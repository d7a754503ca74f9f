//! Valuation analytics — pure functions over explicit inputs.
//!
//! Only [`beta::compute_beta`] and [`provider_beta::read_provider_beta`]
//! touch a provider; everything else is arithmetic.

pub mod beta;
pub mod capm;
pub mod dcf;
pub mod gordon;
pub mod provider_beta;
pub mod returns;

pub use beta::{
    beta_from_prices, compute_beta, BetaRequest, DEFAULT_MARKET_TICKER, MIN_ALIGNED_OBSERVATIONS,
};
pub use capm::{expected_return, market_risk_premium};
pub use dcf::{DcfAssumptions, DcfBreakdown, DEFAULT_TERMINAL_GROWTH};
pub use gordon::{gordon_growth_value, DividendBasis, GordonAssumptions};
pub use provider_beta::read_provider_beta;
pub use returns::compute_returns;
