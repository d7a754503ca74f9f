//! Capital Asset Pricing Model.

/// CAPM expected return: `rf + beta * (market_return - rf)`.
///
/// Inputs are decimals (0.03 for 3%). Any real inputs are valid, including
/// negative rates and negative beta.
pub fn expected_return(risk_free_rate: f64, beta: f64, market_return: f64) -> f64 {
    risk_free_rate + beta * market_risk_premium(market_return, risk_free_rate)
}

/// Excess return of the market over the risk-free rate.
pub fn market_risk_premium(market_return: f64, risk_free_rate: f64) -> f64 {
    market_return - risk_free_rate
}
