//! Simple period-over-period returns.

use crate::domain::{DatedValues, Observation, PriceSeries, ReturnSeries};

/// Convert prices into simple returns: `r[i] = p[i] / p[i-1] - 1`.
///
/// Each return is dated with the later price of its pair, so the first date
/// of the input never appears. Pairs that produce a non-finite value (a NaN
/// price, or a zero previous price) are dropped. Fewer than two prices give
/// an empty series.
pub fn compute_returns(prices: &PriceSeries) -> ReturnSeries {
    let points = prices
        .observations()
        .windows(2)
        .filter_map(|pair| {
            let r = pair[1].value / pair[0].value - 1.0;
            r.is_finite().then(|| Observation::new(pair[1].date, r))
        })
        .collect();
    ReturnSeries::new(prices.symbol(), points)
}
