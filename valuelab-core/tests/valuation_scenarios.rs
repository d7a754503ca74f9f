//! End-to-end valuation scenarios through the public API.
//!
//! Expected values are recomputed directly from the textbook formulas.

use chrono::NaiveDate;
use serde_json::json;
use valuelab_core::analytics::{
    compute_beta, expected_return, read_provider_beta, BetaRequest, DcfAssumptions,
    DividendBasis, GordonAssumptions,
};
use valuelab_core::config::AnalyticsConfig;
use valuelab_core::data::{InMemoryProvider, TickerInfo};
use valuelab_core::domain::PriceSeries;
use valuelab_core::AnalyticsError;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

const MONTH_ENDS: [&str; 6] = [
    "2020-01-31",
    "2020-02-29",
    "2020-03-31",
    "2020-04-30",
    "2020-05-31",
    "2020-06-30",
];

fn monthly(symbol: &str, prices: &[f64]) -> PriceSeries {
    PriceSeries::from_pairs(
        symbol,
        MONTH_ENDS.iter().map(|s| d(s)).zip(prices.iter().copied()),
    )
}

fn synthetic_provider() -> InMemoryProvider {
    // Stock moves roughly 1.5x the market, plus noise.
    InMemoryProvider::new()
        .with_series(monthly("^GSPC", &[100.0, 102.0, 98.0, 105.0, 107.0, 110.0]))
        .with_series(monthly("FAKE", &[50.0, 53.0, 47.0, 59.0, 62.0, 65.0]))
}

#[test]
fn capm_expected_return_scenario() {
    let er = expected_return(0.02, 1.5, 0.08);
    assert!((er - (0.02 + 1.5 * (0.08 - 0.02))).abs() < 1e-12);
    assert!((er - 0.11).abs() < 1e-12);
}

#[test]
fn gordon_growth_scenario() {
    let v = GordonAssumptions::new(1.0, 0.03, 0.08).value().unwrap();
    assert!((v - 1.03 / 0.05).abs() < 1e-9);

    let err = GordonAssumptions::new(1.0, 0.05, 0.04).value().unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidDiscountRate { .. }));
}

#[test]
fn dcf_scenario() {
    let cashflows = vec![1.0, 1.1, 1.21];
    let (r, g) = (0.10_f64, 0.02_f64);

    let mut expected = 0.0;
    for (i, cf) in cashflows.iter().enumerate() {
        expected += cf / (1.0 + r).powi(i as i32 + 1);
    }
    let tv = 1.21 * (1.0 + g) / (r - g);
    expected += tv / (1.0 + r).powi(3);

    let v = DcfAssumptions::new(cashflows.clone(), r)
        .with_terminal_growth(g)
        .value()
        .unwrap();
    assert!((v - expected).abs() < 1e-9, "{v} vs {expected}");

    assert!(matches!(
        DcfAssumptions::new(vec![], r).value(),
        Err(AnalyticsError::EmptyCashflows)
    ));
    assert!(matches!(
        DcfAssumptions::new(cashflows, 0.01).with_terminal_growth(0.02).value(),
        Err(AnalyticsError::InvalidDiscountRate { .. })
    ));
}

#[test]
fn synthetic_monthly_beta() {
    let provider = synthetic_provider();
    let request = BetaRequest::new("FAKE", d("2020-01-01"));
    let beta = compute_beta(&provider, &request).unwrap();

    assert!(beta > 0.5, "beta = {beta}");

    // Recompute the OLS slope by hand from the same prices.
    let m = [100.0, 102.0, 98.0, 105.0, 107.0, 110.0];
    let s = [50.0, 53.0, 47.0, 59.0, 62.0, 65.0];
    let rm: Vec<f64> = m.windows(2).map(|w| w[1] / w[0] - 1.0).collect();
    let rs: Vec<f64> = s.windows(2).map(|w| w[1] / w[0] - 1.0).collect();
    let n = rm.len() as f64;
    let mm = rm.iter().sum::<f64>() / n;
    let ms = rs.iter().sum::<f64>() / n;
    let cov: f64 = rm.iter().zip(&rs).map(|(a, b)| (a - mm) * (b - ms)).sum();
    let var: f64 = rm.iter().map(|a| (a - mm).powi(2)).sum();
    assert!((beta - cov / var).abs() < 1e-12);
}

#[test]
fn beta_over_a_range_too_short_is_insufficient() {
    let provider = synthetic_provider();
    let request = BetaRequest::new("FAKE", d("2020-01-01")).with_end(d("2020-05-31"));
    let err = compute_beta(&provider, &request).unwrap_err();
    assert!(matches!(
        err,
        AnalyticsError::InsufficientData { required: 6, actual: 5 }
    ));
}

#[test]
fn beta_for_an_unknown_ticker_is_no_data() {
    let provider = synthetic_provider();
    let request = BetaRequest::new("NOPE", d("2020-01-01"));
    let err = compute_beta(&provider, &request).unwrap_err();
    assert!(err.is_no_data());
    assert!(err.to_string().contains("NOPE"));
}

#[test]
fn beta_request_from_config_then_capm() {
    let config = AnalyticsConfig::from_toml("[beta]\nstart_date = \"2020-01-01\"\n").unwrap();
    let provider = synthetic_provider();
    let request = BetaRequest::from_config("FAKE", &config.beta);
    let beta = compute_beta(&provider, &request).unwrap();

    let er = expected_return(0.02, beta, 0.08);
    assert!((er - (0.02 + beta * 0.06)).abs() < 1e-12);
}

#[test]
fn provider_beta_feeds_capm() {
    let mut info = TickerInfo::new();
    info.insert("beta".into(), json!("1.23"));
    let provider = InMemoryProvider::new()
        .with_info("FAKE", info)
        .with_info("FAKE2", TickerInfo::new());

    let beta = read_provider_beta(&provider, "FAKE").unwrap();
    assert_eq!(beta, 1.23);
    assert_eq!(read_provider_beta(&provider, "FAKE2"), None);

    let er = expected_return(0.03, beta, 0.07);
    assert!((er - (0.03 + 1.23 * 0.04)).abs() < 1e-12);
}

#[test]
fn gordon_next_period_basis_skips_growth_step() {
    let current = GordonAssumptions::new(2.0, 0.04, 0.09).value().unwrap();
    let next = GordonAssumptions::new(2.0, 0.04, 0.09)
        .with_dividend_basis(DividendBasis::NextPeriod)
        .value()
        .unwrap();
    assert!((current - next * 1.04).abs() < 1e-9);
}

#[test]
fn dcf_terminal_growth_from_config() {
    let config = AnalyticsConfig::from_toml("[dcf]\nterminal_growth = 0.01\n").unwrap();
    let v = DcfAssumptions::from_config(vec![5.0], 0.06, &config.dcf)
        .value()
        .unwrap();
    let expected = 5.0 / 1.06 + (5.0 * 1.01 / 0.05) / 1.06;
    assert!((v - expected).abs() < 1e-9);
}
