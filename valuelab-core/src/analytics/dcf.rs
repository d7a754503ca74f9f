//! Discounted cash flow with a growing-perpetuity terminal value.

use crate::config::DcfDefaults;
use crate::error::AnalyticsError;
use serde::{Deserialize, Serialize};

/// Terminal growth rate used when none is given.
pub const DEFAULT_TERMINAL_GROWTH: f64 = 0.02;

/// Inputs to a DCF valuation.
///
/// `cashflows[0]` is received at the end of period 1, `cashflows[N-1]` at the
/// end of period N. The terminal value is anchored at period N.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfAssumptions {
    pub cashflows: Vec<f64>,
    pub discount_rate: f64,
    #[serde(default = "default_terminal_growth")]
    pub terminal_growth: f64,
}

fn default_terminal_growth() -> f64 {
    DEFAULT_TERMINAL_GROWTH
}

/// Components of a DCF value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DcfBreakdown {
    /// Present value of the explicit cashflows.
    pub explicit_pv: f64,
    /// Terminal value at period N (undiscounted).
    pub terminal_value: f64,
    /// Terminal value discounted back N periods.
    pub discounted_terminal_value: f64,
    pub total: f64,
}

impl DcfAssumptions {
    pub fn new(cashflows: Vec<f64>, discount_rate: f64) -> Self {
        Self {
            cashflows,
            discount_rate,
            terminal_growth: DEFAULT_TERMINAL_GROWTH,
        }
    }

    /// Build assumptions with the configured terminal growth.
    pub fn from_config(cashflows: Vec<f64>, discount_rate: f64, defaults: &DcfDefaults) -> Self {
        Self {
            cashflows,
            discount_rate,
            terminal_growth: defaults.terminal_growth,
        }
    }

    pub fn with_terminal_growth(mut self, terminal_growth: f64) -> Self {
        self.terminal_growth = terminal_growth;
        self
    }

    pub fn value(&self) -> Result<f64, AnalyticsError> {
        self.breakdown().map(|b| b.total)
    }

    /// Validate, then discount each cashflow and the terminal value.
    ///
    /// Empty cashflows are checked before the rate guard.
    pub fn breakdown(&self) -> Result<DcfBreakdown, AnalyticsError> {
        let Some(&last) = self.cashflows.last() else {
            return Err(AnalyticsError::EmptyCashflows);
        };
        let r = self.discount_rate;
        let g = self.terminal_growth;
        if r <= g {
            return Err(AnalyticsError::InvalidDiscountRate {
                discount_rate: r,
                growth_rate: g,
            });
        }

        let explicit_pv: f64 = self
            .cashflows
            .iter()
            .zip(1..)
            .map(|(cf, t)| cf / (1.0 + r).powi(t))
            .sum();

        let n = self.cashflows.len() as i32;
        let terminal_value = last * (1.0 + g) / (r - g);
        let discounted_terminal_value = terminal_value / (1.0 + r).powi(n);

        Ok(DcfBreakdown {
            explicit_pv,
            terminal_value,
            discounted_terminal_value,
            total: explicit_pv + discounted_terminal_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_period_example() {
        let b = DcfAssumptions::new(vec![1.0, 1.1, 1.21], 0.10)
            .breakdown()
            .unwrap();

        // Each explicit cashflow grows 10% and is discounted 10%, so each is worth 1/1.1.
        assert!((b.explicit_pv - 3.0 / 1.1).abs() < 1e-12);
        assert!((b.terminal_value - 1.21 * 1.02 / 0.08).abs() < 1e-12);
        assert!((b.discounted_terminal_value - 15.4275 / 1.331).abs() < 1e-9);
        assert!((b.total - (b.explicit_pv + b.discounted_terminal_value)).abs() < 1e-15);
        assert!((b.total - 14.3183).abs() < 1e-3);
    }

    #[test]
    fn single_period() {
        let v = DcfAssumptions::new(vec![10.0], 0.12)
            .with_terminal_growth(0.0)
            .value()
            .unwrap();
        // 10/1.12 + (10/0.12)/1.12 = 10/0.12
        assert!((v - 10.0 / 0.12).abs() < 1e-9);
    }

    #[test]
    fn empty_cashflows_rejected_before_rate_check() {
        let err = DcfAssumptions::new(vec![], 0.01).value().unwrap_err();
        assert!(matches!(err, AnalyticsError::EmptyCashflows));
    }

    #[test]
    fn rate_must_exceed_terminal_growth() {
        let err = DcfAssumptions::new(vec![1.0], 0.01).value().unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidDiscountRate { .. }));

        let err = DcfAssumptions::new(vec![1.0], 0.02).value().unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidDiscountRate { .. }));
    }

    #[test]
    fn from_config_uses_configured_terminal_growth() {
        let defaults = DcfDefaults {
            terminal_growth: 0.03,
        };
        let a = DcfAssumptions::from_config(vec![1.0, 1.1], 0.09, &defaults);
        assert_eq!(a.terminal_growth, 0.03);

        let explicit = 1.0 / 1.09 + 1.1 / 1.09_f64.powi(2);
        let expected = explicit + (1.1 * 1.03 / 0.06) / 1.09_f64.powi(2);
        assert!((a.value().unwrap() - expected).abs() < 1e-9);

        let a = DcfAssumptions::from_config(vec![1.0], 0.09, &DcfDefaults::default());
        assert_eq!(a.terminal_growth, DEFAULT_TERMINAL_GROWTH);
    }

    #[test]
    fn terminal_growth_defaults_when_omitted() {
        let a: DcfAssumptions =
            toml::from_str("cashflows = [1.0, 2.0]\ndiscount_rate = 0.09\n").unwrap();
        assert_eq!(a.terminal_growth, DEFAULT_TERMINAL_GROWTH);
    }
}
