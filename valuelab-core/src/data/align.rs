//! Two-series date alignment.
//!
//! Given two series, keep only the dates both have and drop any row where
//! either side is not a finite number. No forward-fill.

use crate::domain::{DatedValues, Observation, PriceSeries};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Two series restricted to their common dates, ascending.
///
/// `dates`, `left` and `right` always have the same length and index `i`
/// of each refers to the same date.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeriesPair {
    pub left_symbol: String,
    pub right_symbol: String,
    pub dates: Vec<NaiveDate>,
    pub left: Vec<f64>,
    pub right: Vec<f64>,
}

impl AlignedSeriesPair {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Rebuild the left side as a price series on the common dates.
    pub fn left_series(&self) -> PriceSeries {
        side_series(&self.left_symbol, &self.dates, &self.left)
    }

    /// Rebuild the right side as a price series on the common dates.
    pub fn right_series(&self) -> PriceSeries {
        side_series(&self.right_symbol, &self.dates, &self.right)
    }
}

/// Inner-join two series on date.
pub fn align_pair<L, R>(left: &L, right: &R) -> AlignedSeriesPair
where
    L: DatedValues + ?Sized,
    R: DatedValues + ?Sized,
{
    let right_by_date: HashMap<NaiveDate, f64> = right
        .observations()
        .iter()
        .map(|o| (o.date, o.value))
        .collect();

    let mut dates = Vec::new();
    let mut left_values = Vec::new();
    let mut right_values = Vec::new();

    // Left observations are already ascending, so the join keeps that order.
    for obs in left.observations() {
        let Some(&r) = right_by_date.get(&obs.date) else {
            continue;
        };
        if !obs.value.is_finite() || !r.is_finite() {
            continue;
        }
        dates.push(obs.date);
        left_values.push(obs.value);
        right_values.push(r);
    }

    AlignedSeriesPair {
        left_symbol: left.symbol().to_string(),
        right_symbol: right.symbol().to_string(),
        dates,
        left: left_values,
        right: right_values,
    }
}

fn side_series(symbol: &str, dates: &[NaiveDate], values: &[f64]) -> PriceSeries {
    let points = dates
        .iter()
        .zip(values)
        .map(|(&date, &value)| Observation::new(date, value))
        .collect();
    PriceSeries::from_points(symbol, points)
}
