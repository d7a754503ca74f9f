//! Date-keyed series of prices and returns.
//!
//! A series is immutable once built: ascending by date, one value per date.
//! Values may be NaN when a provider had no price for a date; alignment and
//! return computation drop those rows instead of propagating them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single dated value (a price or a return).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Read access to the ordered observations of a series.
pub trait DatedValues {
    fn symbol(&self) -> &str;
    fn observations(&self) -> &[Observation];

    fn len(&self) -> usize {
        self.observations().len()
    }

    fn is_empty(&self) -> bool {
        self.observations().is_empty()
    }

    fn dates(&self) -> Vec<NaiveDate> {
        self.observations().iter().map(|o| o.date).collect()
    }

    fn values(&self) -> Vec<f64> {
        self.observations().iter().map(|o| o.value).collect()
    }
}

/// Price history for one symbol, ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<Observation>,
}

impl PriceSeries {
    /// Build a series from points in any order.
    ///
    /// Points are sorted by date; when a date repeats, the last point given wins.
    pub fn from_points(symbol: impl Into<String>, points: Vec<Observation>) -> Self {
        Self {
            symbol: symbol.into(),
            points: collapse_by_date(points),
        }
    }

    /// Convenience constructor from parallel `(date, price)` pairs.
    pub fn from_pairs(
        symbol: impl Into<String>,
        pairs: impl IntoIterator<Item = (NaiveDate, f64)>,
    ) -> Self {
        let points = pairs
            .into_iter()
            .map(|(date, value)| Observation::new(date, value))
            .collect();
        Self::from_points(symbol, points)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|o| o.date)
    }

    /// Restrict to observations with `start <= date <= end` (end open when `None`).
    pub fn between(&self, start: NaiveDate, end: Option<NaiveDate>) -> Self {
        let points = self
            .points
            .iter()
            .filter(|o| o.date >= start && end.map_or(true, |e| o.date <= e))
            .copied()
            .collect();
        Self {
            symbol: self.symbol.clone(),
            points,
        }
    }
}

impl DatedValues for PriceSeries {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn observations(&self) -> &[Observation] {
        &self.points
    }
}

/// Period-over-period simple returns for one symbol.
///
/// Always derived from a [`PriceSeries`]; the first date of the source never
/// appears here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    symbol: String,
    points: Vec<Observation>,
}

impl ReturnSeries {
    pub(crate) fn new(symbol: impl Into<String>, points: Vec<Observation>) -> Self {
        Self {
            symbol: symbol.into(),
            points,
        }
    }
}

impl DatedValues for ReturnSeries {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn observations(&self) -> &[Observation] {
        &self.points
    }
}

fn collapse_by_date(points: Vec<Observation>) -> Vec<Observation> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for point in points {
        by_date.insert(point.date, point.value);
    }
    by_date
        .into_iter()
        .map(|(date, value)| Observation { date, value })
        .collect()
}
