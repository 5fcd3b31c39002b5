//! Filter and sort pipeline applied to fetched records
//!
//! ```
//! use fmp_relay::pipeline::{FilterParams, process};
//! use fmp_relay::record::Record;
//! use fmp_relay::request::common::SortOrder;
//! use serde_json::json;
//!
//! let records: Vec<Record> = serde_json::from_value(json!([
//!     {"date": "2020-01-01", "revenue": 100, "netIncome": 10},
//!     {"date": "2021-01-01", "revenue": 200, "netIncome": 20}
//! ])).unwrap();
//!
//! let params = FilterParams::default()
//!     .min_revenue(50.0)
//!     .sort_by("revenue", SortOrder::Desc);
//! let out = process(records, &params).unwrap();
//! assert_eq!(out[0].revenue(), 200.0);
//! ```

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::record::{Record, SortKey};
use crate::request::common::SortOrder;

/// Optional bounds and sort directive for one request.
///
/// All bounds are inclusive. An unset bound imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterParams {
    /// Earliest statement year to keep
    pub year_start: Option<i32>,
    /// Latest statement year to keep
    pub year_end: Option<i32>,
    /// Minimum revenue
    pub min_revenue: Option<f64>,
    /// Maximum revenue
    pub max_revenue: Option<f64>,
    /// Minimum net income
    pub min_net_income: Option<f64>,
    /// Maximum net income
    pub max_net_income: Option<f64>,
    /// Field to sort by
    pub sort_by: Option<String>,
    /// Direction used when `sort_by` is set
    pub sort_order: SortOrder,
}

impl FilterParams {
    /// Keep statements from `year` onwards.
    pub fn year_start(mut self, year: i32) -> Self {
        self.year_start = Some(year);
        self
    }

    /// Keep statements up to and including `year`.
    pub fn year_end(mut self, year: i32) -> Self {
        self.year_end = Some(year);
        self
    }

    /// Lower revenue bound.
    pub fn min_revenue(mut self, value: f64) -> Self {
        self.min_revenue = Some(value);
        self
    }

    /// Upper revenue bound.
    pub fn max_revenue(mut self, value: f64) -> Self {
        self.max_revenue = Some(value);
        self
    }

    /// Lower net income bound.
    pub fn min_net_income(mut self, value: f64) -> Self {
        self.min_net_income = Some(value);
        self
    }

    /// Upper net income bound.
    pub fn max_net_income(mut self, value: f64) -> Self {
        self.max_net_income = Some(value);
        self
    }

    /// Sort the result by `field`.
    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = order;
        self
    }

    /// Whether a record with the given year passes every bound.
    fn accepts(&self, year: i32, record: &Record) -> bool {
        if self.year_start.is_some_and(|start| year < start) {
            return false;
        }
        if self.year_end.is_some_and(|end| year > end) {
            return false;
        }
        if self.min_revenue.is_some_and(|min| record.revenue() < min) {
            return false;
        }
        if self.max_revenue.is_some_and(|max| record.revenue() > max) {
            return false;
        }
        if self.min_net_income.is_some_and(|min| record.net_income() < min) {
            return false;
        }
        if self.max_net_income.is_some_and(|max| record.net_income() > max) {
            return false;
        }
        true
    }
}

/// Filter `records` by the bounds in `params`, then sort once if requested.
///
/// Every record's `date` is parsed; a single bad date fails the whole batch.
/// Upstream order is preserved for records that compare equal.
pub fn process(records: Vec<Record>, params: &FilterParams) -> Result<Vec<Record>> {
    let mut kept = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let year = record.year(index)?;
        if params.accepts(year, &record) {
            kept.push(record);
        }
    }

    match params.sort_by.as_deref() {
        Some(field) => sort_records(kept, field, params.sort_order),
        None => Ok(kept),
    }
}

fn sort_records(records: Vec<Record>, field: &str, order: SortOrder) -> Result<Vec<Record>> {
    let mut keyed = records
        .into_iter()
        .map(|record| Ok((record.sort_key(field)?, record)))
        .collect::<Result<Vec<(SortKey, Record)>>>()?;

    let has_number = keyed.iter().any(|(key, _)| matches!(key, SortKey::Number(_)));
    let has_text = keyed.iter().any(|(key, _)| matches!(key, SortKey::Text(_)));
    if has_number && has_text {
        return Err(Error::Unsortable {
            field: field.to_string(),
            reason: "values mix numbers and strings".to_string(),
        });
    }

    // Homogeneous at this point, so compare never yields None.
    let cmp = |a: &SortKey, b: &SortKey| a.compare(b).unwrap_or(Ordering::Equal);
    match order {
        SortOrder::Asc => keyed.sort_by(|(a, _), (b, _)| cmp(a, b)),
        SortOrder::Desc => keyed.sort_by(|(a, _), (b, _)| cmp(b, a)),
    }

    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}
