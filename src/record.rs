//! Income statement records as returned by the upstream API
//!
//! Records are kept as loosely-typed JSON objects so that every field the
//! upstream sends is passed back to callers untouched. Only `date`, `revenue`
//! and `netIncome` are ever read, through the typed accessors below.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::Date;
use time::macros::format_description;

use crate::error::{Error, Result};

/// Field holding the statement date (`YYYY-MM-DD`)
pub const DATE: &str = "date";
/// Field holding total revenue
pub const REVENUE: &str = "revenue";
/// Field holding net income
pub const NET_INCOME: &str = "netIncome";

/// One annual income statement entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Raw access to a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Numeric value of `key`, or 0 when the field is absent or not a number.
    pub fn numeric_field(&self, key: &str) -> f64 {
        self.0.get(key).and_then(Value::as_f64).unwrap_or(0.0)
    }

    /// Revenue, 0 when missing.
    pub fn revenue(&self) -> f64 {
        self.numeric_field(REVENUE)
    }

    /// Net income, 0 when missing.
    pub fn net_income(&self) -> f64 {
        self.numeric_field(NET_INCOME)
    }

    /// Parse the statement year out of `date`.
    ///
    /// `index` is the record's position in its batch and is only used for
    /// error reporting.
    pub fn year(&self, index: usize) -> Result<i32> {
        let raw = self
            .0
            .get(DATE)
            .and_then(Value::as_str)
            .ok_or(Error::MissingDate { index })?;

        let date = Date::parse(raw, format_description!("[year]-[month]-[day]")).map_err(|source| {
            Error::InvalidDate {
                index,
                value: raw.to_string(),
                source,
            }
        })?;
        Ok(date.year())
    }

    /// Comparable key for `field`.
    pub fn sort_key(&self, field: &str) -> Result<SortKey> {
        match self.0.get(field) {
            None | Some(Value::Null) => Ok(SortKey::Number(0.0)),
            Some(Value::Bool(b)) => Ok(SortKey::Number(if *b { 1.0 } else { 0.0 })),
            Some(Value::Number(n)) => Ok(SortKey::Number(n.as_f64().unwrap_or(0.0))),
            Some(Value::String(s)) => Ok(SortKey::Text(s.clone())),
            Some(other) => Err(Error::Unsortable {
                field: field.to_string(),
                reason: format!("{} values have no ordering", value_kind(other)),
            }),
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl TryFrom<Value> for Record {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(Error::UnexpectedShape(format!(
                "expected record object, got {}",
                value_kind(&other)
            ))),
        }
    }
}

/// Sort key extracted from a record field.
///
/// Missing fields sort as the number 0. Numbers and text are each totally
/// ordered; the two kinds are never compared with each other.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    /// Numeric value
    Number(f64),
    /// Text value, ordered lexically
    Text(String),
}

impl SortKey {
    /// Compare two keys of the same kind; `None` for mixed kinds.
    pub fn compare(&self, other: &SortKey) -> Option<Ordering> {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => Some(a.total_cmp(b)),
            (SortKey::Text(a), SortKey::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
