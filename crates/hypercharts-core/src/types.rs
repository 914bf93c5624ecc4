//! Core data types for Hypercharts financials.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Symbol`] - Trading symbol/ticker
//! - [`Credential`] - API key, redacted in debug output
//! - [`Figure`] - A numeric field as it arrived on the wire
//! - [`QuarterRecord`] - Normalized per-quarter financials
//! - [`FinancialsResult`] - Ordered quarter records for one symbol
//! - [`Ratio`] and [`RatioResult`] - Derived per-quarter ratios
//! - [`AnnualResult`] - Fiscal-year net income totals

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{HyperError, Result};
use crate::period::{FiscalYearLabel, QuarterLabel};

/// A trading symbol/ticker.
///
/// Symbols are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// An opaque API key.
///
/// Immutable once created. The key never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps an API key, rejecting empty or whitespace-only keys.
    ///
    /// `source` names where the key was expected to come from and is used in
    /// the [`HyperError::MissingCredential`] error.
    pub fn new(key: impl Into<String>, source: &str) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(HyperError::MissingCredential(source.to_string()));
        }
        Ok(Self(key))
    }

    /// Returns the raw key for use in a request.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// A numeric field of a financials entry, kept in its wire form.
///
/// Conversion is deferred to the calculations, which differ in how strict
/// they are: EPS accepts numeric strings, PE and annual totals do not.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Figure {
    /// A JSON number.
    Number(f64),
    /// A JSON string, which may or may not hold a number.
    Text(String),
    /// Null, a missing key, or any other JSON type.
    #[default]
    Unavailable,
}

impl Figure {
    /// Builds a figure from a JSON value.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map_or(Self::Unavailable, Self::Number),
            Value::String(s) => Self::Text(s.clone()),
            _ => Self::Unavailable,
        }
    }

    /// Returns the value only if it is a JSON number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Converts the figure to a finite float, parsing numeric strings.
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Unavailable => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Returns true if the figure is [`Figure::Unavailable`].
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

impl From<f64> for Figure {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Figure {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Normalized financials for a single quarter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuarterRecord {
    /// Quarter label (`"YY Qn"`).
    pub quarter: QuarterLabel,
    /// Stock price at the end of the quarter.
    pub stock_price: Figure,
    /// Net income for the quarter.
    pub net_income: Figure,
    /// Outstanding shares at the end of the quarter.
    pub outstanding_shares: Figure,
}

impl QuarterRecord {
    /// Creates a record with all numeric fields unavailable.
    #[must_use]
    pub fn new(quarter: QuarterLabel) -> Self {
        Self {
            quarter,
            stock_price: Figure::Unavailable,
            net_income: Figure::Unavailable,
            outstanding_shares: Figure::Unavailable,
        }
    }

    /// Sets the stock price.
    #[must_use]
    pub fn with_stock_price(mut self, stock_price: impl Into<Figure>) -> Self {
        self.stock_price = stock_price.into();
        self
    }

    /// Sets the net income.
    #[must_use]
    pub fn with_net_income(mut self, net_income: impl Into<Figure>) -> Self {
        self.net_income = net_income.into();
        self
    }

    /// Sets the outstanding shares.
    #[must_use]
    pub fn with_outstanding_shares(mut self, outstanding_shares: impl Into<Figure>) -> Self {
        self.outstanding_shares = outstanding_shares.into();
        self
    }
}

/// A problem found while parsing one entry of the financials array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParseIssue {
    /// A required key was absent.
    MissingField {
        /// Position of the entry in the financials array.
        index: usize,
        /// The absent key, e.g. `"Net Income"`.
        key: String,
    },
    /// The `Quarter` value was not a valid `"YY Qn"` label.
    InvalidQuarter {
        /// Position of the entry in the financials array.
        index: usize,
        /// The offending value, rendered as JSON text when not a string.
        label: String,
    },
}

impl ParseIssue {
    /// Returns the position of the offending entry.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::MissingField { index, .. } | Self::InvalidQuarter { index, .. } => *index,
        }
    }
}

impl From<&ParseIssue> for HyperError {
    fn from(issue: &ParseIssue) -> Self {
        match issue {
            ParseIssue::MissingField { key, .. } => Self::MissingField(key.clone()),
            ParseIssue::InvalidQuarter { label, .. } => Self::InvalidQuarterLabel(label.clone()),
        }
    }
}

/// Parsed quarterly financials for one symbol.
///
/// `records` keeps the order returned by the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinancialsResult {
    /// Symbol the financials belong to.
    pub symbol: Symbol,
    /// Quarter records in API order.
    pub records: Vec<QuarterRecord>,
    /// Problems encountered while parsing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ParseIssue>,
}

impl FinancialsResult {
    /// Creates a result with no issues.
    #[must_use]
    pub const fn new(symbol: Symbol, records: Vec<QuarterRecord>) -> Self {
        Self {
            symbol,
            records,
            issues: Vec::new(),
        }
    }

    /// Returns true if parsing stopped early or skipped entries.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// A derived ratio: a number, or a marker that it could not be computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ratio {
    /// The computed value.
    Value(f64),
    /// Inputs were missing, non-numeric, or the divisor was zero.
    #[default]
    Unavailable,
}

impl Ratio {
    /// Returns the value, if available.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Unavailable => None,
        }
    }

    /// Returns true if the ratio is available.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Unavailable => f.write_str("unavailable"),
        }
    }
}

/// A ratio for one quarter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuarterRatio {
    /// Quarter label.
    pub quarter: QuarterLabel,
    /// Derived value.
    pub ratio: Ratio,
}

/// Per-quarter ratios for one symbol, in the order of the source records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatioResult {
    /// Symbol the ratios belong to.
    pub symbol: Symbol,
    /// Ratios in quarter order.
    pub per_quarter: Vec<QuarterRatio>,
}

impl RatioResult {
    /// Looks up the ratio for a quarter. If the label repeats, the first wins.
    #[must_use]
    pub fn get(&self, quarter: &str) -> Option<Ratio> {
        self.per_quarter
            .iter()
            .find(|q| q.quarter.as_str() == quarter)
            .map(|q| q.ratio)
    }

    /// Returns the number of quarters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.per_quarter.len()
    }

    /// Returns true if there are no quarters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.per_quarter.is_empty()
    }

    /// Iterates `(quarter, ratio)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&QuarterLabel, Ratio)> {
        self.per_quarter.iter().map(|q| (&q.quarter, q.ratio))
    }
}

/// Net income summed over one fiscal year.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FiscalYearTotal {
    /// Fiscal year label.
    pub fiscal_year: FiscalYearLabel,
    /// Sum of quarterly net income.
    pub total_net_income: f64,
}

/// Fiscal-year totals for one symbol, in flush order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnualResult {
    /// Symbol the totals belong to.
    pub symbol: Symbol,
    /// Totals in the order they were produced.
    pub per_year: Vec<FiscalYearTotal>,
}
