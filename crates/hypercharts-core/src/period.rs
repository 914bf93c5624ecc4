//! Reporting period definitions.
//!
//! This module defines [`QuarterLabel`], the `"YY Qn"` identifier Hypercharts
//! attaches to every quarterly record, and [`FiscalYearLabel`] used for
//! annual aggregates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HyperError;

/// A quarter identifier of the form `"YY Qn"` (e.g. `"21 Q3"`).
///
/// The label is validated on construction: two ASCII digits, a single space,
/// the letter `Q`, and one ASCII digit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuarterLabel(String);

impl QuarterLabel {
    /// Parses and validates a quarter label.
    pub fn parse(s: &str) -> Result<Self, HyperError> {
        let bytes = s.as_bytes();
        let valid = bytes.len() == 5
            && bytes[0].is_ascii_digit()
            && bytes[1].is_ascii_digit()
            && bytes[2] == b' '
            && bytes[3] == b'Q'
            && bytes[4].is_ascii_digit();

        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(HyperError::InvalidQuarterLabel(s.to_string()))
        }
    }

    /// Returns the two-digit year as an integer (`"05 Q1"` is `5`).
    #[must_use]
    pub fn year(&self) -> i32 {
        let bytes = self.0.as_bytes();
        i32::from(bytes[0] - b'0') * 10 + i32::from(bytes[1] - b'0')
    }

    /// Returns the quarter number.
    #[must_use]
    pub fn quarter(&self) -> u8 {
        self.0.as_bytes()[4] - b'0'
    }

    /// Returns the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuarterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for QuarterLabel {
    type Err = HyperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for QuarterLabel {
    type Error = HyperError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<QuarterLabel> for String {
    fn from(label: QuarterLabel) -> Self {
        label.0
    }
}

/// Label of an aggregated fiscal year, rendered as `FY<year>`.
///
/// The year is a plain integer without zero padding, so it may be a single
/// digit or negative (`FY4`, `FY-1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct FiscalYearLabel(i32);

impl FiscalYearLabel {
    /// Creates a label for the given year number.
    #[must_use]
    pub const fn new(year: i32) -> Self {
        Self(year)
    }

    /// Returns the year number.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for FiscalYearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FY{}", self.0)
    }
}

impl From<FiscalYearLabel> for String {
    fn from(label: FiscalYearLabel) -> Self {
        label.to_string()
    }
}

impl TryFrom<String> for FiscalYearLabel {
    type Error = HyperError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.strip_prefix("FY")
            .and_then(|y| y.parse().ok())
            .map(Self)
            .ok_or_else(|| {
                HyperError::InvalidParameter(format!("invalid fiscal year label: {s:?}"))
            })
    }
}
