#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Parsing and ratio derivation for Hypercharts quarterly financials.
//!
//! - [`Parser`] - Raw payload to [`FinancialsResult`](hypercharts_core::FinancialsResult)
//! - [`RatioCalculator`] - EPS and PE per quarter
//! - [`Annualizer`] - Net income per fiscal year

/// Fiscal-year aggregation.
pub mod annual;
/// Payload normalization.
pub mod parser;
/// EPS and PE.
pub mod ratio;

pub use annual::{Annualizer, AnnualizerConfig};
pub use parser::{MissingFieldPolicy, Parser};
pub use ratio::{RatioCalculator, eps, pe};
