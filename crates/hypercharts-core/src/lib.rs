#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for the Hypercharts fundamentals client.
//!
//! This crate provides the foundations shared by every other crate:
//!
//! - [`FinancialsSource`](provider::FinancialsSource) - Fetches raw resources
//! - [`EventSink`](event::EventSink) - Receives structured log events
//! - [`FinancialsResult`](types::FinancialsResult) - Parsed quarter records
//! - [`Ratio`](types::Ratio) - Derived value or unavailable marker
//! - [`HyperError`](error::HyperError) - Error taxonomy

/// Error types for Hypercharts operations.
pub mod error;
/// Structured events and the sink trait.
pub mod event;
/// Quarter and fiscal year labels.
pub mod period;
/// Source trait for fetching resources.
pub mod provider;
/// Core data types (Symbol, QuarterRecord, Ratio, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use error::{HyperError, Result};
pub use event::{Event, EventKind, EventSink, Level};
pub use period::{FiscalYearLabel, QuarterLabel};
pub use provider::{FINANCIALS_RESOURCE, FinancialsSource, RawPayload};
pub use types::{
    AnnualResult, Credential, Figure, FinancialsResult, FiscalYearTotal, ParseIssue,
    QuarterRatio, QuarterRecord, Ratio, RatioResult, Symbol,
};
