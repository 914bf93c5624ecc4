#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Hypercharts fundamentals client.
//!
//! This crate re-exports the core types, the analysis stages and the sinks,
//! and provides a [`Pipeline`] that runs them in order for one or more
//! symbols.
//!
//! # Features
//!
//! - `client` - The reqwest-based [`HyperchartsClient`]
//! - `tracing` - The [`TracingSink`] event sink
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use hypercharts::{ClientConfig, HyperchartsClient, Pipeline, Symbol, TracingSink};
//!
//! #[tokio::main]
//! async fn main() -> hypercharts::Result<()> {
//!     let sink = Arc::new(TracingSink::new());
//!     let client = HyperchartsClient::new(ClientConfig::from_env()?, sink.clone())?;
//!     let pipeline = Pipeline::new(Arc::new(client), sink);
//!
//!     let report = pipeline.report(&Symbol::new("AAPL"), true).await?;
//!     println!("{:?}", report.pe);
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use hypercharts_core::*;

// Analysis stages
pub use hypercharts_analysis::{
    Annualizer, AnnualizerConfig, MissingFieldPolicy, Parser, RatioCalculator, eps, pe,
};

// Sinks
#[cfg(feature = "tracing")]
pub use hypercharts_sink::TracingSink;
pub use hypercharts_sink::{NoopSink, RecordingSink};

// Client
#[cfg(feature = "client")]
pub use hypercharts_client::{ClientConfig, DEFAULT_BASE_URL, HyperchartsClient};

mod pipeline;
pub use pipeline::{Pipeline, SymbolReport};
