#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Event sink implementations for the Hypercharts client.
//!
//! This crate provides implementations of the [`EventSink`] trait from
//! `hypercharts-core`:
//!
//! - [`TracingSink`] - Forwards events to `tracing` (default, requires `tracing` feature)
//! - [`RecordingSink`] - Keeps events in memory, mostly for tests
//! - [`NoopSink`] - Discards every event

/// In-memory recording sink.
pub mod memory;
/// No-op sink.
pub mod noop;

/// Sink that forwards to `tracing`.
#[cfg(feature = "tracing")]
pub mod tracing;

// Re-export the trait for convenience
pub use hypercharts_core::EventSink;

pub use memory::RecordingSink;
pub use noop::NoopSink;

#[cfg(feature = "tracing")]
pub use self::tracing::TracingSink;
