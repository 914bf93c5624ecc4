//! Sink that forwards events to `tracing`.

use hypercharts_core::{Event, EventSink, Level};

/// Target used for every forwarded event.
pub const TARGET: &str = "hypercharts";

/// Forwards events to the `tracing` macros.
///
/// The event kind and status code become structured fields; the message is
/// the event message. Formatting and destination are decided by whatever
/// subscriber the application installs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Create a new tracing sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EventSink for TracingSink {
    fn log(&self, level: Level, event: Event) {
        let kind = event.kind.as_str();
        let status = event.status;
        let message = event.message;
        match level {
            Level::Debug => ::tracing::debug!(target: TARGET, kind, ?status, "{message}"),
            Level::Info => ::tracing::info!(target: TARGET, kind, ?status, "{message}"),
            Level::Warn => ::tracing::warn!(target: TARGET, kind, ?status, "{message}"),
            Level::Error => ::tracing::error!(target: TARGET, kind, ?status, "{message}"),
        }
    }
}
