//! No-op sink implementation.

use hypercharts_core::{Event, EventSink, Level};

/// A sink that discards every event.
///
/// Useful for silencing a component or exercising code paths that only care
/// about return values.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl NoopSink {
    /// Create a new no-op sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EventSink for NoopSink {
    fn log(&self, _level: Level, _event: Event) {}
}
