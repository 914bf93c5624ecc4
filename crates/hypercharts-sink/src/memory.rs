//! In-memory recording sink.

use hypercharts_core::{Event, EventKind, EventSink, Level};
use std::sync::{Mutex, PoisonError};

/// Sink that keeps every event in memory, in arrival order.
///
/// Used by tests to assert on what a component reported, and by callers that
/// want to attach the event log to their own output.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(Level, Event)>>,
}

impl RecordingSink {
    /// Create a new empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<(Level, Event)> {
        self.lock().clone()
    }

    /// Returns the recorded events of one kind.
    #[must_use]
    pub fn of_kind(&self, kind: EventKind) -> Vec<Event> {
        self.lock()
            .iter()
            .filter(|(_, e)| e.kind == kind)
            .map(|(_, e)| e.clone())
            .collect()
    }

    /// Returns how many events of one kind were recorded.
    #[must_use]
    pub fn count(&self, kind: EventKind) -> usize {
        self.lock().iter().filter(|(_, e)| e.kind == kind).count()
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Removes all recorded events.
    pub fn clear(&self) {
        self.lock().clear();
    }

    // A panic while holding the lock cannot leave the Vec half-written.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Level, Event)>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventSink for RecordingSink {
    fn log(&self, level: Level, event: Event) {
        self.lock().push((level, event));
    }
}
