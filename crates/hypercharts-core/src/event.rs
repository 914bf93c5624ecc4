//! Structured events emitted by the pipeline components.
//!
//! Components never log through a global logger. Each one is handed an
//! [`EventSink`] at construction and reports what it did through it; where
//! those events end up (tracing, memory, nowhere) is the sink's business.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Severity of an [`Event`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Fine-grained progress (per-quarter calculations).
    Debug,
    /// Normal operation.
    Info,
    /// Recoverable problems (missing fields, unavailable ratios).
    Warn,
    /// Failed requests.
    Error,
}

/// What an [`Event`] reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A request returned 200 and decoded.
    FetchSucceeded,
    /// A request returned 404.
    ResourceNotFound,
    /// A request returned 400.
    BadRequest,
    /// A request failed at the network level or with another status.
    TransportFailed,
    /// A quarter entry was parsed.
    QuarterParsed,
    /// A quarter entry lacked a required key.
    MissingField,
    /// A quarter entry carried a malformed label.
    InvalidQuarter,
    /// End of a parse call.
    ParseSummary,
    /// EPS computed for one quarter.
    EpsCalculated,
    /// PE computed for one quarter.
    PeCalculated,
    /// End of a ratio call.
    RatioSummary,
    /// A fiscal-year total was flushed.
    YearFlushed,
    /// End of an annualize call.
    AnnualSummary,
}

impl EventKind {
    /// Returns the snake_case name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FetchSucceeded => "fetch_succeeded",
            Self::ResourceNotFound => "resource_not_found",
            Self::BadRequest => "bad_request",
            Self::TransportFailed => "transport_failed",
            Self::QuarterParsed => "quarter_parsed",
            Self::MissingField => "missing_field",
            Self::InvalidQuarter => "invalid_quarter",
            Self::ParseSummary => "parse_summary",
            Self::EpsCalculated => "eps_calculated",
            Self::PeCalculated => "pe_calculated",
            Self::RatioSummary => "ratio_summary",
            Self::YearFlushed => "year_flushed",
            Self::AnnualSummary => "annual_summary",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured log event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event type.
    pub kind: EventKind,
    /// Human-readable message.
    pub message: String,
    /// HTTP status code, for request outcomes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl Event {
    /// Creates an event without a status code.
    #[must_use]
    pub fn new(kind: EventKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    /// Attaches an HTTP status code.
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// Destination for [`Event`]s.
///
/// Implementations must be cheap to call and must not fail; a sink that
/// cannot deliver an event drops it.
pub trait EventSink: Send + Sync + Debug {
    /// Records one event.
    fn log(&self, level: Level, event: Event);

    /// Convenience for `log(Level::Debug, ..)`.
    fn debug(&self, event: Event) {
        self.log(Level::Debug, event);
    }

    /// Convenience for `log(Level::Info, ..)`.
    fn info(&self, event: Event) {
        self.log(Level::Info, event);
    }

    /// Convenience for `log(Level::Warn, ..)`.
    fn warn(&self, event: Event) {
        self.log(Level::Warn, event);
    }

    /// Convenience for `log(Level::Error, ..)`.
    fn error(&self, event: Event) {
        self.log(Level::Error, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_names_match_serde() {
        let kinds = [
            EventKind::FetchSucceeded,
            EventKind::MissingField,
            EventKind::PeCalculated,
            EventKind::AnnualSummary,
        ];
        for kind in kinds {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_event_status() {
        let event = Event::new(EventKind::BadRequest, "bad symbol").with_status(400);
        assert_eq!(event.status, Some(400));
        assert_eq!(event.kind.to_string(), "bad_request");
    }
}
