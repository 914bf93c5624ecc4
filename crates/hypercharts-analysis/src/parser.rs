//! Normalization of the raw `financials` payload.

use std::sync::Arc;

use hypercharts_core::{
    Event, EventKind, EventSink, Figure, FinancialsResult, ParseIssue, QuarterLabel,
    QuarterRecord, RawPayload, Symbol,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level key holding the quarter entries.
pub const FINANCIALS_KEY: &str = "financials";
/// Quarter label key.
pub const QUARTER_KEY: &str = "Quarter";
/// Stock price key.
pub const STOCK_PRICE_KEY: &str = "Stock Price";
/// Net income key.
pub const NET_INCOME_KEY: &str = "Net Income";
/// Outstanding shares key.
pub const OUTSTANDING_SHARES_KEY: &str = "Outstanding Shares";

/// Keys every entry must carry, in the order they are checked.
const REQUIRED_KEYS: [&str; 4] = [
    QUARTER_KEY,
    STOCK_PRICE_KEY,
    NET_INCOME_KEY,
    OUTSTANDING_SHARES_KEY,
];

/// What to do with the rest of the payload once an entry is unusable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFieldPolicy {
    /// Keep the quarters parsed so far and ignore everything after.
    #[default]
    Stop,
    /// Drop the bad quarter and carry on with the next one.
    Skip,
}

/// Turns a raw financials payload into a [`FinancialsResult`].
#[derive(Debug, Clone)]
pub struct Parser {
    policy: MissingFieldPolicy,
    sink: Arc<dyn EventSink>,
}

impl Parser {
    /// Create a parser with the default [`MissingFieldPolicy::Stop`] policy.
    #[must_use]
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self {
            policy: MissingFieldPolicy::default(),
            sink,
        }
    }

    /// Set the missing-field policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: MissingFieldPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the missing-field policy.
    #[must_use]
    pub const fn policy(&self) -> MissingFieldPolicy {
        self.policy
    }

    /// Parse the `financials` array of `raw` in order.
    ///
    /// Never fails. Entries lacking a required key, or carrying a malformed
    /// quarter label, are reported in [`FinancialsResult::issues`] and handled
    /// according to the policy.
    pub fn parse(&self, raw: &RawPayload, symbol: &Symbol) -> FinancialsResult {
        let mut result = FinancialsResult::new(symbol.clone(), Vec::new());

        let Some(entries) = raw.get(FINANCIALS_KEY).and_then(Value::as_array) else {
            self.sink.warn(Event::new(
                EventKind::MissingField,
                format!("{symbol}: payload has no '{FINANCIALS_KEY}' array"),
            ));
            result.issues.push(ParseIssue::MissingField {
                index: 0,
                key: FINANCIALS_KEY.to_string(),
            });
            self.summarize(&result, 0);
            return result;
        };

        for (index, entry) in entries.iter().enumerate() {
            match parse_entry(index, entry) {
                Ok(record) => {
                    self.sink.info(Event::new(
                        EventKind::QuarterParsed,
                        format!("{symbol}: parsed {}", record.quarter),
                    ));
                    result.records.push(record);
                }
                Err(issue) => {
                    self.report(symbol, &issue);
                    result.issues.push(issue);
                    if self.policy == MissingFieldPolicy::Stop {
                        break;
                    }
                }
            }
        }

        self.summarize(&result, entries.len());
        result
    }

    fn report(&self, symbol: &Symbol, issue: &ParseIssue) {
        let event = match issue {
            ParseIssue::MissingField { index, key } => Event::new(
                EventKind::MissingField,
                format!("{symbol}: entry {index} is missing '{key}'"),
            ),
            ParseIssue::InvalidQuarter { index, label } => Event::new(
                EventKind::InvalidQuarter,
                format!("{symbol}: entry {index} has invalid quarter {label}"),
            ),
        };
        self.sink.warn(event);
    }

    fn summarize(&self, result: &FinancialsResult, total: usize) {
        let mut message = format!(
            "{}: parsed {} of {total} quarters",
            result.symbol,
            result.records.len()
        );
        if result.is_partial() && self.policy == MissingFieldPolicy::Stop {
            message.push_str(", stopped at first unusable entry");
        }
        self.sink.info(Event::new(EventKind::ParseSummary, message));
    }
}

/// Parse a single entry, or describe why it cannot be used.
fn parse_entry(index: usize, entry: &Value) -> Result<QuarterRecord, ParseIssue> {
    if let Some(key) = REQUIRED_KEYS.iter().find(|key| entry.get(**key).is_none()) {
        return Err(ParseIssue::MissingField {
            index,
            key: (*key).to_string(),
        });
    }

    let quarter = match &entry[QUARTER_KEY] {
        Value::String(s) => QuarterLabel::parse(s).map_err(|_| s.clone()),
        other => Err(other.to_string()),
    }
    .map_err(|label| ParseIssue::InvalidQuarter { index, label })?;

    Ok(QuarterRecord {
        quarter,
        stock_price: Figure::from_json(&entry[STOCK_PRICE_KEY]),
        net_income: Figure::from_json(&entry[NET_INCOME_KEY]),
        outstanding_shares: Figure::from_json(&entry[OUTSTANDING_SHARES_KEY]),
    })
}
