//! Fiscal-year aggregation of quarterly net income.
//!
//! Records are walked in the order given. A running total accumulates while
//! the two-digit year of consecutive quarter labels stays the same, and is
//! flushed whenever it changes. A flushed total is labelled `FY<year - 1>`,
//! where `year` is the year that just ended, so the four quarters of `21`
//! come out as `FY20`. Existing consumers depend on that labelling.
//!
//! The last year is still in progress when the walk ends and is not flushed
//! unless [`AnnualizerConfig::flush_trailing`] is set.

use std::sync::Arc;

use hypercharts_core::{
    AnnualResult, Event, EventKind, EventSink, FinancialsResult, FiscalYearLabel, FiscalYearTotal,
};
use serde::{Deserialize, Serialize};

/// Settings for [`Annualizer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualizerConfig {
    /// Flush the final, in-progress year when the records run out (default: false).
    pub flush_trailing: bool,
}

/// Sums quarterly net income into fiscal-year totals.
#[derive(Debug, Clone)]
pub struct Annualizer {
    config: AnnualizerConfig,
    sink: Arc<dyn EventSink>,
}

impl Annualizer {
    /// Create an annualizer with the default configuration.
    #[must_use]
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self::with_config(AnnualizerConfig::default(), sink)
    }

    /// Create an annualizer with a custom configuration.
    #[must_use]
    pub const fn with_config(config: AnnualizerConfig, sink: Arc<dyn EventSink>) -> Self {
        Self { config, sink }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &AnnualizerConfig {
        &self.config
    }

    /// Aggregate net income per fiscal year.
    ///
    /// Records must already be grouped by year; they are not sorted. A net
    /// income that is not a JSON number counts as zero.
    #[must_use]
    pub fn annualize(&self, financials: &FinancialsResult) -> AnnualResult {
        let mut per_year = Vec::new();
        let mut current: Option<i32> = None;
        let mut total = 0.0;

        for record in &financials.records {
            let year = record.quarter.year();
            if let Some(previous) = current.filter(|&previous| previous != year) {
                per_year.push(self.flush(financials, previous, total));
                total = 0.0;
            }
            current = Some(year);
            total += record.net_income.as_number().unwrap_or(0.0);
        }

        match current {
            Some(year) if self.config.flush_trailing => {
                per_year.push(self.flush(financials, year, total));
            }
            Some(year) => self.sink.debug(Event::new(
                EventKind::AnnualSummary,
                format!(
                    "{}: year {year:02} still open with {total}, not flushed",
                    financials.symbol
                ),
            )),
            None => {}
        }

        self.sink.info(Event::new(
            EventKind::AnnualSummary,
            format!(
                "{}: {} fiscal years from {} quarters",
                financials.symbol,
                per_year.len(),
                financials.records.len()
            ),
        ));

        AnnualResult {
            symbol: financials.symbol.clone(),
            per_year,
        }
    }

    fn flush(&self, financials: &FinancialsResult, year: i32, total: f64) -> FiscalYearTotal {
        let fiscal_year = FiscalYearLabel::new(year - 1);
        self.sink.info(Event::new(
            EventKind::YearFlushed,
            format!("{}: {fiscal_year} net income {total}", financials.symbol),
        ));
        FiscalYearTotal {
            fiscal_year,
            total_net_income: total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hypercharts_core::{Figure, QuarterRecord, Symbol};
    use hypercharts_sink::RecordingSink;

    fn financials(rows: &[(&str, Figure)]) -> FinancialsResult {
        FinancialsResult::new(
            Symbol::new("AAPL"),
            rows.iter()
                .map(|(quarter, income)| {
                    QuarterRecord::new(quarter.parse().unwrap()).with_net_income(income.clone())
                })
                .collect(),
        )
    }

    fn labels(result: &AnnualResult) -> Vec<String> {
        result
            .per_year
            .iter()
            .map(|y| y.fiscal_year.to_string())
            .collect()
    }

    #[test]
    fn test_flush_on_year_change_labels_previous_year() {
        let sink = Arc::new(RecordingSink::new());
        let data = financials(&[
            ("21 Q1", Figure::Number(10.0)),
            ("21 Q2", Figure::Number(20.0)),
            ("21 Q3", Figure::Number(30.0)),
            ("21 Q4", Figure::Number(40.0)),
            ("22 Q1", Figure::Number(5.0)),
        ]);

        let result = Annualizer::new(sink.clone()).annualize(&data);

        // Year 21 flushes as FY20 once 22 starts; the 5 from 22 Q1 stays open.
        assert_eq!(labels(&result), ["FY20"]);
        assert_relative_eq!(result.per_year[0].total_net_income, 100.0);
        assert_eq!(sink.count(EventKind::YearFlushed), 1);
    }

    #[test]
    fn test_trailing_flush_when_enabled() {
        let data = financials(&[
            ("21 Q1", Figure::Number(10.0)),
            ("21 Q2", Figure::Number(20.0)),
            ("22 Q1", Figure::Number(5.0)),
        ]);
        let config = AnnualizerConfig {
            flush_trailing: true,
        };

        let annualizer = Annualizer::with_config(config, Arc::new(RecordingSink::new()));
        let result = annualizer.annualize(&data);

        assert_eq!(labels(&result), ["FY20", "FY21"]);
        assert_relative_eq!(result.per_year[0].total_net_income, 30.0);
        assert_relative_eq!(result.per_year[1].total_net_income, 5.0);
    }

    #[test]
    fn test_non_numeric_income_counts_as_zero() {
        let data = financials(&[
            ("20 Q1", Figure::Number(10.0)),
            ("20 Q2", Figure::Unavailable),
            ("20 Q3", Figure::Text("12".into())),
            ("20 Q4", Figure::Number(-4.0)),
            ("21 Q1", Figure::Number(1.0)),
        ]);

        let result = Annualizer::new(Arc::new(RecordingSink::new())).annualize(&data);

        assert_eq!(labels(&result), ["FY19"]);
        assert_relative_eq!(result.per_year[0].total_net_income, 6.0);
    }

    #[test]
    fn test_non_contiguous_years_repeat_labels() {
        let data = financials(&[
            ("21 Q1", Figure::Number(1.0)),
            ("22 Q1", Figure::Number(2.0)),
            ("21 Q2", Figure::Number(3.0)),
            ("22 Q2", Figure::Number(4.0)),
        ]);

        let result = Annualizer::new(Arc::new(RecordingSink::new())).annualize(&data);

        assert_eq!(labels(&result), ["FY20", "FY21", "FY20"]);
        let totals: Vec<_> = result.per_year.iter().map(|y| y.total_net_income).collect();
        assert_eq!(totals, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_labels_are_not_zero_padded() {
        let data = financials(&[
            ("05 Q4", Figure::Number(1.0)),
            ("06 Q1", Figure::Number(2.0)),
            ("00 Q1", Figure::Number(3.0)),
            ("01 Q1", Figure::Number(4.0)),
        ]);

        let result = Annualizer::new(Arc::new(RecordingSink::new())).annualize(&data);

        assert_eq!(labels(&result), ["FY4", "FY5", "FY-1"]);
    }

    #[test]
    fn test_single_year_yields_nothing_by_default() {
        let data = financials(&[
            ("21 Q1", Figure::Number(1.0)),
            ("21 Q2", Figure::Number(2.0)),
        ]);
        let result = Annualizer::new(Arc::new(RecordingSink::new())).annualize(&data);
        assert!(result.per_year.is_empty());
    }

    #[test]
    fn test_empty_records() {
        let data = financials(&[]);
        let config = AnnualizerConfig {
            flush_trailing: true,
        };
        let annualizer = Annualizer::with_config(config, Arc::new(RecordingSink::new()));
        let result = annualizer.annualize(&data);
        assert!(result.per_year.is_empty());
        assert_eq!(result.symbol.as_str(), "AAPL");
    }
}
