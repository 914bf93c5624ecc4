//! EPS and PE calculations.
//!
//! Both ratios are total functions: any input that cannot produce a number
//! yields [`Ratio::Unavailable`]. The two differ in how forgiving they are.
//! [`eps`] converts numeric strings, while [`pe`] only accepts real numbers
//! and never converts.

use std::sync::Arc;

use hypercharts_core::{
    Event, EventKind, EventSink, Figure, FinancialsResult, QuarterRatio, Ratio, RatioResult,
};

/// Decimal places kept for EPS.
pub const EPS_DECIMALS: usize = 3;

/// Earnings per share: `net_income / outstanding_shares`, rounded to
/// [`EPS_DECIMALS`] places.
///
/// Unavailable if either input is missing or non-numeric, or if the share
/// count is zero.
#[must_use]
pub fn eps(net_income: &Figure, outstanding_shares: &Figure) -> Ratio {
    let (Some(income), Some(shares)) = (net_income.to_f64(), outstanding_shares.to_f64()) else {
        return Ratio::Unavailable;
    };
    if shares == 0.0 {
        return Ratio::Unavailable;
    }
    let value = income / shares;
    if value.is_finite() {
        Ratio::Value(round_decimal(value, EPS_DECIMALS))
    } else {
        Ratio::Unavailable
    }
}

/// Price/earnings: `stock_price / eps`, rounded to a whole number.
///
/// Only computed when the price is a JSON number and the EPS is available;
/// numeric strings are not converted. Unavailable when EPS is zero.
#[must_use]
pub fn pe(stock_price: &Figure, eps: Ratio) -> Ratio {
    let (Some(price), Ratio::Value(eps)) = (stock_price.as_number(), eps) else {
        return Ratio::Unavailable;
    };
    if eps == 0.0 {
        return Ratio::Unavailable;
    }
    let value = (price / eps).round_ties_even();
    if value.is_finite() {
        Ratio::Value(value)
    } else {
        Ratio::Unavailable
    }
}

/// Round to `decimals` places using the decimal expansion of the value.
///
/// Scaling by a power of ten first would round the scaled binary value
/// instead, which disagrees with decimal rounding on inputs like `1.0005`.
fn round_decimal(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Applies [`eps`] and [`pe`] across a [`FinancialsResult`].
#[derive(Debug, Clone)]
pub struct RatioCalculator {
    sink: Arc<dyn EventSink>,
}

impl RatioCalculator {
    /// Create a calculator reporting to `sink`.
    #[must_use]
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }

    /// EPS for every quarter, in record order.
    #[must_use]
    pub fn eps_per_quarter(&self, financials: &FinancialsResult) -> RatioResult {
        let per_quarter = financials
            .records
            .iter()
            .map(|record| {
                let ratio = eps(&record.net_income, &record.outstanding_shares);
                self.sink.debug(Event::new(
                    EventKind::EpsCalculated,
                    format!("{} {}: EPS {ratio}", financials.symbol, record.quarter),
                ));
                QuarterRatio {
                    quarter: record.quarter.clone(),
                    ratio,
                }
            })
            .collect();

        self.finish("EPS", financials, per_quarter)
    }

    /// PE for every quarter, in record order.
    ///
    /// Each quarter's PE uses its own stock price and its own EPS, computed
    /// here with [`eps`].
    #[must_use]
    pub fn pe_per_quarter(&self, financials: &FinancialsResult) -> RatioResult {
        let per_quarter = financials
            .records
            .iter()
            .map(|record| {
                let quarter_eps = eps(&record.net_income, &record.outstanding_shares);
                let ratio = pe(&record.stock_price, quarter_eps);
                self.sink.debug(Event::new(
                    EventKind::PeCalculated,
                    format!(
                        "{} {}: PE {ratio} (EPS {quarter_eps})",
                        financials.symbol, record.quarter
                    ),
                ));
                QuarterRatio {
                    quarter: record.quarter.clone(),
                    ratio,
                }
            })
            .collect();

        self.finish("PE", financials, per_quarter)
    }

    fn finish(
        &self,
        name: &str,
        financials: &FinancialsResult,
        per_quarter: Vec<QuarterRatio>,
    ) -> RatioResult {
        let result = RatioResult {
            symbol: financials.symbol.clone(),
            per_quarter,
        };
        let available = result.iter().filter(|(_, r)| r.is_available()).count();
        let event = Event::new(
            EventKind::RatioSummary,
            format!(
                "{}: {name} available for {available} of {} quarters",
                result.symbol,
                result.len()
            ),
        );
        if available < result.len() {
            self.sink.warn(event);
        } else {
            self.sink.info(event);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hypercharts_core::{QuarterRecord, Symbol};
    use hypercharts_sink::RecordingSink;
    use rstest::rstest;

    fn n(v: f64) -> Figure {
        Figure::Number(v)
    }

    #[rstest]
    #[case(1000.0, 400.0, 2.5)]
    #[case(100.0, 3.0, 33.333)]
    #[case(200.0, 3.0, 66.667)]
    #[case(-57_411_000_000.0, 16_406_000_000.0, -3.499)]
    #[case(0.0, 10.0, 0.0)]
    #[case(1.0, 7.0, 0.143)]
    fn test_eps_rounds_to_three_decimals(
        #[case] income: f64,
        #[case] shares: f64,
        #[case] expected: f64,
    ) {
        assert_eq!(eps(&n(income), &n(shares)), Ratio::Value(expected));
    }

    #[test]
    fn test_eps_decimal_rounding() {
        // 1.0005 is stored as 1.000499999..., so it rounds down.
        assert_eq!(eps(&n(1.0005), &n(1.0)), Ratio::Value(1.0));
    }

    #[test]
    fn test_eps_converts_numeric_text() {
        assert_eq!(eps(&"1000".into(), &n(400.0)), Ratio::Value(2.5));
        assert_eq!(eps(&n(1000.0), &" 400 ".into()), Ratio::Value(2.5));
    }

    #[rstest]
    #[case(n(100.0), n(0.0))]
    #[case(n(-5.0), n(0.0))]
    #[case(n(100.0), "bad".into())]
    #[case(Figure::Unavailable, n(10.0))]
    #[case(n(10.0), Figure::Unavailable)]
    #[case("".into(), n(10.0))]
    #[case("NaN".into(), n(10.0))]
    fn test_eps_unavailable(#[case] income: Figure, #[case] shares: Figure) {
        assert_eq!(eps(&income, &shares), Ratio::Unavailable);
    }

    #[test]
    fn test_pe_basic() {
        assert_eq!(pe(&n(100.0), Ratio::Value(5.0)), Ratio::Value(20.0));
        assert_eq!(pe(&n(100.0), Ratio::Value(3.0)), Ratio::Value(33.0));
        assert_eq!(pe(&n(100.0), Ratio::Value(-8.0)), Ratio::Value(-12.0));
    }

    #[test]
    fn test_pe_rounds_half_to_even() {
        assert_eq!(pe(&n(25.0), Ratio::Value(10.0)), Ratio::Value(2.0));
        assert_eq!(pe(&n(35.0), Ratio::Value(10.0)), Ratio::Value(4.0));
    }

    #[rstest]
    #[case(n(100.0), Ratio::Value(0.0))]
    #[case(n(100.0), Ratio::Unavailable)]
    #[case("100".into(), Ratio::Value(5.0))]
    #[case(Figure::Unavailable, Ratio::Value(5.0))]
    fn test_pe_unavailable(#[case] price: Figure, #[case] eps: Ratio) {
        assert_eq!(pe(&price, eps), Ratio::Unavailable);
    }

    fn financials() -> FinancialsResult {
        FinancialsResult::new(
            Symbol::new("AAPL"),
            vec![
                QuarterRecord::new("21 Q1".parse().unwrap())
                    .with_stock_price(120.0)
                    .with_net_income(1000.0)
                    .with_outstanding_shares(400.0),
                QuarterRecord::new("21 Q2".parse().unwrap())
                    .with_stock_price(130.0)
                    .with_net_income(900.0)
                    .with_outstanding_shares(0.0),
                QuarterRecord::new("21 Q3".parse().unwrap())
                    .with_stock_price("140")
                    .with_net_income(1200.0)
                    .with_outstanding_shares(400.0),
                QuarterRecord::new("21 Q4".parse().unwrap())
                    .with_stock_price(150.0)
                    .with_net_income(100.0)
                    .with_outstanding_shares(3.0),
            ],
        )
    }

    #[test]
    fn test_eps_per_quarter() {
        let sink = Arc::new(RecordingSink::new());
        let result = RatioCalculator::new(sink.clone()).eps_per_quarter(&financials());

        assert_eq!(result.symbol.as_str(), "AAPL");
        let labels: Vec<_> = result.iter().map(|(q, _)| q.as_str()).collect();
        assert_eq!(labels, ["21 Q1", "21 Q2", "21 Q3", "21 Q4"]);
        assert_eq!(result.get("21 Q1"), Some(Ratio::Value(2.5)));
        assert_eq!(result.get("21 Q2"), Some(Ratio::Unavailable));
        assert_eq!(result.get("21 Q3"), Some(Ratio::Value(3.0)));
        assert_eq!(result.get("21 Q4"), Some(Ratio::Value(33.333)));

        assert_eq!(sink.count(EventKind::EpsCalculated), 4);
        assert_eq!(sink.count(EventKind::RatioSummary), 1);
    }

    #[test]
    fn test_pe_per_quarter() {
        let sink = Arc::new(RecordingSink::new());
        let result = RatioCalculator::new(sink.clone()).pe_per_quarter(&financials());

        assert_eq!(result.get("21 Q1"), Some(Ratio::Value(48.0)));
        assert_eq!(result.get("21 Q2"), Some(Ratio::Unavailable));
        // Text price is never converted for PE.
        assert_eq!(result.get("21 Q3"), Some(Ratio::Unavailable));
        let q4 = result.get("21 Q4").and_then(|r| r.value()).unwrap();
        assert_relative_eq!(q4, 5.0);

        assert_eq!(sink.count(EventKind::PeCalculated), 4);
    }

    #[test]
    fn test_ratios_are_deterministic() {
        let calculator = RatioCalculator::new(Arc::new(RecordingSink::new()));
        let data = financials();
        assert_eq!(
            calculator.eps_per_quarter(&data),
            calculator.eps_per_quarter(&data)
        );
        assert_eq!(
            calculator.pe_per_quarter(&data),
            calculator.pe_per_quarter(&data)
        );
    }

    #[test]
    fn test_empty_financials() {
        let calculator = RatioCalculator::new(Arc::new(RecordingSink::new()));
        let empty = FinancialsResult::new(Symbol::new("X"), Vec::new());
        assert!(calculator.eps_per_quarter(&empty).is_empty());
        assert!(calculator.pe_per_quarter(&empty).is_empty());
    }
}
