//! Orchestration of fetch, parse, ratio and annual stages.

use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use hypercharts_analysis::{
    Annualizer, AnnualizerConfig, MissingFieldPolicy, Parser, RatioCalculator,
};
use hypercharts_core::{
    AnnualResult, EventSink, FinancialsResult, FinancialsSource, RatioResult, Result, Symbol,
};

/// Everything derived for one symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymbolReport {
    /// Parsed quarter records.
    pub financials: FinancialsResult,
    /// EPS per quarter.
    pub eps: RatioResult,
    /// PE per quarter.
    pub pe: RatioResult,
    /// Fiscal-year totals, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual: Option<AnnualResult>,
}

/// Runs the stages in order for one or more symbols.
///
/// The pipeline owns no state beyond its components; every call fetches
/// afresh.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use hypercharts::{ClientConfig, HyperchartsClient, Pipeline, Symbol, TracingSink};
///
/// let sink = Arc::new(TracingSink::new());
/// let client = HyperchartsClient::new(ClientConfig::from_env()?, sink.clone())?;
/// let pipeline = Pipeline::new(Arc::new(client), sink);
///
/// let report = pipeline.report(&Symbol::new("AAPL"), true).await?;
/// ```
#[derive(Clone)]
pub struct Pipeline {
    source: Arc<dyn FinancialsSource>,
    sink: Arc<dyn EventSink>,
    parser: Parser,
    calculator: RatioCalculator,
    annualizer: Annualizer,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("source", &self.source.name())
            .field("policy", &self.parser.policy())
            .field("annualizer", self.annualizer.config())
            .finish()
    }
}

impl Pipeline {
    /// Create a pipeline with default parser and annualizer settings.
    #[must_use]
    pub fn new(source: Arc<dyn FinancialsSource>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            source,
            parser: Parser::new(sink.clone()),
            calculator: RatioCalculator::new(sink.clone()),
            annualizer: Annualizer::new(sink.clone()),
            sink,
        }
    }

    /// Set the parser's missing-field policy.
    #[must_use]
    pub fn with_policy(mut self, policy: MissingFieldPolicy) -> Self {
        self.parser = self.parser.with_policy(policy);
        self
    }

    /// Set the annualizer configuration.
    #[must_use]
    pub fn with_annualizer(mut self, config: AnnualizerConfig) -> Self {
        self.annualizer = Annualizer::with_config(config, self.sink.clone());
        self
    }

    /// Fetch and parse the financials for a symbol.
    ///
    /// # Errors
    ///
    /// Propagates fetch failures from the source unchanged.
    pub async fn financials(&self, symbol: &Symbol) -> Result<FinancialsResult> {
        debug!(
            source = self.source.name(),
            symbol = %symbol,
            "Fetching financials"
        );
        let raw = self.source.fetch_financials(symbol).await?;
        Ok(self.parser.parse(&raw, symbol))
    }

    /// Fetch, parse and derive ratios for a symbol.
    ///
    /// # Errors
    ///
    /// Propagates fetch failures from the source unchanged. Parse problems
    /// and unavailable ratios are part of the report, not errors.
    pub async fn report(&self, symbol: &Symbol, include_annual: bool) -> Result<SymbolReport> {
        let financials = self.financials(symbol).await?;
        if financials.is_partial() {
            warn!(
                symbol = %symbol,
                issues = financials.issues.len(),
                "Financials parsed with issues"
            );
        }

        let eps = self.calculator.eps_per_quarter(&financials);
        let pe = self.calculator.pe_per_quarter(&financials);
        let annual = include_annual.then(|| self.annualizer.annualize(&financials));

        Ok(SymbolReport {
            financials,
            eps,
            pe,
            annual,
        })
    }

    /// Run [`Pipeline::report`] for several symbols concurrently.
    ///
    /// Symbols are independent; one failing does not affect the others.
    /// Results come back in input order.
    pub async fn report_many(
        &self,
        symbols: &[Symbol],
        include_annual: bool,
    ) -> Vec<(Symbol, Result<SymbolReport>)> {
        debug!(symbol_count = symbols.len(), "Fetching batch reports");
        let reports = join_all(
            symbols
                .iter()
                .map(|symbol| self.report(symbol, include_annual)),
        )
        .await;
        symbols.iter().cloned().zip(reports).collect()
    }
}
