use std::time::Duration;

use clap::Parser;
use hypercharts::{
    AnnualizerConfig, ClientConfig, Credential, DEFAULT_BASE_URL, MissingFieldPolicy, Symbol,
};

use crate::error::CliError;

/// Fetch quarterly financials from Hypercharts and derive EPS, PE and annual totals.
#[derive(Debug, Parser)]
#[command(name = "hypercharts", version, about)]
pub(crate) struct Cli {
    /// Ticker symbols to report on.
    #[arg(required = true, value_name = "SYMBOL")]
    pub(crate) symbols: Vec<String>,

    /// Hypercharts API key.
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub(crate) api_key: Option<String>,

    /// API root URL.
    #[arg(long, env = "HYPERCHARTS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub(crate) base_url: String,

    /// Request timeout in seconds; 0 disables it.
    #[arg(long, env = "HYPERCHARTS_TIMEOUT_SECS", default_value_t = 30)]
    pub(crate) timeout_secs: u64,

    /// Include fiscal-year net income totals.
    #[arg(long)]
    pub(crate) annual: bool,

    /// Also flush the last, still open fiscal year.
    #[arg(long, requires = "annual")]
    pub(crate) flush_trailing: bool,

    /// Skip quarters with missing fields instead of stopping at the first one.
    #[arg(long)]
    pub(crate) skip_missing: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub(crate) pretty: bool,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    pub(crate) log_level: String,
}

impl Cli {
    pub(crate) fn client_config(&self) -> Result<ClientConfig, CliError> {
        let key = self.api_key.clone().unwrap_or_default();
        let credential = Credential::new(key, "API_KEY")?;
        let timeout = (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs));
        Ok(ClientConfig::new(credential)
            .with_base_url(self.base_url.clone())
            .with_timeout(timeout))
    }

    pub(crate) fn symbols(&self) -> Vec<Symbol> {
        self.symbols.iter().map(Symbol::new).collect()
    }

    pub(crate) const fn policy(&self) -> MissingFieldPolicy {
        if self.skip_missing {
            MissingFieldPolicy::Skip
        } else {
            MissingFieldPolicy::Stop
        }
    }

    pub(crate) const fn annualizer(&self) -> AnnualizerConfig {
        AnnualizerConfig {
            flush_trailing: self.flush_trailing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hypercharts::HyperError;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "hypercharts",
            "aapl",
            "msft",
            "--api-key",
            "k",
            "--annual",
            "--flush-trailing",
            "--skip-missing",
        ])
        .unwrap();
        let symbols: Vec<_> = cli.symbols().iter().map(|s| s.to_string()).collect();
        assert_eq!(symbols, ["AAPL", "MSFT"]);
        assert_eq!(cli.policy(), MissingFieldPolicy::Skip);
        assert!(cli.annualizer().flush_trailing);
        assert_eq!(cli.client_config().unwrap().credential.expose(), "k");
    }

    #[test]
    fn test_flush_trailing_requires_annual() {
        let result =
            Cli::try_parse_from(["hypercharts", "aapl", "--api-key", "k", "--flush-trailing"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let cli = Cli::try_parse_from([
            "hypercharts",
            "aapl",
            "--api-key",
            "k",
            "--timeout-secs",
            "0",
        ])
        .unwrap();
        assert_eq!(cli.client_config().unwrap().timeout, None);
    }

    #[test]
    fn test_empty_key_is_missing_credential() {
        let cli = Cli::try_parse_from(["hypercharts", "aapl", "--api-key", ""]).unwrap();
        let err = cli.client_config().unwrap_err();
        assert!(matches!(
            err,
            CliError::Config(HyperError::MissingCredential(ref var)) if var == "API_KEY"
        ));
    }
}
