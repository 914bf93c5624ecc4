mod cli;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use hypercharts::{HyperchartsClient, Pipeline, TracingSink};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::CliError;
use crate::output::SymbolOutput;

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if let Err(error) = run(&cli) {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = cli.client_config()?;
    let sink = Arc::new(TracingSink::new());
    let client = HyperchartsClient::new(config, sink.clone())?;
    let pipeline = Pipeline::new(Arc::new(client), sink)
        .with_policy(cli.policy())
        .with_annualizer(cli.annualizer());

    let symbols = cli.symbols();
    let runtime = tokio::runtime::Runtime::new()?;
    let results = runtime.block_on(pipeline.report_many(&symbols, cli.annual));

    let outputs: Vec<_> = results
        .into_iter()
        .map(|(symbol, result)| SymbolOutput::new(symbol, result))
        .collect();
    output::render(&outputs, cli.pretty, std::io::stdout().lock())?;

    let failed = outputs.iter().filter(|o| o.is_failure()).count();
    if failed > 0 {
        tracing::warn!(failed, total = outputs.len(), "Some symbols failed");
        return Err(CliError::SymbolsFailed {
            failed,
            total: outputs.len(),
        });
    }
    Ok(())
}
