//! JSON rendering of per-symbol outcomes.

use std::io::Write;

use hypercharts::{HyperError, Result, Symbol, SymbolReport};
use serde::Serialize;

use crate::error::CliError;

/// One entry of the output array.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum SymbolOutput {
    Report {
        symbol: Symbol,
        report: SymbolReport,
    },
    Failure {
        symbol: Symbol,
        error: ErrorBody,
    },
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
}

impl From<&HyperError> for ErrorBody {
    fn from(error: &HyperError) -> Self {
        Self {
            message: error.to_string(),
            status: error.status(),
        }
    }
}

impl SymbolOutput {
    pub(crate) fn new(symbol: Symbol, result: Result<SymbolReport>) -> Self {
        match result {
            Ok(report) => Self::Report { symbol, report },
            Err(error) => Self::Failure {
                symbol,
                error: ErrorBody::from(&error),
            },
        }
    }

    pub(crate) const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

pub(crate) fn render(
    outputs: &[SymbolOutput],
    pretty: bool,
    mut writer: impl Write,
) -> std::result::Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, outputs)?;
    } else {
        serde_json::to_writer(&mut writer, outputs)?;
    }
    writeln!(writer)?;
    Ok(())
}
