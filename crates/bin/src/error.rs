use hypercharts::HyperError;
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] HyperError),

    #[error("{failed} of {total} symbols failed")]
    SymbolsFailed { failed: usize, total: usize },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::SymbolsFailed { .. } | Self::Serialization(_) | Self::Io(_) => 1,
        }
    }
}
