//! CLI error types.

use docnav_config::ConfigError;
use docnav_site::{BuildError, IndexError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Index(#[from] IndexError),

    #[error("{0}")]
    Validation(String),
}
