//! CLI error types.

use std::path::PathBuf;

use flipcard_assets::PublishError;
use flipcard_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Publish(#[from] PublishError),

    #[error("{0}")]
    Build(String),

    #[error("{0}")]
    Validation(String),
}
