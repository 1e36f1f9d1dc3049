use thiserror::Error;

use crate::classifiers::ModelError;

/// Failures surfaced by selectors and combiners.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The selector was queried before it was set up: missing pool, missing
    /// build, or an unusable validation set.
    #[error("selector not ready: {0}")]
    Configuration(String),

    /// A selection round left nothing to combine.
    #[error("empty ensemble: {0}")]
    EmptyEnsemble(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A base model failed; passed through unchanged.
    #[error(transparent)]
    Model(#[from] ModelError),
}
