use crate::selection::SelectionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
