use thiserror::Error;

use crate::transport::TransportError;

/// Store-level failure taxonomy. The store flattens these to a message
/// string in `last_error`; callers branch on whether an operation returned
/// a usable result, not on the kind.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
