//! Store errors.

use mapstyle_state::StyleError;
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while dispatching into the store.
///
/// A failed dispatch never publishes: the current document stays as it was.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transition rejected: {0}")]
    Transition(#[from] StyleError),

    #[error("batch transition {index} rejected: {source}")]
    Batch { index: usize, source: StyleError },
}

impl StoreError {
    /// The underlying transition error.
    pub fn style_error(&self) -> &StyleError {
        match self {
            StoreError::Transition(error) => error,
            StoreError::Batch { source, .. } => source,
        }
    }
}
