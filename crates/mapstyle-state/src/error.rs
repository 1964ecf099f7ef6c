//! Error types for document transitions.

use thiserror::Error;

/// Result type alias for document operations.
pub type StyleResult<T> = Result<T, StyleError>;

/// Precondition failures raised by transitions.
///
/// These signal caller-contract violations; a transition never fabricates a
/// missing source to paper over one.
#[derive(Debug, Error)]
pub enum StyleError {
    /// The named source does not exist in the document.
    #[error("source not found: {source_name}")]
    SourceNotFound {
        /// The source name that was looked up.
        source_name: String,
    },

    /// The named source has no feature-data lifecycle (e.g. a raster source).
    #[error("source {source_name} does not carry feature data")]
    NoFeatureData {
        /// The source name.
        source_name: String,
    },

    /// A layer with the same id already exists and duplicates are rejected.
    #[error("duplicate layer id: {layer_id}")]
    DuplicateLayerId {
        /// The conflicting id.
        layer_id: String,
    },

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StyleError {
    /// Create a source not found error.
    #[inline]
    pub fn source_not_found(source_name: impl Into<String>) -> Self {
        StyleError::SourceNotFound {
            source_name: source_name.into(),
        }
    }

    /// Create a no feature data error.
    #[inline]
    pub fn no_feature_data(source_name: impl Into<String>) -> Self {
        StyleError::NoFeatureData {
            source_name: source_name.into(),
        }
    }

    /// Create a duplicate layer id error.
    #[inline]
    pub fn duplicate_layer_id(layer_id: impl Into<String>) -> Self {
        StyleError::DuplicateLayerId {
            layer_id: layer_id.into(),
        }
    }
}
