//! Search error types

use crate::error::AppError;

/// Result type for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors that can occur around search operations.
///
/// Ranking itself is total over its inputs; these errors only describe the
/// collaborators the aggregator depends on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The live complaint feed could not be subscribed to or reported a failure
    #[error("Complaint feed unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidConfiguration(msg) => AppError::Configuration(msg),
            SearchError::UpstreamUnavailable(msg) => AppError::Upstream(msg),
        }
    }
}
