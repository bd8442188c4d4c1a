//! Error types for the catalog and suggestion clients.

use thiserror::Error;

/// Failures below the catalog semantics: the request itself or its status
#[derive(Error, Debug)]
pub(crate) enum HttpError {
    /// Network, DNS, TLS or timeout failure
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-2xx status code
    #[error("YTS API error ({status}): {body}")]
    Status { status: u16, body: String },
}

/// Errors returned by [`CatalogClient`](crate::CatalogClient)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The query was valid but matched nothing
    #[error("No results found.")]
    NoResults,

    /// The requested movie is missing or its record could not be read
    #[error("Movie not found: {0}")]
    NotFound(String),

    /// The catalog could not be reached or answered garbage
    #[error("Catalog request failed: {0}")]
    Transport(String),
}

impl From<HttpError> for CatalogError {
    fn from(err: HttpError) -> Self {
        CatalogError::Transport(err.to_string())
    }
}

/// Errors returned by [`SuggestionsClient`](crate::SuggestionsClient)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendationError {
    #[error("Suggestions request failed: {0}")]
    Transport(String),
}

impl From<HttpError> for RecommendationError {
    fn from(err: HttpError) -> Self {
        RecommendationError::Transport(err.to_string())
    }
}
