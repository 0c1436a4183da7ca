//! Traceability client error types.

use sct_core::{ComponentType, Sctid};

/// Errors from traceability service calls.
#[derive(Debug, thiserror::Error)]
pub enum TraceabilityError {
    /// A lookup was asked for an identifier that is not a concept.
    /// Raised before any request is sent.
    #[error("{id} is a {found} identifier, activity lookups take concepts")]
    NotAConcept { id: Sctid, found: ComponentType },
    /// HTTP transport error, after retries were exhausted.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The service returned a non-2xx status.
    #[error("traceability service {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response body was not a page of activities.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
