//! Error taxonomy for the remote collection endpoint.

use thiserror::Error;

/// Failures a [`crate::service::TodoService`] call can produce
///
/// Everything is scoped to the single operation that failed; nothing here is
/// fatal to the process. Messages are user-readable - a refresh failure is
/// shown verbatim as the failure phase.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Transport- or HTTP-level failure (connection refused, non-success
    /// status, ...)
    #[error("network failure: {0}")]
    Network(String),

    /// The response arrived but its body could not be decoded
    #[error("malformed response body: {0}")]
    Decode(String),
}
