//! Provider error type shared by all ports

use thiserror::Error;

/// Result type for provider calls
pub type ProviderResult<T> = Result<T, ProviderError>;

/// A control-plane call that did not succeed
///
/// Every variant is treated as fatal by the orchestrator; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The call ran and reported failure
    #[error("{operation} failed: {message}")]
    CommandFailed { operation: String, message: String },

    /// The call succeeded but its output could not be understood
    #[error("{operation} returned an unexpected response: {message}")]
    MalformedResponse { operation: String, message: String },

    /// The provider tool could not be started
    #[error("provider tool unavailable: {0}")]
    Unavailable(String),

    /// A local document needed by the call could not be written
    #[error("{operation} could not prepare local input: {message}")]
    LocalIo { operation: String, message: String },
}

impl ProviderError {
    pub fn failed(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CommandFailed {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn malformed(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            operation: operation.into(),
            message: message.into(),
        }
    }
}
