use alloy_transport::TransportError;
use thiserror::Error;

/// Errors raised by a chain client.
#[derive(Debug, Error)]
pub enum ChainClientError {
    /// The JSON-RPC request failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The node URL could not be parsed.
    #[error("invalid node url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be built.
    #[error("building http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl PartialEq for ChainClientError {
    fn eq(&self, other: &Self) -> bool {
        use ChainClientError::*;
        match (self, other) {
            (Transport(a), Transport(b)) => a.to_string() == b.to_string(),
            (InvalidUrl(a), InvalidUrl(b)) => a == b,
            (HttpClient(a), HttpClient(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

impl Eq for ChainClientError {}

impl ChainClientError {
    /// A transport error carrying a custom message. Used by test doubles.
    pub fn custom(message: &str) -> Self {
        Self::Transport(alloy_transport::TransportErrorKind::custom_str(message))
    }
}
