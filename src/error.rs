//! Error types for the relay server
//!
//! Only startup and serving failures surface as `RelayError`. Failures that
//! belong to a single peer (a send to a dead socket, a malformed payload)
//! are handled where they occur and never reach this type.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Result type for relay operations
pub type RelayResult<T> = Result<T, RelayError>;

/// Errors that can stop the relay server
#[derive(Debug, Error)]
pub enum RelayError {
    /// An environment variable held a value that could not be parsed
    #[error("invalid value {value:?} for {var}")]
    Config { var: &'static str, value: String },

    /// The listener could not be bound
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// The host/port pair did not form a socket address
    #[error("invalid listen address {0:?}")]
    Address(String),

    /// The HTTP server stopped with an I/O error
    #[error("server error: {0}")]
    Serve(#[from] io::Error),

    /// An outbound control message could not be encoded
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err = RelayError::Config {
            var: "PORT",
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value \"abc\" for PORT");
    }

    #[test]
    fn test_io_error_converts() {
        let err: RelayError = io::Error::new(io::ErrorKind::Other, "boom").into();
        assert!(matches!(err, RelayError::Serve(_)));
    }
}
