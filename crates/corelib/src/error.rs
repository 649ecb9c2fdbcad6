//! Error types for the core library.

use std::net::IpAddr;

use thiserror::Error;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The partitioner class name matched none of the known partitioners.
    #[error("Unrecognized partitioner: {0}")]
    UnknownPartitioner(String),

    /// A host advertised a token string its partitioner cannot parse.
    #[error("Invalid token {token:?} owned by host {host}: {reason}")]
    InvalidToken {
        host: IpAddr,
        token: String,
        reason: String,
    },

    /// Two distinct hosts claim the same ring position.
    #[error("Token {token} is owned by both {first} and {second}")]
    DuplicateToken {
        token: String,
        first: IpAddr,
        second: IpAddr,
    },

    /// Tokens produced by different partitioners were compared.
    #[error("Token mismatch: expected a {expected} token, got a {found} token")]
    TokenMismatch {
        expected: &'static str,
        found: &'static str,
    },
}
