//! Core token trait definitions.
//!
//! The `Token` trait is minimal so the ring and partitioners work without
//! knowing the concrete representation. The partitioner-agnostic view used by
//! the ring lives in [`RingPosition`](crate::ring::RingPosition).

use std::fmt::Debug;
use std::hash::Hash;

/// Errors that can occur when parsing tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The string is not a valid textual token for this token type.
    InvalidText(String),
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::InvalidText(s) => write!(f, "invalid token text: {}", s),
        }
    }
}

impl std::error::Error for TokenError {}

/// Minimal token trait for the hash ring.
///
/// Tokens are immutable, comparable positions. Implementations must be
/// thread-safe and cheap to compare/hash.
pub trait Token: Clone + Ord + Hash + Send + Sync + Debug + 'static {
    /// Minimum token value (start of ring). Never produced by hashing.
    fn min_value() -> Self;

    /// True if this token is the minimum.
    fn is_min(&self) -> bool {
        *self == Self::min_value()
    }

    /// Parses the textual form a node advertises for its tokens.
    fn parse(text: &str) -> Result<Self, TokenError>;
}
