//! Core partitioner trait definitions.

use crate::token::Token;

/// A partitioner converts serialized partition keys into tokens for placement
/// on the hash ring.
///
/// Partitioners are stateless and thread-safe, allowing concurrent
/// token generation without synchronization overhead.
pub trait Partitioner: Send + Sync + 'static {
    /// The token type produced by this partitioner.
    type TokenType: Token;

    /// Converts a serialized partition key into a token.
    ///
    /// Never fails: every byte sequence, including the empty one, has a token.
    fn hash(&self, key: &[u8]) -> Self::TokenType;

    /// Returns the minimum token value for this partitioner.
    fn min_token(&self) -> Self::TokenType {
        Self::TokenType::min_value()
    }

    /// Returns the short class name of this partitioner.
    fn name(&self) -> &'static str;
}
