//! Byte-ordered partitioner implementation.

use crate::partitioner::traits::Partitioner;
use crate::token::byte_ordered::ByteOrderedToken;

/// Byte-ordered partitioner: the key bytes are the token.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByteOrderedPartitioner;

impl Partitioner for ByteOrderedPartitioner {
    type TokenType = ByteOrderedToken;

    fn hash(&self, key: &[u8]) -> Self::TokenType {
        ByteOrderedToken::from_bytes(key)
    }

    fn name(&self) -> &'static str {
        "ByteOrderedPartitioner"
    }
}
