//! Murmur3 token implementation (Cassandra-compatible).

use crate::token::traits::{Token, TokenError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token produced by the Murmur3 partitioner: a signed 64-bit ring position.
///
/// `i64::MIN` is the ring minimum. Hashing never yields it; see
/// [`Murmur3Partitioner`](crate::partitioner::murmur3::Murmur3Partitioner).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Murmur3Token(pub i64);

impl Murmur3Token {
    /// Wraps a raw token value as-is.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Murmur3Token(value)
    }

    #[inline]
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl Token for Murmur3Token {
    fn min_value() -> Self {
        Murmur3Token(i64::MIN)
    }

    fn parse(text: &str) -> Result<Self, TokenError> {
        text.trim()
            .parse::<i64>()
            .map(Murmur3Token)
            .map_err(|e| TokenError::InvalidText(format!("{:?}: {}", text, e)))
    }
}

impl From<i64> for Murmur3Token {
    fn from(value: i64) -> Self {
        Murmur3Token(value)
    }
}

impl fmt::Display for Murmur3Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Murmur3Token::parse("0"), Ok(Murmur3Token(0)));
        assert_eq!(
            Murmur3Token::parse("-9223372036854775808"),
            Ok(Murmur3Token::min_value())
        );
        assert_eq!(Murmur3Token::parse(" 42 "), Ok(Murmur3Token(42)));
        assert!(Murmur3Token::parse("ten").is_err());
        assert!(Murmur3Token::parse("9223372036854775808").is_err());
    }

    #[test]
    fn test_ordering_is_signed() {
        assert!(Murmur3Token(-1) < Murmur3Token(0));
        assert!(Murmur3Token::min_value() < Murmur3Token(-5563837382979743776));
        assert!(Murmur3Token::min_value().is_min());
    }
}
