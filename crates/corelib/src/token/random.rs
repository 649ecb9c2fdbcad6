//! Random partitioner token: an arbitrary precision integer in `[-1, 2^127]`.

use crate::token::traits::{Token, TokenError};
use num_bigint::BigInt;
use std::fmt;

/// Token produced by the Random partitioner.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RandomToken(pub BigInt);

impl Token for RandomToken {
    fn min_value() -> Self {
        RandomToken(BigInt::from(-1))
    }

    fn parse(text: &str) -> Result<Self, TokenError> {
        text.trim()
            .parse::<BigInt>()
            .map(RandomToken)
            .map_err(|e| TokenError::InvalidText(format!("{:?}: {}", text, e)))
    }
}

impl From<i64> for RandomToken {
    fn from(value: i64) -> Self {
        RandomToken(BigInt::from(value))
    }
}

impl fmt::Display for RandomToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
