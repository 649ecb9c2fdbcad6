//! Ring position implementation.

use crate::error::{Error, Result};
use crate::partitioner::TokenFactory;
use crate::token::{ByteOrderedToken, Murmur3Token, RandomToken};
use std::cmp::Ordering;
use std::fmt;

/// A position on the consistent hash ring.
///
/// Tags a token with the partitioner that produced it. Positions of the same
/// partitioner are totally ordered; positions of different partitioners are
/// not comparable at all: `partial_cmp` returns `None` and
/// [`try_cmp`](Self::try_cmp) fails with [`Error::TokenMismatch`].
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RingPosition {
    Murmur3(Murmur3Token),
    Random(RandomToken),
    ByteOrdered(ByteOrderedToken),
}

impl RingPosition {
    /// The partitioner this position belongs to.
    pub fn partitioner(&self) -> TokenFactory {
        match self {
            RingPosition::Murmur3(_) => TokenFactory::Murmur3,
            RingPosition::Random(_) => TokenFactory::Random,
            RingPosition::ByteOrdered(_) => TokenFactory::ByteOrdered,
        }
    }

    /// Compares two positions, failing if they come from different partitioners.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering> {
        self.partial_cmp(other).ok_or_else(|| Error::TokenMismatch {
            expected: self.partitioner().name(),
            found: other.partitioner().name(),
        })
    }
}

impl PartialOrd for RingPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (RingPosition::Murmur3(a), RingPosition::Murmur3(b)) => Some(a.cmp(b)),
            (RingPosition::Random(a), RingPosition::Random(b)) => Some(a.cmp(b)),
            (RingPosition::ByteOrdered(a), RingPosition::ByteOrdered(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<Murmur3Token> for RingPosition {
    fn from(token: Murmur3Token) -> Self {
        RingPosition::Murmur3(token)
    }
}

impl From<RandomToken> for RingPosition {
    fn from(token: RandomToken) -> Self {
        RingPosition::Random(token)
    }
}

impl From<ByteOrderedToken> for RingPosition {
    fn from(token: ByteOrderedToken) -> Self {
        RingPosition::ByteOrdered(token)
    }
}

impl fmt::Display for RingPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingPosition::Murmur3(t) => t.fmt(f),
            RingPosition::Random(t) => t.fmt(f),
            RingPosition::ByteOrdered(t) => t.fmt(f),
        }
    }
}
