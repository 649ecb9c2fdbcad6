//! Partitioner resolution by class name.

use crate::error::{Error, Result};
use crate::partitioner::byte_ordered::ByteOrderedPartitioner;
use crate::partitioner::murmur3::Murmur3Partitioner;
use crate::partitioner::random::RandomPartitioner;
use crate::partitioner::traits::Partitioner;
use crate::ring::RingPosition;
use crate::token::{ByteOrderedToken, Murmur3Token, RandomToken, Token, TokenError};

/// Partitioner-agnostic token operations, selected from the partitioner class
/// name a cluster advertises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TokenFactory {
    #[default]
    Murmur3,
    Random,
    ByteOrdered,
}

impl TokenFactory {
    /// Resolves a fully qualified (`org.apache.cassandra.dht.Murmur3Partitioner`)
    /// or short (`Murmur3Partitioner`) partitioner class name.
    pub fn from_class_name(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.ends_with("Murmur3Partitioner") {
            Ok(TokenFactory::Murmur3)
        } else if name.ends_with("RandomPartitioner") {
            Ok(TokenFactory::Random)
        } else if name.ends_with("ByteOrderedPartitioner") {
            Ok(TokenFactory::ByteOrdered)
        } else {
            Err(Error::UnknownPartitioner(name.to_owned()))
        }
    }

    /// Hashes a serialized partition key.
    pub fn hash(&self, key: &[u8]) -> RingPosition {
        match self {
            TokenFactory::Murmur3 => Murmur3Partitioner.hash(key).into(),
            TokenFactory::Random => RandomPartitioner.hash(key).into(),
            TokenFactory::ByteOrdered => ByteOrderedPartitioner.hash(key).into(),
        }
    }

    /// Parses a token string in this partitioner's textual format.
    pub fn parse(&self, text: &str) -> std::result::Result<RingPosition, TokenError> {
        Ok(match self {
            TokenFactory::Murmur3 => Murmur3Token::parse(text)?.into(),
            TokenFactory::Random => RandomToken::parse(text)?.into(),
            TokenFactory::ByteOrdered => ByteOrderedToken::parse(text)?.into(),
        })
    }

    pub fn min_token(&self) -> RingPosition {
        match self {
            TokenFactory::Murmur3 => Murmur3Partitioner.min_token().into(),
            TokenFactory::Random => RandomPartitioner.min_token().into(),
            TokenFactory::ByteOrdered => ByteOrderedPartitioner.min_token().into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenFactory::Murmur3 => Murmur3Partitioner.name(),
            TokenFactory::Random => RandomPartitioner.name(),
            TokenFactory::ByteOrdered => ByteOrderedPartitioner.name(),
        }
    }
}
