//! Random partitioner implementation.

use crate::partitioner::traits::Partitioner;
use crate::token::random::RandomToken;
use md5::{Digest, Md5};
use num_bigint::BigInt;

/// Random partitioner: the absolute value of the key's MD5 digest, read as a
/// big-endian two's complement integer.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPartitioner;

impl Partitioner for RandomPartitioner {
    type TokenType = RandomToken;

    fn hash(&self, key: &[u8]) -> Self::TokenType {
        let digest = Md5::digest(key);
        let (_sign, magnitude) = BigInt::from_signed_bytes_be(&digest).into_parts();
        RandomToken(BigInt::from(magnitude))
    }

    fn name(&self) -> &'static str {
        "RandomPartitioner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;

    #[test]
    fn test_md5_tokens() {
        for (key, expected) in [
            (&b""[..], "58332598431525814501020785164969033090"),
            (&b"test"[..], "12707736894140473154801792860916528374"),
            (&[1u8, 2, 3][..], "109712572451545033270940500418367266732"),
        ] {
            assert_eq!(RandomPartitioner.hash(key), RandomToken::parse(expected).unwrap());
        }
    }

    #[test]
    fn test_tokens_are_above_minimum() {
        let min = RandomPartitioner.min_token();
        for key in [&b"a"[..], &b"b"[..], &b"some longer key"[..]] {
            assert!(RandomPartitioner.hash(key) > min);
        }
    }
}
