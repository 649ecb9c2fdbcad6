//! Murmur3 partitioner implementation.
//!
//! This is MurmurHash3 x64 128-bit with seed 0, keeping only the low 64-bit
//! word. It deliberately reproduces the reference database's quirk of treating
//! tail bytes as signed (Java `byte`) values, so tails containing bytes
//! `>= 0x80` hash differently than in the canonical C++ MurmurHash3.

use bytes::Buf;
use std::num::Wrapping;

use crate::partitioner::traits::Partitioner;
use crate::token::murmur3::Murmur3Token;

/// Murmur3 partitioner (Cassandra-compatible).
#[derive(Clone, Copy, Debug, Default)]
pub struct Murmur3Partitioner;

impl Murmur3Partitioner {
    /// Creates a streaming hasher, for keys that arrive in several parts.
    pub fn build_hasher(&self) -> Murmur3Hasher {
        Murmur3Hasher {
            total_len: 0,
            buf: [0; Murmur3Hasher::BUF_CAPACITY],
            h1: Wrapping(0),
            h2: Wrapping(0),
        }
    }

    /// Hashes a complete key in one go.
    pub fn hash_one(&self, data: &[u8]) -> Murmur3Token {
        let mut hasher = self.build_hasher();
        hasher.write(data);
        hasher.finish()
    }
}

impl Partitioner for Murmur3Partitioner {
    type TokenType = Murmur3Token;

    fn hash(&self, key: &[u8]) -> Self::TokenType {
        self.hash_one(key)
    }

    fn name(&self) -> &'static str {
        "Murmur3Partitioner"
    }
}

/// Incremental Murmur3 state.
///
/// Feeding the same bytes in any chunking yields the same token as
/// [`Murmur3Partitioner::hash_one`].
#[derive(Clone, Debug)]
pub struct Murmur3Hasher {
    total_len: usize,
    buf: [u8; Self::BUF_CAPACITY],
    h1: Wrapping<i64>,
    h2: Wrapping<i64>,
}

impl Murmur3Hasher {
    const BUF_CAPACITY: usize = 16;

    const C1: Wrapping<i64> = Wrapping(0x87c3_7b91_1142_53d5_u64 as i64);
    const C2: Wrapping<i64> = Wrapping(0x4cf5_ad43_2745_937f_u64 as i64);

    fn hash_16_bytes(&mut self, mut k1: Wrapping<i64>, mut k2: Wrapping<i64>) {
        k1 *= Self::C1;
        k1 = Self::rotl64(k1, 31);
        k1 *= Self::C2;
        self.h1 ^= k1;

        self.h1 = Self::rotl64(self.h1, 27);
        self.h1 += self.h2;
        self.h1 = self.h1 * Wrapping(5) + Wrapping(0x52dce729);

        k2 *= Self::C2;
        k2 = Self::rotl64(k2, 33);
        k2 *= Self::C1;
        self.h2 ^= k2;

        self.h2 = Self::rotl64(self.h2, 31);
        self.h2 += self.h1;
        self.h2 = self.h2 * Wrapping(5) + Wrapping(0x38495ab5);
    }

    fn fetch_16_bytes(buf: &mut &[u8]) -> (Wrapping<i64>, Wrapping<i64>) {
        let k1 = Wrapping(buf.get_i64_le());
        let k2 = Wrapping(buf.get_i64_le());
        (k1, k2)
    }

    #[inline]
    fn rotl64(v: Wrapping<i64>, n: u32) -> Wrapping<i64> {
        Wrapping(v.0.rotate_left(n))
    }

    #[inline]
    fn fmix(mut k: Wrapping<i64>) -> Wrapping<i64> {
        k ^= Wrapping((k.0 as u64 >> 33) as i64);
        k *= Wrapping(0xff51afd7ed558ccd_u64 as i64);
        k ^= Wrapping((k.0 as u64 >> 33) as i64);
        k *= Wrapping(0xc4ceb9fe1a85ec53_u64 as i64);
        k ^= Wrapping((k.0 as u64 >> 33) as i64);

        k
    }

    /// Feeds the next part of the key.
    pub fn write(&mut self, mut data: &[u8]) {
        let mut buf_len = self.total_len % Self::BUF_CAPACITY;
        self.total_len += data.len();

        // Top up a partially filled buffer first, if the new data completes it.
        if buf_len > 0 && Self::BUF_CAPACITY - buf_len <= data.len() {
            let to_write = Self::BUF_CAPACITY - buf_len;
            self.buf[buf_len..].copy_from_slice(&data[..to_write]);
            data.advance(to_write);

            let mut block = &self.buf[..];
            let (k1, k2) = Self::fetch_16_bytes(&mut block);
            debug_assert!(block.is_empty());
            self.hash_16_bytes(k1, k2);
            buf_len = 0;
        }

        // Whole blocks are hashed straight from the input.
        if buf_len == 0 {
            while data.len() >= Self::BUF_CAPACITY {
                let (k1, k2) = Self::fetch_16_bytes(&mut data);
                self.hash_16_bytes(k1, k2);
            }
        }

        debug_assert!(buf_len + data.len() < Self::BUF_CAPACITY);
        self.buf[buf_len..buf_len + data.len()].copy_from_slice(data);
    }

    /// Computes the token of everything written so far. Does not reset the state.
    pub fn finish(&self) -> Murmur3Token {
        let mut h1 = self.h1;
        let mut h2 = self.h2;

        let mut k1 = Wrapping(0_i64);
        let mut k2 = Wrapping(0_i64);

        let buf_len = self.total_len % Self::BUF_CAPACITY;

        // Tail bytes are sign-extended before shifting.
        if buf_len > 8 {
            for i in (8..buf_len).rev() {
                k2 ^= Wrapping(self.buf[i] as i8 as i64) << ((i - 8) * 8);
            }

            k2 *= Self::C2;
            k2 = Self::rotl64(k2, 33);
            k2 *= Self::C1;
            h2 ^= k2;
        }

        if buf_len > 0 {
            for i in (0..buf_len.min(8)).rev() {
                k1 ^= Wrapping(self.buf[i] as i8 as i64) << (i * 8);
            }

            k1 *= Self::C1;
            k1 = Self::rotl64(k1, 31);
            k1 *= Self::C2;
            h1 ^= k1;
        }

        h1 ^= Wrapping(self.total_len as i64);
        h2 ^= Wrapping(self.total_len as i64);

        h1 += h2;
        h2 += h1;

        h1 = Self::fmix(h1);
        h2 = Self::fmix(h2);

        h1 += h2;

        // i64::MIN is the ring minimum and is never handed out as a key's token.
        Murmur3Token(if h1.0 == i64::MIN { i64::MAX } else { h1.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_vectors() {
        // Values computed by the database itself.
        let vectors: &[(&[u8], i64)] = &[
            (&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16], -5563837382979743776),
            (&[2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17], -1513403162740402161),
            (&[3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18], -495360443712684655),
            (&[4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19], 1734091135765407943),
            (&[5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20], -3199412112042527988),
            (&[6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21], -6316563938475080831),
            (&[7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22], 8228893370679682632),
            (&[0; 16], 5457549051747178710),
            (&[255; 16], -2824192546314762522),
            (&[254; 16], -833317529301936754),
            (&[0, 1, 2, 3, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255], 6463632673159404390),
            (&[254; 17], -1672437813826982685),
            (&[254, 254, 254, 254], 4566408979886474012),
            (&[0, 0, 0, 0], -3485513579396041028),
            (&[0, 1, 127, 127], 6573459401642635627),
            (&[0, 255, 255, 255], 123573637386978882),
            (&[255, 1, 2, 3], -2839127690952877842),
            (&[226, 231], -8582699461035929883),
            (&[226, 231, 226, 231, 226, 231, 1], 2222373981930033306),
        ];

        for (input, expected) in vectors {
            assert_eq!(
                Murmur3Partitioner.hash_one(input),
                Murmur3Token(*expected),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_string_keys() {
        for (key, expected) in [
            ("test", -6017608668500074083),
            ("xd", 4507812186440344727),
            ("primary_key", -1632642444691073360),
            ("kremówki", 4354931215268080151),
        ] {
            assert_eq!(Murmur3Partitioner.hash(key.as_bytes()), Murmur3Token(expected));
        }
    }

    #[test]
    fn test_empty_input() {
        let first = Murmur3Partitioner.hash_one(&[]);
        assert_eq!(first, Murmur3Partitioner.hash_one(&[]));
        assert_eq!(first, Murmur3Token(0));
    }

    #[test]
    fn test_finish_does_not_consume_state() {
        let mut hasher = Murmur3Partitioner.build_hasher();
        hasher.write(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let partial = hasher.finish();
        assert_eq!(partial, hasher.finish());
        hasher.write(&[9, 10, 11, 12, 13, 14, 15, 16]);
        assert_eq!(hasher.finish(), Murmur3Token(-5563837382979743776));
    }

    proptest! {
        #[test]
        fn prop_chunking_does_not_change_token(
            data in proptest::collection::vec(any::<u8>(), 0..100),
            cuts in proptest::collection::vec(any::<prop::sample::Index>(), 0..4),
        ) {
            let mut points: Vec<usize> = cuts.iter().map(|c| c.index(data.len() + 1)).collect();
            points.sort_unstable();

            let mut hasher = Murmur3Partitioner.build_hasher();
            let mut start = 0;
            for point in points {
                hasher.write(&data[start..point]);
                start = point;
            }
            hasher.write(&data[start..]);

            prop_assert_eq!(hasher.finish(), Murmur3Partitioner.hash_one(&data));
        }
    }
}
