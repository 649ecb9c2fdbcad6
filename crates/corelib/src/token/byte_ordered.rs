//! Byte-ordered token implementation.

use crate::token::traits::{Token, TokenError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte-ordered token: the raw key bytes, compared unsigned and lexicographically.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ByteOrderedToken(pub Vec<u8>);

impl ByteOrderedToken {
    /// Creates a token directly from bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        ByteOrderedToken(bytes.into())
    }
}

impl Token for ByteOrderedToken {
    /// The empty byte string sorts before every other token.
    fn min_value() -> Self {
        ByteOrderedToken(Vec::new())
    }

    /// Nodes advertise byte-ordered tokens as hex strings.
    fn parse(text: &str) -> Result<Self, TokenError> {
        let text = text.trim();
        let text = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        if text.len() % 2 != 0 {
            return Err(TokenError::InvalidText(format!(
                "{:?}: odd number of hex digits",
                text
            )));
        }

        text.as_bytes()
            .chunks(2)
            .map(|pair| {
                std::str::from_utf8(pair)
                    .ok()
                    .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                    .ok_or_else(|| TokenError::InvalidText(format!("{:?}: not hex", text)))
            })
            .collect::<Result<Vec<u8>, _>>()
            .map(ByteOrderedToken)
    }
}

impl fmt::Display for ByteOrderedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
