//! Seed and identifier types
//!
//! The seed is the oracle's 256-bit random word. It is stored as 32
//! big-endian bytes so its encoding in the mixing preimage is fixed.

use crate::error::RevealError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a randomness request. `0` means "never requested".
pub type RequestId = u64;

/// Item (token) identifier
pub type ItemId = u64;

/// Width of a seed word in bytes
pub const SEED_BYTES: usize = 32;

/// 256-bit random word delivered by the oracle
///
/// Text form is `0x` followed by 64 lowercase hex digits. Parsing also
/// accepts shorter hex strings and decimal numbers up to 2^256 - 1.
///
/// # Example
/// ```
/// use booster_traits_core_rs::Seed;
///
/// let seed: Seed = "1337".parse().unwrap();
/// assert_eq!(seed, Seed::from_u64(1337));
/// assert_eq!(seed.as_bytes()[31], 0x39);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Seed([u8; SEED_BYTES]);

impl Seed {
    pub fn from_bytes(bytes: [u8; SEED_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn from_u64(value: u64) -> Self {
        Self::from_u128(value as u128)
    }

    pub fn from_u128(value: u128) -> Self {
        let mut bytes = [0u8; SEED_BYTES];
        bytes[16..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SEED_BYTES] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    fn parse_hex(digits: &str) -> Result<Self, RevealError> {
        if digits.is_empty() || digits.len() > SEED_BYTES * 2 {
            return Err(RevealError::InvalidSeed(format!(
                "hex seed must have 1 to {} digits, got {}",
                SEED_BYTES * 2,
                digits.len()
            )));
        }
        // Left-pad to a full word; odd lengths get one extra nibble
        let padded = format!("{:0>width$}", digits, width = SEED_BYTES * 2);
        let mut bytes = [0u8; SEED_BYTES];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| RevealError::InvalidSeed(format!("bad hex seed: {}", e)))?;
        Ok(Self(bytes))
    }

    fn parse_decimal(digits: &str) -> Result<Self, RevealError> {
        let mut bytes = [0u8; SEED_BYTES];
        for ch in digits.chars() {
            let digit = ch
                .to_digit(10)
                .ok_or_else(|| RevealError::InvalidSeed(format!("bad decimal digit '{}'", ch)))?;

            // bytes = bytes * 10 + digit, from the least significant byte up
            let mut carry = digit;
            for byte in bytes.iter_mut().rev() {
                let acc = (*byte as u32) * 10 + carry;
                *byte = (acc & 0xff) as u8;
                carry = acc >> 8;
            }
            if carry != 0 {
                return Err(RevealError::InvalidSeed(
                    "decimal seed does not fit in 256 bits".to_string(),
                ));
            }
        }
        Ok(Self(bytes))
    }
}

impl FromStr for Seed {
    type Err = RevealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            return Self::parse_hex(digits);
        }
        if s.is_empty() {
            return Err(RevealError::InvalidSeed("empty seed".to_string()));
        }
        Self::parse_decimal(s)
    }
}

impl TryFrom<String> for Seed {
    type Error = RevealError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Seed> for String {
    fn from(seed: Seed) -> Self {
        seed.to_hex()
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({})", self.to_hex())
    }
}

/// Identity of a caller, e.g. the oracle's address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
