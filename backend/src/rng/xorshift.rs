//! xorshift64* word generator
//!
//! Four consecutive 64-bit outputs, most significant first, form one
//! 256-bit word. Same seed, same sequence of words.

use crate::models::seed::{Seed, SEED_BYTES};
use serde::{Deserialize, Serialize};

/// Reproducible source of random 256-bit words
///
/// # Example
/// ```
/// use booster_traits_core_rs::WordGenerator;
///
/// let mut a = WordGenerator::new(42);
/// let mut b = WordGenerator::new(42);
/// assert_eq!(a.next_word(), b.next_word());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordGenerator {
    state: u64,
}

impl WordGenerator {
    pub fn new(seed: u64) -> Self {
        // xorshift state must be non-zero
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Next 256-bit word; never zero
    pub fn next_word(&mut self) -> Seed {
        loop {
            let mut bytes = [0u8; SEED_BYTES];
            for chunk in bytes.chunks_exact_mut(8) {
                chunk.copy_from_slice(&self.next_u64().to_be_bytes());
            }
            let word = Seed::from_bytes(bytes);
            if !word.is_zero() {
                return word;
            }
        }
    }

    pub fn state(&self) -> u64 {
        self.state
    }
}
