//! SHA-256 mixing and weighted-bucket selection
//!
//! Pure functions; no state, no locking, safe from any thread.

use crate::error::RevealError;
use crate::models::category::{Category, WeightTable};
use crate::models::seed::{ItemId, Seed, SEED_BYTES};
use sha2::{Digest, Sha256};
use std::num::NonZeroU64;

/// SHA-256 of the seed word followed by the item id as a 256-bit word
pub fn mix(seed: &Seed, item_id: ItemId) -> [u8; 32] {
    let mut item_word = [0u8; SEED_BYTES];
    item_word[SEED_BYTES - 8..].copy_from_slice(&item_id.to_be_bytes());

    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    hasher.update(item_word);
    hasher.finalize().into()
}

/// Exact `digest mod modulus`, reading the digest as a big-endian integer
pub fn reduce(digest: &[u8; 32], modulus: NonZeroU64) -> u64 {
    let m = modulus.get() as u128;
    let r = digest
        .iter()
        .fold(0u128, |acc, byte| ((acc << 8) | *byte as u128) % m);
    r as u64
}

/// Category of `item_id` under `seed`
///
/// # Example
/// ```
/// use booster_traits_core_rs::{category_for, Category, Seed, WeightTable};
///
/// let table = WeightTable::dormint_boosters();
/// let category = category_for(&Seed::from_u64(1337), 0, &table).unwrap();
/// assert_eq!(category, Category(0));
/// ```
pub fn category_for(
    seed: &Seed,
    item_id: ItemId,
    table: &WeightTable,
) -> Result<Category, RevealError> {
    let total = NonZeroU64::new(table.total_weight()).ok_or_else(|| {
        RevealError::InvalidConfiguration("total weight is zero".to_string())
    })?;

    let r = reduce(&mix(seed, item_id), total);
    table.bucket_for(r).ok_or_else(|| {
        RevealError::InvalidConfiguration(format!(
            "value {} falls outside total weight {}",
            r, total
        ))
    })
}
