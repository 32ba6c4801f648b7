//! Deterministic word generation for simulated reveals
//!
//! Uses xorshift64* to produce reproducible 256-bit words. This is harness
//! randomness only: trait derivation never consumes a PRNG, it hashes the
//! revealed seed.

mod xorshift;

pub use xorshift::WordGenerator;
