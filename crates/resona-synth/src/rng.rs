//! Seeded PCG32 streams for parameter initialization.
//!
//! Every random draw made by the synthesizer goes through this module. The
//! frequency and gain streams get independent seeds, derived from the base
//! seed with BLAKE3, so changing one draw never shifts the other.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Stream key for resonance frequency draws.
pub const FREQUENCY_STREAM: &str = "resonance.frequencies";

/// Stream key for resonance gain draws.
pub const GAIN_STREAM: &str = "resonance.gains";

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The seed is duplicated into both halves of the 64-bit PCG32 state.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives the seed of a named stream from the base seed.
///
/// Hashes the little-endian base seed followed by the UTF-8 key and keeps
/// the first four bytes of the digest.
pub fn derive_stream_seed(base_seed: u32, key: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + key.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());

    let hash = blake3::hash(&input);
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Creates the RNG for a named stream.
pub fn create_stream_rng(base_seed: u32, key: &str) -> Pcg32 {
    create_rng(derive_stream_seed(base_seed, key))
}

/// Draws a fresh base seed from OS entropy.
pub fn entropy_seed() -> u32 {
    rand::random()
}

/// Draws `len` values uniformly from `[low, high)`.
///
/// `low < high` must hold; config validation guarantees it for the
/// synthesizer's own draws.
pub fn uniform_vec(rng: &mut Pcg32, len: usize, low: f32, high: f32) -> Vec<f32> {
    (0..len).map(|_| rng.gen_range(low..high)).collect()
}
