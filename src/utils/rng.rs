use rand_chacha::ChaCha20Rng;
use rand::SeedableRng;

/// Independent deterministic RNG for temperature slot `index` of a run
/// seeded with `master`.
///
/// The index is spread with a golden-ratio multiply and a splitmix64
/// finalizer so neighbouring slots get unrelated ChaCha seeds.
pub fn stream_rng(master: u64, index: usize) -> ChaCha20Rng {
    let mut x = master ^ (index as u64).wrapping_mul(0x9E3779B97F4A7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D049BB133111EB);
    x ^= x >> 31;
    ChaCha20Rng::seed_from_u64(x)
}
