// metropolis.rs - Single-spin-flip Metropolis updates

use crate::boltzmann::BoltzmannCache;
use crate::energy::delta_e;
use crate::lattice::Lattice;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Attempt one flip at the in-range site `(x, y)`.
///
/// ΔE ≤ 0 flips without touching the RNG; ΔE ∈ {4, 8} flips when a fresh
/// `U[0, 1)` draw is strictly below the cached factor. Returns whether
/// the spin was flipped.
#[inline]
pub fn trial<R: Rng + ?Sized>(
    lattice: &mut Lattice,
    x: usize,
    y: usize,
    cache: &BoltzmannCache,
    rng: &mut R,
) -> bool {
    let de = delta_e(lattice, x, y);
    let accept = if de <= 0 {
        true
    } else {
        match cache.factor(de) {
            Some(p) => rng.gen::<f64>() < p,
            None => unreachable!("ΔE = {de} outside the square-lattice domain"),
        }
    };

    if accept {
        lattice.flip_at(x, y);
    }
    accept
}

/// Run `trials` random-site trials against `lattice` in place.
///
/// Sites are drawn uniformly with replacement, so `trials = N²` is about
/// one attempt per site rather than an ordered pass.
pub fn sweep<R: Rng + ?Sized>(
    lattice: &mut Lattice,
    trials: usize,
    cache: &BoltzmannCache,
    rng: &mut R,
) {
    let coord = Uniform::new(0, lattice.size());
    for _ in 0..trials {
        let x = coord.sample(rng);
        let y = coord.sample(rng);
        trial(lattice, x, y, cache, rng);
    }
}
