//! Acceptance rule, Boltzmann factors and random-draw accounting for the
//! single-spin-flip sweeper.

use ising_scan::boltzmann::BoltzmannCache;
use ising_scan::energy::delta_e;
use ising_scan::metropolis::{sweep, trial};
use ising_scan::observables::{magnetization, total_energy};
use ising_scan::Lattice;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_pcg::Pcg64;

/// Wraps an RNG and counts every word it hands out.
struct CountingRng<R> {
    inner: R,
    draws: usize,
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws += 1;
        self.inner.next_u32()
    }
    fn next_u64(&mut self) -> u64 {
        self.draws += 1;
        self.inner.next_u64()
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws += 1;
        self.inner.fill_bytes(dest)
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws += 1;
        self.inner.try_fill_bytes(dest)
    }
}

/// Returns the same word forever.
struct ConstRng(u64);

impl RngCore for ConstRng {
    fn next_u32(&mut self) -> u32 {
        self.0 as u32
    }
    fn next_u64(&mut self) -> u64 {
        self.0
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(self.0 as u8)
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

fn checkerboard(n: usize) -> Lattice {
    let spins: Vec<i8> = (0..n * n)
        .map(|i| if (i / n + i % n) % 2 == 0 { 1 } else { -1 })
        .collect();
    Lattice::from_spins(n, &spins).unwrap()
}

#[test]
fn test_energy_lowering_and_neutral_moves_skip_the_rng() {
    let cache = BoltzmannCache::new(0.1).unwrap();

    for seed in 0..50 {
        // ΔE = -8: isolated minority spin.
        let mut lat = Lattice::aligned(4, 1).unwrap();
        lat.flip_at(2, 2);
        assert_eq!(delta_e(&lat, 2, 2), -8);
        let mut rng = CountingRng { inner: Pcg64::seed_from_u64(seed), draws: 0 };
        assert!(trial(&mut lat, 2, 2, &cache, &mut rng));
        assert_eq!(lat.spin(2, 2), 1);
        assert_eq!(rng.draws, 0);

        // ΔE = 0: two of four neighbours antiparallel.
        let mut lat = Lattice::aligned(4, 1).unwrap();
        lat.flip_at(0, 1);
        lat.flip_at(1, 0);
        assert_eq!(delta_e(&lat, 0, 0), 0);
        let mut rng = CountingRng { inner: ChaCha20Rng::seed_from_u64(seed), draws: 0 };
        assert!(trial(&mut lat, 0, 0, &cache, &mut rng));
        assert_eq!(lat.spin(0, 0), -1);
        assert_eq!(rng.draws, 0);
    }

    // Even an RNG that always produces its largest value cannot block them.
    let mut lat = checkerboard(4);
    assert!(trial(&mut lat, 1, 1, &cache, &mut ConstRng(u64::MAX)));
}

#[test]
fn test_energy_raising_moves_compare_strictly_below_factor() {
    let cache = BoltzmannCache::new(1.0e6).unwrap();

    // ΔE = 4 at a neighbour of a single minority spin.
    let base = {
        let mut lat = Lattice::aligned(4, 1).unwrap();
        lat.flip_at(0, 0);
        lat
    };
    assert_eq!(delta_e(&base, 0, 1), 4);

    // A draw of (almost) 1.0 is above exp(-4e-6) and must be rejected.
    let mut lat = base.clone();
    assert!(!trial(&mut lat, 0, 1, &cache, &mut ConstRng(u64::MAX)));
    assert_eq!(lat, base);

    // A draw of exactly 0.0 is below any positive factor.
    let mut lat = base.clone();
    assert!(trial(&mut lat, 0, 1, &cache, &mut ConstRng(0)));
    assert_eq!(lat.spin(0, 1), -1);

    // ΔE = 8 on an aligned lattice.
    let mut lat = Lattice::aligned(4, 1).unwrap();
    assert!(!trial(&mut lat, 3, 3, &cache, &mut ConstRng(u64::MAX)));
    assert!(trial(&mut lat, 3, 3, &cache, &mut ConstRng(0)));
}

#[test]
fn test_draws_per_trial() {
    let cache = BoltzmannCache::new(2.5).unwrap();

    // Checkerboard: the first trial has ΔE = -8, so only the two
    // coordinate draws happen.
    let mut lat = checkerboard(8);
    let mut rng = CountingRng { inner: ChaCha20Rng::seed_from_u64(5), draws: 0 };
    sweep(&mut lat, 1, &cache, &mut rng);
    assert_eq!(rng.draws, 2);

    // Aligned: the first trial has ΔE = 8 and needs the acceptance draw.
    let mut lat = Lattice::aligned(8, -1).unwrap();
    let mut rng = CountingRng { inner: ChaCha20Rng::seed_from_u64(5), draws: 0 };
    sweep(&mut lat, 1, &cache, &mut rng);
    assert_eq!(rng.draws, 3);
}

#[test]
fn test_boltzmann_factors_grow_with_temperature() {
    let temps: Vec<f64> = (1..=200).map(|i| 0.05 * i as f64).collect();
    let caches: Vec<BoltzmannCache> = temps.iter().map(|&t| BoltzmannCache::new(t).unwrap()).collect();

    for de in [4, 8] {
        for c in &caches {
            let p = c.factor(de).unwrap();
            assert!(p > 0.0 && p < 1.0, "factor {p} for ΔE = {de} outside (0, 1)");
        }
        for w in caches.windows(2) {
            assert!(w[0].factor(de).unwrap() < w[1].factor(de).unwrap());
        }
    }

    // Costlier flips are always less likely.
    for c in &caches {
        assert!(c.factor(8).unwrap() < c.factor(4).unwrap());
    }
}

#[test]
fn test_sweep_is_deterministic_under_fixed_seed() {
    let cache = BoltzmannCache::new(2.269).unwrap();

    let trajectory = |seed: u64| {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut lat = Lattice::new(12, &mut rng).unwrap();
        let mut frames = Vec::new();
        for _ in 0..20 {
            sweep(&mut lat, 144, &cache, &mut rng);
            frames.push((lat.clone(), total_energy(&lat), magnetization(&lat)));
        }
        frames
    };

    assert_eq!(trajectory(77), trajectory(77));
    assert_ne!(trajectory(77), trajectory(78));
}

#[test]
fn test_zero_temperature_limit_never_raises_energy() {
    // exp(-400) is far below the smallest non-zero U[0, 1) draw, so only
    // ΔE ≤ 0 moves go through.
    let cache = BoltzmannCache::new(0.01).unwrap();
    let mut rng = Pcg64::seed_from_u64(8);
    let mut lat = Lattice::new(10, &mut rng).unwrap();

    let mut energy = total_energy(&lat);
    for _ in 0..50 {
        sweep(&mut lat, 100, &cache, &mut rng);
        let now = total_energy(&lat);
        assert!(now <= energy);
        energy = now;
    }
}
