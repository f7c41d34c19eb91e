// observables.rs - Whole-lattice energy and magnetization

use crate::lattice::Lattice;

/// Σ over sites of `-s(x,y) · Σ neighbours`. Every bond appears twice.
pub fn site_energy_sum(lattice: &Lattice) -> i64 {
    let n = lattice.size();
    let mut total = 0i64;
    for x in 0..n {
        for y in 0..n {
            total -= (lattice.spin(x, y) as i32 * lattice.neighbor_sum(x, y)) as i64;
        }
    }
    total
}

/// Total energy in the reference normalization: the site sum divided by 4.
///
/// A fully aligned N×N lattice gives `-N²`.
pub fn total_energy(lattice: &Lattice) -> f64 {
    site_energy_sum(lattice) as f64 / 4.0
}

/// Hamiltonian `-Σ_<ij> s_i s_j` over nearest-neighbour bonds (each bond
/// once). A fully aligned lattice gives `-2` per site.
///
/// Always twice [`total_energy`]. Sweep series and snapshots report
/// `total_energy`, not this value.
pub fn bond_energy(lattice: &Lattice) -> f64 {
    site_energy_sum(lattice) as f64 / 2.0
}

/// Signed sum of all spins.
pub fn magnetization(lattice: &Lattice) -> i64 {
    lattice.spins().iter().map(|&s| s as i64).sum()
}

/// Mean energy and magnetization over a run's sampling phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Means {
    pub energy: f64,
    pub magnetization: f64,
}

/// Running sums of per-sweep energy and magnetization.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    count: usize,
    energy_sum: f64,
    magnetization_sum: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one measurement of the current lattice.
    pub fn record(&mut self, lattice: &Lattice) {
        self.push(total_energy(lattice), magnetization(lattice) as f64);
    }

    pub fn push(&mut self, energy: f64, magnetization: f64) {
        self.count += 1;
        self.energy_sum += energy;
        self.magnetization_sum += magnetization;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Raw `(Σ energy, Σ magnetization)`.
    pub fn sums(&self) -> (f64, f64) {
        (self.energy_sum, self.magnetization_sum)
    }

    /// Sums divided by the sample count; `None` before the first sample.
    pub fn means(&self) -> Option<Means> {
        if self.count == 0 {
            return None;
        }
        let c = self.count as f64;
        Some(Means {
            energy: self.energy_sum / c,
            magnetization: self.magnetization_sum / c,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
