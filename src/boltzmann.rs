// boltzmann.rs - Per-temperature acceptance factors

use crate::error::{require_temperature, Result};

/// Precomputed `exp(-β ΔE)` for the only two positive energy costs a
/// single flip can have on a square lattice with no field (ΔE = 4, 8).
///
/// Built once per temperature, read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoltzmannCache {
    beta: f64,
    exp4: f64,
    exp8: f64,
}

impl BoltzmannCache {
    /// Cache for temperature `T` (k_B = 1, so β = 1/T).
    pub fn new(temperature: f64) -> Result<Self> {
        require_temperature(temperature)?;
        let beta = 1.0 / temperature;
        Ok(Self {
            beta,
            exp4: (-4.0 * beta).exp(),
            exp8: (-8.0 * beta).exp(),
        })
    }

    #[inline(always)]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Acceptance probability for a flip costing `delta_e`.
    ///
    /// `None` for ΔE ≤ 0 (always accepted, no draw needed) and for values
    /// outside the lattice's ΔE domain.
    #[inline(always)]
    pub fn factor(&self, delta_e: i32) -> Option<f64> {
        match delta_e {
            4 => Some(self.exp4),
            8 => Some(self.exp8),
            _ => None,
        }
    }
}
