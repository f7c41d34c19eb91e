// lattice.rs - Square lattice of ±1 spins with periodic boundaries

use crate::error::{invalid, require_positive, Result};
use nalgebra::DMatrix;
use rand::Rng;

/// An N×N grid of spins on a torus.
///
/// `x` indexes rows and `y` indexes columns. Every cell holds `+1` or `-1`
/// for the whole lifetime of the lattice, and the size never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    spins: DMatrix<i8>,
    size: usize,
}

impl Lattice {
    /// Random lattice with i.i.d. uniform ±1 spins, drawn from the
    /// caller's RNG.
    pub fn new(size: usize, rng: &mut impl Rng) -> Result<Self> {
        require_positive("lattice_size", size)?;
        Ok(Self::random(size, rng))
    }

    /// Random lattice for an already validated size.
    pub(crate) fn random(size: usize, rng: &mut impl Rng) -> Self {
        let spins = DMatrix::from_fn(size, size, |_, _| if rng.gen::<bool>() { 1 } else { -1 });
        Self { spins, size }
    }

    /// Fully aligned lattice (every spin equal to `spin`).
    pub fn aligned(size: usize, spin: i8) -> Result<Self> {
        require_positive("lattice_size", size)?;
        check_spin(spin)?;
        Ok(Self { spins: DMatrix::from_element(size, size, spin), size })
    }

    /// Build from row-major spin values.
    pub fn from_spins(size: usize, spins: &[i8]) -> Result<Self> {
        require_positive("lattice_size", size)?;
        if spins.len() != size * size {
            return Err(invalid(format!(
                "expected {} spins for a {size}x{size} lattice, got {}",
                size * size,
                spins.len()
            )));
        }
        for &s in spins {
            check_spin(s)?;
        }
        Ok(Self { spins: DMatrix::from_row_slice(size, size, spins), size })
    }

    /// Side length N.
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of sites N².
    #[inline(always)]
    pub fn n_sites(&self) -> usize {
        self.size * self.size
    }

    /// Spin at `(x, y)`, both taken modulo N.
    pub fn get(&self, x: isize, y: isize) -> i8 {
        let (r, c) = self.wrap(x, y);
        self.spins[(r, c)]
    }

    /// Flip the spin at `(x, y)`, both taken modulo N.
    pub fn flip(&mut self, x: isize, y: isize) {
        let (r, c) = self.wrap(x, y);
        self.flip_at(r, c);
    }

    /// Spin at an in-range site. Hot-path accessor; no wrapping.
    #[inline(always)]
    pub fn spin(&self, x: usize, y: usize) -> i8 {
        self.spins[(x, y)]
    }

    /// Flip an in-range site.
    #[inline(always)]
    pub fn flip_at(&mut self, x: usize, y: usize) {
        let s = &mut self.spins[(x, y)];
        *s = -*s;
    }

    /// Sum of the four periodic nearest neighbours of an in-range site.
    #[inline]
    pub fn neighbor_sum(&self, x: usize, y: usize) -> i32 {
        let n = self.size;
        let up = if x == 0 { n - 1 } else { x - 1 };
        let down = if x + 1 == n { 0 } else { x + 1 };
        let left = if y == 0 { n - 1 } else { y - 1 };
        let right = if y + 1 == n { 0 } else { y + 1 };

        self.spins[(up, y)] as i32
            + self.spins[(down, y)] as i32
            + self.spins[(x, left)] as i32
            + self.spins[(x, right)] as i32
    }

    /// Read-only view of the spin matrix.
    pub fn spins(&self) -> &DMatrix<i8> {
        &self.spins
    }

    /// Row-major copy of the spins.
    pub fn to_row_major(&self) -> Vec<i8> {
        let n = self.size;
        let mut out = Vec::with_capacity(n * n);
        for x in 0..n {
            for y in 0..n {
                out.push(self.spins[(x, y)]);
            }
        }
        out
    }

    #[inline]
    fn wrap(&self, x: isize, y: isize) -> (usize, usize) {
        let n = self.size as isize;
        (x.rem_euclid(n) as usize, y.rem_euclid(n) as usize)
    }
}

fn check_spin(spin: i8) -> Result<()> {
    if spin != 1 && spin != -1 {
        return Err(invalid(format!("spin values must be +1 or -1, got {spin}")));
    }
    Ok(())
}
