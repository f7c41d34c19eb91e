use crate::lattice::Lattice;

/// Every value [`delta_e`] can return on a ±1 lattice.
pub const DELTA_E_VALUES: [i32; 5] = [-8, -4, 0, 4, 8];

/// Energy change from flipping the spin at an in-range site `(x, y)`:
/// `ΔE = 2 s(x,y) Σ s(neighbour)` with J = 1 and periodic neighbours.
///
/// Positive means the flip raises the total energy.
#[inline]
pub fn delta_e(lattice: &Lattice, x: usize, y: usize) -> i32 {
    2 * lattice.spin(x, y) as i32 * lattice.neighbor_sum(x, y)
}

/// Same as [`delta_e`] but with coordinates taken modulo N.
pub fn delta_e_wrapped(lattice: &Lattice, x: isize, y: isize) -> i32 {
    let n = lattice.size() as isize;
    delta_e(lattice, x.rem_euclid(n) as usize, y.rem_euclid(n) as usize)
}
