//! Metropolis Monte Carlo for the 2D Ising model on an N×N torus
//! (J = 1, k_B = 1, no external field).
//!
//! The temperature sweep ([`sweep`]) runs one independent
//! [`simulation::Simulation`] per temperature and reports mean energy and
//! mean |magnetization| per site.

pub mod boltzmann;
pub mod energy;
pub mod error;
pub mod lattice;
pub mod metropolis;
pub mod observables;
pub mod report;
pub mod simulation;
pub mod snapshot;
pub mod sweep;
pub mod utils;

pub use error::{IsingError, Result};
pub use lattice::Lattice;
pub use simulation::{RunParams, Simulation};
pub use sweep::{run_sweep, SweepConfig, SweepPoint};
