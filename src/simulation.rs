// simulation.rs - Single-temperature driver: equilibrate, then sample

use crate::boltzmann::BoltzmannCache;
use crate::error::{require_positive, require_temperature, Result};
use crate::lattice::Lattice;
use crate::metropolis;
use crate::observables::{Accumulator, Means};
use rand::Rng;
use tracing::debug;

/// Per-temperature run parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunParams {
    pub equilibration_sweeps: usize,
    pub sampling_sweeps: usize,
    pub trials_per_sweep: usize,
    pub lattice_size: usize,
}

impl RunParams {
    pub fn validate(&self) -> Result<()> {
        require_positive("equilibration_sweeps", self.equilibration_sweeps)?;
        require_positive("sampling_sweeps", self.sampling_sweeps)?;
        require_positive("trials_per_sweep", self.trials_per_sweep)?;
        require_positive("lattice_size", self.lattice_size)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Equilibrating,
    Sampling,
    Done,
}

/// Decides when the equilibration phase ends.
///
/// Queried after every equilibration sweep with the number of sweeps done
/// so far and the current lattice.
pub trait EquilibrationPolicy {
    fn is_equilibrated(&mut self, sweeps_done: usize, lattice: &Lattice) -> bool;
}

/// Equilibrate for a fixed number of sweeps.
#[derive(Debug, Clone, Copy)]
pub struct FixedSweeps(pub usize);

impl EquilibrationPolicy for FixedSweeps {
    fn is_equilibrated(&mut self, sweeps_done: usize, _lattice: &Lattice) -> bool {
        sweeps_done >= self.0
    }
}

impl<F> EquilibrationPolicy for F
where
    F: FnMut(usize, &Lattice) -> bool,
{
    fn is_equilibrated(&mut self, sweeps_done: usize, lattice: &Lattice) -> bool {
        self(sweeps_done, lattice)
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub temperature: f64,
    /// Mean total energy and signed magnetization over the sampling sweeps.
    pub means: Means,
    pub equilibration_sweeps: usize,
    pub lattice: Lattice,
}

/// Metropolis simulation of one lattice at one temperature.
///
/// `Uninitialized -> Equilibrating -> Sampling -> Done`. Each call to
/// [`Simulation::step`] performs at most one sweep.
pub struct Simulation<R, P = FixedSweeps> {
    temperature: f64,
    params: RunParams,
    cache: BoltzmannCache,
    policy: P,
    rng: R,
    phase: Phase,
    lattice: Option<Lattice>,
    equilibration_done: usize,
    samples: Accumulator,
}

impl<R: Rng> Simulation<R, FixedSweeps> {
    /// Driver with fixed-length equilibration (`params.equilibration_sweeps`).
    pub fn new(temperature: f64, params: RunParams, rng: R) -> Result<Self> {
        Self::with_policy(temperature, params, FixedSweeps(params.equilibration_sweeps), rng)
    }
}

impl<R: Rng, P: EquilibrationPolicy> Simulation<R, P> {
    /// Driver whose equilibration phase ends when `policy` says so.
    pub fn with_policy(temperature: f64, params: RunParams, policy: P, rng: R) -> Result<Self> {
        require_temperature(temperature)?;
        params.validate()?;
        let cache = BoltzmannCache::new(temperature)?;

        Ok(Self {
            temperature,
            params,
            cache,
            policy,
            rng,
            phase: Phase::Uninitialized,
            lattice: None,
            equilibration_done: 0,
            samples: Accumulator::new(),
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Current lattice; `None` while uninitialized.
    pub fn lattice(&self) -> Option<&Lattice> {
        self.lattice.as_ref()
    }

    /// Samples taken so far in the sampling phase.
    pub fn samples(&self) -> &Accumulator {
        &self.samples
    }

    /// Advance the state machine by one transition or one sweep.
    pub fn step(&mut self) -> Phase {
        match self.phase {
            Phase::Uninitialized => {
                self.lattice = Some(Lattice::random(self.params.lattice_size, &mut self.rng));
                self.phase = Phase::Equilibrating;
                debug!(temperature = self.temperature, "lattice initialized, equilibrating");
            }
            Phase::Equilibrating => {
                let Some(lattice) = self.lattice.as_mut() else {
                    return self.phase;
                };
                metropolis::sweep(lattice, self.params.trials_per_sweep, &self.cache, &mut self.rng);
                self.equilibration_done += 1;

                if self.policy.is_equilibrated(self.equilibration_done, lattice) {
                    self.samples.reset();
                    self.phase = Phase::Sampling;
                    debug!(
                        temperature = self.temperature,
                        sweeps = self.equilibration_done,
                        "equilibration finished, sampling"
                    );
                }
            }
            Phase::Sampling => {
                let Some(lattice) = self.lattice.as_mut() else {
                    return self.phase;
                };
                metropolis::sweep(lattice, self.params.trials_per_sweep, &self.cache, &mut self.rng);
                self.samples.record(lattice);

                if self.samples.count() == self.params.sampling_sweeps {
                    self.phase = Phase::Done;
                    debug!(temperature = self.temperature, "sampling finished");
                }
            }
            Phase::Done => {}
        }
        self.phase
    }

    /// Run to completion.
    pub fn run(mut self) -> RunOutcome {
        while self.step() != Phase::Done {}

        let means = self
            .samples
            .means()
            .unwrap_or(Means { energy: 0.0, magnetization: 0.0 });
        RunOutcome {
            temperature: self.temperature,
            means,
            equilibration_sweeps: self.equilibration_done,
            lattice: self.lattice.expect("lattice exists once the run is done"),
        }
    }
}

/// Run the driver once at `temperature` and return the sampling means.
pub fn run_temperature<R: Rng>(temperature: f64, params: RunParams, rng: R) -> Result<Means> {
    Ok(Simulation::new(temperature, params, rng)?.run().means)
}
