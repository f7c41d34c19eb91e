// sweep.rs - Energy / magnetization as a function of temperature

use crate::error::{invalid, require_positive, require_temperature, Result};
use crate::observables::Means;
use crate::simulation::{RunParams, Simulation};
use crate::utils::rng::stream_rng;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use tracing::info;

/// One temperature's result, normalized per site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub temperature: f64,
    pub energy_per_site: f64,
    /// `|⟨M⟩| / N²`.
    pub abs_magnetization_per_site: f64,
}

impl SweepPoint {
    fn from_means(temperature: f64, means: Means, n_sites: usize) -> Self {
        let n = n_sites as f64;
        Self {
            temperature,
            energy_per_site: means.energy / n,
            abs_magnetization_per_site: (means.magnetization / n).abs(),
        }
    }
}

/// Evenly spaced temperatures from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let dt = (end - start) / (steps - 1) as f64;
            (0..steps)
                .map(|i| if i + 1 == steps { end } else { start + dt * i as f64 })
                .collect()
        }
    }
}

fn validate_inputs(temperatures: &[f64], params: &RunParams) -> Result<()> {
    if temperatures.is_empty() {
        return Err(invalid("temperature sequence is empty"));
    }
    for &t in temperatures {
        require_temperature(t)?;
    }
    params.validate()
}

/// Run the driver at every temperature, in order, drawing from one
/// injected random stream. No state is carried between temperatures
/// apart from the RNG position.
pub fn run_sweep<R: Rng>(
    temperatures: &[f64],
    params: RunParams,
    rng: &mut R,
) -> Result<Vec<SweepPoint>> {
    validate_inputs(temperatures, &params)?;
    let n_sites = params.lattice_size * params.lattice_size;

    temperatures
        .iter()
        .map(|&t| {
            let outcome = Simulation::new(t, params, &mut *rng)?.run();
            Ok(SweepPoint::from_means(t, outcome.means, n_sites))
        })
        .collect()
}

/// Run the driver at every temperature with its own stream derived from
/// `seed`, optionally spread over rayon workers.
///
/// Output order follows `temperatures`. Sequential and parallel runs with
/// the same seed give identical series. `on_point` is called once per
/// finished temperature (useful for progress bars).
pub fn run_sweep_seeded(
    temperatures: &[f64],
    params: RunParams,
    seed: u64,
    parallel: bool,
    on_point: &(dyn Fn() + Sync),
) -> Result<Vec<SweepPoint>> {
    validate_inputs(temperatures, &params)?;
    let n_sites = params.lattice_size * params.lattice_size;

    let work = |(k, &t): (usize, &f64)| -> Result<SweepPoint> {
        let outcome = Simulation::new(t, params, stream_rng(seed, k))?.run();
        let point = SweepPoint::from_means(t, outcome.means, n_sites);
        info!(
            temperature = t,
            energy = point.energy_per_site,
            magnetization = point.abs_magnetization_per_site,
            "temperature done"
        );
        on_point();
        Ok(point)
    };

    if parallel {
        temperatures.par_iter().enumerate().map(work).collect()
    } else {
        temperatures.iter().enumerate().map(work).collect()
    }
}

/// Full configuration of a temperature sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub run: RunParams,
    /// Inclusive `(start, end)`.
    pub temperature_range: (f64, f64),
    pub temperature_steps: usize,
    /// Master seed; `None` draws one from OS entropy.
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            run: RunParams {
                equilibration_sweeps: 400,
                sampling_sweeps: 400,
                trials_per_sweep: 300,
                lattice_size: 16,
            },
            temperature_range: (1.0, 4.0),
            temperature_steps: 100,
            seed: None,
            parallel: true,
        }
    }
}

impl SweepConfig {
    /// Short run: 100 + 100 sweeps of 50 trials, 50 temperatures.
    pub fn quick() -> Self {
        Self {
            run: RunParams {
                equilibration_sweeps: 100,
                sampling_sweeps: 100,
                trials_per_sweep: 50,
                lattice_size: 16,
            },
            temperature_steps: 50,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let (start, end) = self.temperature_range;
        require_temperature(start)?;
        if !end.is_finite() || end < start {
            return Err(invalid(format!(
                "temperature range end must be finite and >= start, got ({start}, {end})"
            )));
        }
        require_positive("temperature_steps", self.temperature_steps)?;
        self.run.validate()
    }

    pub fn temperatures(&self) -> Vec<f64> {
        let (start, end) = self.temperature_range;
        linspace(start, end, self.temperature_steps)
    }

    /// Validate and run the sweep.
    pub fn run(&self, on_point: &(dyn Fn() + Sync)) -> Result<Vec<SweepPoint>> {
        self.validate()?;
        let seed = self
            .seed
            .unwrap_or_else(|| ChaCha20Rng::from_entropy().next_u64());
        info!(
            seed,
            size = self.run.lattice_size,
            temperatures = self.temperature_steps,
            parallel = self.parallel,
            "starting temperature sweep"
        );
        run_sweep_seeded(&self.temperatures(), self.run, seed, self.parallel, on_point)
    }
}
