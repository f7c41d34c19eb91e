// snapshot.rs - Lattice frames for animation and configuration plots

use crate::boltzmann::BoltzmannCache;
use crate::error::{invalid, require_positive, require_temperature, Result};
use crate::lattice::Lattice;
use crate::metropolis;
use crate::observables::{magnetization, total_energy};
use rand::Rng;

/// A copy of the lattice at some point of a fixed-temperature run.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Frame number (stream) or sweep index (checkpoints).
    pub frame: usize,
    /// Trials applied since the lattice was created.
    pub trials: usize,
    pub lattice: Lattice,
    pub energy: f64,
    pub magnetization: i64,
}

impl Snapshot {
    fn capture(frame: usize, trials: usize, lattice: &Lattice) -> Self {
        Self {
            frame,
            trials,
            lattice: lattice.clone(),
            energy: total_energy(lattice),
            magnetization: magnetization(lattice),
        }
    }
}

/// Lazy, single-pass sequence of lattice frames at one temperature.
///
/// Every `next()` applies `trials_per_frame` trials and yields a copy of
/// the lattice, until `frames` frames have been produced. The stream
/// cannot be rewound; build a new one with a re-seeded RNG to replay it.
pub struct SnapshotStream<R> {
    lattice: Lattice,
    cache: BoltzmannCache,
    rng: R,
    trials_per_frame: usize,
    frames: usize,
    produced: usize,
}

impl<R: Rng> SnapshotStream<R> {
    pub fn new(
        size: usize,
        temperature: f64,
        trials_per_frame: usize,
        frames: usize,
        mut rng: R,
    ) -> Result<Self> {
        require_positive("trials_per_frame", trials_per_frame)?;
        let cache = BoltzmannCache::new(temperature)?;
        let lattice = Lattice::new(size, &mut rng)?;
        Ok(Self {
            lattice,
            cache,
            rng,
            trials_per_frame,
            frames,
            produced: 0,
        })
    }

    /// Lattice as of the last yielded frame (the initial lattice before
    /// the first call to `next`).
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }
}

impl<R: Rng> Iterator for SnapshotStream<R> {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        if self.produced == self.frames {
            return None;
        }
        metropolis::sweep(&mut self.lattice, self.trials_per_frame, &self.cache, &mut self.rng);
        self.produced += 1;
        Some(Snapshot::capture(
            self.produced,
            self.produced * self.trials_per_frame,
            &self.lattice,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.frames - self.produced;
        (left, Some(left))
    }
}

impl<R: Rng> ExactSizeIterator for SnapshotStream<R> {}

/// Lattice copies after each sweep index in `checkpoints` (strictly
/// increasing; index 0 is the freshly initialized lattice).
pub fn capture_checkpoints<R: Rng>(
    size: usize,
    temperature: f64,
    trials_per_sweep: usize,
    checkpoints: &[usize],
    rng: &mut R,
) -> Result<Vec<Snapshot>> {
    require_temperature(temperature)?;
    require_positive("trials_per_sweep", trials_per_sweep)?;
    if checkpoints.windows(2).any(|w| w[0] >= w[1]) {
        return Err(invalid("checkpoints must be strictly increasing"));
    }

    let cache = BoltzmannCache::new(temperature)?;
    let mut lattice = Lattice::new(size, rng)?;
    let mut done = 0usize;
    let mut out = Vec::with_capacity(checkpoints.len());

    for &target in checkpoints {
        while done < target {
            metropolis::sweep(&mut lattice, trials_per_sweep, &cache, rng);
            done += 1;
        }
        out.push(Snapshot::capture(done, done * trials_per_sweep, &lattice));
    }
    Ok(out)
}
