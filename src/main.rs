//! Energy and magnetization versus temperature for the 2D Ising model.
//!
//! Every flag overrides the matching `SweepConfig` field; `--quick` starts
//! from the short preset instead of the standard one.
//
//  Compile & run:  `cargo run --release -- --output ising_scan.csv`

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use ising_scan::report::write_series;
use ising_scan::SweepConfig;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Start from the quick preset (100 + 100 sweeps, 50 trials, 50 temperatures)
    #[arg(long)]
    quick: bool,

    /// Lattice side length N
    #[arg(long)]
    size: Option<usize>,

    /// Lowest temperature
    #[arg(long)]
    t_min: Option<f64>,

    /// Highest temperature
    #[arg(long)]
    t_max: Option<f64>,

    /// Number of temperatures in the range
    #[arg(long)]
    steps: Option<usize>,

    /// Equilibration sweeps per temperature
    #[arg(long)]
    equil: Option<usize>,

    /// Sampling sweeps per temperature
    #[arg(long)]
    samples: Option<usize>,

    /// Trial flips per sweep
    #[arg(long)]
    trials: Option<usize>,

    /// Master seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Run temperatures one after another on the current thread
    #[arg(long)]
    sequential: bool,

    /// Repeat the full sweep K times and report the mean wall time
    #[arg(long, default_value = "1")]
    repeat: usize,

    /// Output CSV
    #[arg(short, long, default_value = "ising_scan.csv")]
    output: PathBuf,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> SweepConfig {
        let mut cfg = if self.quick { SweepConfig::quick() } else { SweepConfig::default() };
        if let Some(size) = self.size {
            cfg.run.lattice_size = size;
        }
        if let Some(t_min) = self.t_min {
            cfg.temperature_range.0 = t_min;
        }
        if let Some(t_max) = self.t_max {
            cfg.temperature_range.1 = t_max;
        }
        if let Some(steps) = self.steps {
            cfg.temperature_steps = steps;
        }
        if let Some(equil) = self.equil {
            cfg.run.equilibration_sweeps = equil;
        }
        if let Some(samples) = self.samples {
            cfg.run.sampling_sweeps = samples;
        }
        if let Some(trials) = self.trials {
            cfg.run.trials_per_sweep = trials;
        }
        cfg.seed = self.seed;
        cfg.parallel = !self.sequential;
        cfg
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO })
        .init();

    let cfg = cli.config();
    cfg.validate()?;
    info!("Configuration:\n{cfg:#?}");

    let repeat = cli.repeat.max(1);
    let bar = ProgressBar::new((cfg.temperature_steps * repeat) as u64);
    bar.set_style(ProgressStyle::with_template(
        " {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]",
    )?);

    let mut elapsed = 0.0;
    let mut series = Vec::new();
    for _ in 0..repeat {
        let start = Instant::now();
        series = cfg.run(&|| bar.inc(1))?;
        elapsed += start.elapsed().as_secs_f64();
    }
    bar.finish();

    if repeat > 1 {
        info!("Took {:.2} seconds per sweep (mean of {repeat})", elapsed / repeat as f64);
    } else {
        info!("Took {elapsed:.2} seconds");
    }

    write_series(&series, BufWriter::new(File::create(&cli.output)?))?;
    println!("Scan complete → {}", cli.output.display());
    Ok(())
}
