// src/bin/snapshots.rs - Dump lattice frames at a fixed temperature

use clap::Parser;
use ising_scan::report::write_snapshot;
use ising_scan::snapshot::{capture_checkpoints, Snapshot, SnapshotStream};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
struct Cli {
    /// Lattice side length N
    #[arg(long, default_value = "100")]
    size: usize,

    /// Temperature (k_B = 1)
    #[arg(long, default_value = "2.0")]
    temperature: f64,

    /// Trial flips between consecutive frames (per sweep with --checkpoints)
    #[arg(long, default_value = "150")]
    trials_per_frame: usize,

    /// Number of frames to stream
    #[arg(long, default_value = "50")]
    frames: usize,

    /// Capture these sweep indices instead of streaming frames
    #[arg(long, value_delimiter = ',')]
    checkpoints: Option<Vec<usize>>,

    /// Master seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory
    #[arg(long, default_value = "frames")]
    output_dir: PathBuf,
}

fn save(dir: &Path, snap: &Snapshot) -> Result<(), Box<dyn std::error::Error>> {
    let path = dir.join(format!("frame_{:06}.csv", snap.frame));
    write_snapshot(snap, BufWriter::new(File::create(path)?))?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    fs::create_dir_all(&args.output_dir)?;
    let seed = args.seed.unwrap_or_else(|| ChaCha20Rng::from_entropy().next_u64());
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    info!(seed, size = args.size, temperature = args.temperature, "capturing frames");

    let mut written = 0usize;
    match &args.checkpoints {
        Some(checkpoints) => {
            let snaps = capture_checkpoints(
                args.size,
                args.temperature,
                args.trials_per_frame,
                checkpoints,
                &mut rng,
            )?;
            for snap in &snaps {
                save(&args.output_dir, snap)?;
                written += 1;
            }
        }
        None => {
            let stream = SnapshotStream::new(
                args.size,
                args.temperature,
                args.trials_per_frame,
                args.frames,
                rng,
            )?;
            for snap in stream {
                save(&args.output_dir, &snap)?;
                written += 1;
            }
        }
    }

    println!("Wrote {written} frames → {}", args.output_dir.display());
    Ok(())
}
