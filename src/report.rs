// report.rs - CSV output for the plotting side

use crate::error::Result;
use crate::snapshot::Snapshot;
use crate::sweep::SweepPoint;
use csv::WriterBuilder;
use std::io::Write;

pub const SERIES_HEADER: [&str; 3] = [
    "temperature",
    "energy_per_site",
    "abs_magnetization_per_site",
];

/// One row per temperature, in series order.
pub fn write_series<W: Write>(series: &[SweepPoint], writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(SERIES_HEADER)?;
    for p in series {
        wtr.write_record(&[
            p.temperature.to_string(),
            p.energy_per_site.to_string(),
            p.abs_magnetization_per_site.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// One lattice frame: N rows of N comma-separated spins, no header.
pub fn write_snapshot<W: Write>(snapshot: &Snapshot, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    let n = snapshot.lattice.size();
    for x in 0..n {
        wtr.write_record((0..n).map(|y| snapshot.lattice.spin(x, y).to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}
