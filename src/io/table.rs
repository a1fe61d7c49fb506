//! Plain-text tables of run output for external plotting tools.
//!
//! - flux series: `time_s,left_power_w,right_power_w`, one row per step
//! - profiles: `updates,time_s,x_m,temperature_c`, one row per grid point
//!   per snapshot
//!
//! Both tables start with `#`-prefixed metadata lines describing the grid.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::sim::heat_transfer::{FieldSnapshot, FluxSample, GridConfig, RunOutput, SimulationRun};

fn write_header<W: Write>(w: &mut W, title: &str, config: &GridConfig) -> std::io::Result<()> {
    writeln!(w, "# slabheat {} ({})", env!("CARGO_PKG_VERSION"), title)?;
    writeln!(
        w,
        "# length_m={} points={} left_temp_c={} right_temp_c={}",
        config.length(),
        config.points(),
        config.left_temp(),
        config.right_temp()
    )?;
    writeln!(
        w,
        "# diffusivity_m2_s={} conductivity_w_mk={} area_m2={}",
        config.diffusivity(),
        config.conductivity(),
        config.area()
    )?;
    writeln!(w, "# dx_m={:.6e} dt_s={:.6e}", config.dx(), config.dt())?;
    Ok(())
}

/// Writes the boundary power series as CSV.
pub fn write_flux_table<W: Write>(
    w: &mut W,
    samples: &[FluxSample],
    config: &GridConfig,
) -> std::io::Result<()> {
    write_header(w, "boundary power", config)?;
    writeln!(w, "time_s,left_power_w,right_power_w")?;
    for s in samples {
        writeln!(w, "{:.6e},{:.6e},{:.6e}", s.time, s.left_power, s.right_power)?;
    }
    Ok(())
}

/// Writes snapshot profiles as a long CSV table.
pub fn write_profile_table<W: Write>(
    w: &mut W,
    snapshots: &[FieldSnapshot],
    config: &GridConfig,
) -> std::io::Result<()> {
    write_header(w, "temperature profiles", config)?;
    writeln!(w, "updates,time_s,x_m,temperature_c")?;
    let x = config.positions();
    for snap in snapshots {
        for (xi, t) in x.iter().zip(&snap.values) {
            writeln!(w, "{},{:.6e},{:.6e},{:.6e}", snap.updates, snap.time, xi, t)?;
        }
    }
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Writes the recorded output of `run` as CSV: the flux series for a flux
/// run, the profile table for a snapshot run.
pub fn write_run_csv(path: &Path, run: &SimulationRun) -> Result<()> {
    let mut w = create(path)?;
    let written = match run.output() {
        RunOutput::Flux(samples) => write_flux_table(&mut w, samples, run.config()),
        RunOutput::Snapshots(snapshots) => write_profile_table(&mut w, snapshots, run.config()),
    };
    written
        .and_then(|()| w.flush())
        .with_context(|| format!("Failed to write table: {}", path.display()))?;
    Ok(())
}

#[derive(Serialize)]
struct RunReport<'a> {
    grid: &'a GridConfig,
    dx: f64,
    dt: f64,
    steps: usize,
    positions: Vec<f64>,
    final_field: &'a [f64],
    output: &'a RunOutput,
}

/// Writes the complete run (grid, final field and recorded output) as JSON.
pub fn write_run_json(path: &Path, run: &SimulationRun) -> Result<()> {
    let report = RunReport {
        grid: run.config(),
        dx: run.config().dx(),
        dt: run.config().dt(),
        steps: run.steps(),
        positions: run.config().positions(),
        final_field: run.final_field().values(),
        output: run.output(),
    };
    let mut w = create(path)?;
    serde_json::to_writer_pretty(&mut w, &report)
        .with_context(|| format!("Failed to serialize run to: {}", path.display()))?;
    w.flush()
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(())
}
