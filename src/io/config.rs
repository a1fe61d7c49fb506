//! JSON job files.
//!
//! A job describes one slab run: grid parameters, step count, output mode,
//! sweep strategy and where to write results. Every field is optional and
//! defaults to the 1 m wall problem (100 C / 0 C, alpha = 1e-4 m^2/s,
//! 100 points, 3000 steps, snapshots every 100 steps).

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::HeatError;
use crate::sim::heat_transfer::{DEFAULT_STEPS, GridConfig, OutputMode, SimulationRunner, Sweep};

fn default_steps() -> usize {
    DEFAULT_STEPS
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

/// Top-level job configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default = "default_steps")]
    pub steps: usize,
    #[serde(default)]
    pub mode: OutputMode,
    #[serde(default)]
    pub sweep: Sweep,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            steps: DEFAULT_STEPS,
            mode: OutputMode::default(),
            sweep: Sweep::default(),
            output: OutputConfig::default(),
        }
    }
}

impl JobConfig {
    /// Builds the runner described by this job.
    pub fn runner(&self) -> std::result::Result<SimulationRunner, HeatError> {
        Ok(SimulationRunner::new(self.grid, self.steps, self.mode)?.with_sweep(self.sweep))
    }
}

/// Where and how results are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
    /// Also dump the whole run as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_json: false,
        }
    }
}

/// Reads a job from a JSON file.
pub fn read_job(path: &Path) -> Result<JobConfig> {
    let file =
        File::open(path).with_context(|| format!("Failed to open job file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let job: JobConfig = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse job file: {}", path.display()))?;

    Ok(job)
}

/// Parses a job from a JSON string.
pub fn job_from_str(json: &str) -> Result<JobConfig> {
    serde_json::from_str(json).context("Failed to parse job from string")
}

/// Serializes a job to a pretty-printed JSON string.
pub fn job_to_string(job: &JobConfig) -> Result<String> {
    serde_json::to_string_pretty(job).context("Failed to serialize job to string")
}
