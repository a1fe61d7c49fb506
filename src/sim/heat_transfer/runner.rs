use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HeatError, Result};
use crate::sim::heat_transfer::field::FieldState;
use crate::sim::heat_transfer::flux::{FluxProbe, FluxSample};
use crate::sim::heat_transfer::grid::{GridConfig, GridParams};
use crate::sim::heat_transfer::solver::{Stepper, Sweep};

/// Default number of time steps per run.
pub const DEFAULT_STEPS: usize = 3000;

/// Default number of steps between field snapshots.
pub const DEFAULT_STRIDE: usize = 100;

fn default_stride() -> usize {
    DEFAULT_STRIDE
}

/// What a run records besides advancing the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputMode {
    /// One [`FluxSample`] after every step.
    Flux,
    /// A copy of the whole field before the first step, then after every
    /// `stride`-th step.
    Snapshots {
        #[serde(default = "default_stride")]
        stride: usize,
    },
}

impl Default for OutputMode {
    fn default() -> Self {
        Self::Snapshots {
            stride: DEFAULT_STRIDE,
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flux => write!(f, "flux"),
            Self::Snapshots { stride } => write!(f, "snapshots (stride {stride})"),
        }
    }
}

/// Copy of the field at one capture point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    /// Number of steps applied to the captured field.
    pub updates: usize,
    /// Time label in s.
    pub time: f64,
    /// Temperatures [C], boundaries included.
    pub values: Vec<f64>,
}

/// Recorded side channel of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "records", rename_all = "snake_case")]
pub enum RunOutput {
    Flux(Vec<FluxSample>),
    Snapshots(Vec<FieldSnapshot>),
}

impl RunOutput {
    pub fn len(&self) -> usize {
        match self {
            Self::Flux(samples) => samples.len(),
            Self::Snapshots(snapshots) => snapshots.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Receives the field after every step of a run.
trait Recorder {
    /// Called once with the initial field, before any step.
    fn start(&mut self, _field: &FieldState) {}

    /// Called after step `step` (0-indexed) with its time label.
    fn record(&mut self, step: usize, time: f64, field: &FieldState);

    fn finish(self: Box<Self>) -> RunOutput;
}

struct FluxRecorder {
    probe: FluxProbe,
    samples: Vec<FluxSample>,
}

impl Recorder for FluxRecorder {
    fn record(&mut self, _step: usize, time: f64, field: &FieldState) {
        self.samples.push(self.probe.sample(field.values(), time));
    }

    fn finish(self: Box<Self>) -> RunOutput {
        RunOutput::Flux(self.samples)
    }
}

struct SnapshotRecorder {
    stride: usize,
    snapshots: Vec<FieldSnapshot>,
}

impl Recorder for SnapshotRecorder {
    fn start(&mut self, field: &FieldState) {
        self.snapshots.push(FieldSnapshot {
            updates: 0,
            time: 0.0,
            values: field.values().to_vec(),
        });
    }

    fn record(&mut self, step: usize, time: f64, field: &FieldState) {
        if step % self.stride == 0 {
            self.snapshots.push(FieldSnapshot {
                updates: step + 1,
                time,
                values: field.values().to_vec(),
            });
        }
    }

    fn finish(self: Box<Self>) -> RunOutput {
        RunOutput::Snapshots(self.snapshots)
    }
}

/// Number of snapshots a run of `steps` steps captures with `stride`.
pub fn snapshot_count(steps: usize, stride: usize) -> usize {
    1 + steps.div_ceil(stride)
}

/// Drives a fixed number of explicit steps over a slab and records either
/// boundary power or field snapshots.
///
/// Both modes advance the field through exactly the same sequence of
/// [`Stepper::advance`] calls; only the recorded output differs.
#[derive(Debug, Clone)]
pub struct SimulationRunner {
    config: GridConfig,
    steps: usize,
    mode: OutputMode,
    stepper: Stepper,
}

impl SimulationRunner {
    /// Create a runner for an already validated grid.
    ///
    /// Fails when the snapshot stride is zero, or when flux mode is selected
    /// and the conductivity or area is not positive.
    pub fn new(config: GridConfig, steps: usize, mode: OutputMode) -> Result<Self> {
        match mode {
            OutputMode::Flux => config.check_flux_properties()?,
            OutputMode::Snapshots { stride: 0 } => {
                return Err(HeatError::invalid("stride", "must be at least 1"));
            }
            OutputMode::Snapshots { .. } => {}
        }
        Ok(Self {
            config,
            steps,
            mode,
            stepper: Stepper::default(),
        })
    }

    /// Validate raw parameters and create a runner.
    pub fn from_params(params: GridParams, steps: usize, mode: OutputMode) -> Result<Self> {
        Self::new(GridConfig::new(params)?, steps, mode)
    }

    pub fn with_sweep(mut self, sweep: Sweep) -> Self {
        self.stepper = Stepper::new(sweep);
        self
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    fn recorder(&self) -> Box<dyn Recorder> {
        match self.mode {
            OutputMode::Flux => Box::new(FluxRecorder {
                probe: FluxProbe::new(&self.config),
                samples: Vec::with_capacity(self.steps),
            }),
            OutputMode::Snapshots { stride } => Box::new(SnapshotRecorder {
                stride,
                snapshots: Vec::with_capacity(snapshot_count(self.steps, stride)),
            }),
        }
    }

    /// Run all steps from the initial field and return the completed run.
    pub fn run(&self) -> SimulationRun {
        let config = &self.config;
        log::info!(
            "Running {} steps in {} mode: n = {}, dx = {:.4e} m, dt = {:.4e} s ({:?} sweep)",
            self.steps,
            self.mode,
            config.points(),
            config.dx(),
            config.dt(),
            self.stepper.sweep(),
        );
        if let OutputMode::Snapshots { stride } = self.mode
            && stride > self.steps
        {
            log::warn!(
                "Snapshot stride {stride} exceeds step count {}; only the first step is captured",
                self.steps
            );
        }

        let mut field = FieldState::initialize(config);
        let mut recorder = self.recorder();
        recorder.start(&field);

        let dt = config.dt();
        for t in 0..self.steps {
            self.stepper.advance(&mut field, config);
            recorder.record(t, t as f64 * dt, &field);
        }

        let output = recorder.finish();
        log::debug!(
            "Run finished after {} steps ({:.4e} s), {} records",
            self.steps,
            self.steps as f64 * dt,
            output.len()
        );

        SimulationRun {
            config: self.config,
            steps: self.steps,
            field,
            output,
        }
    }
}

/// A completed run: the grid it used, the final field and the recorded output.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    config: GridConfig,
    steps: usize,
    field: FieldState,
    output: RunOutput,
}

impl SimulationRun {
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Field after the last step.
    pub fn final_field(&self) -> &FieldState {
        &self.field
    }

    pub fn output(&self) -> &RunOutput {
        &self.output
    }

    /// Flux samples in step order, if this was a flux run.
    pub fn flux_samples(&self) -> Option<&[FluxSample]> {
        match &self.output {
            RunOutput::Flux(samples) => Some(samples),
            RunOutput::Snapshots(_) => None,
        }
    }

    /// Snapshots in capture order, if this was a snapshot run.
    pub fn snapshots(&self) -> Option<&[FieldSnapshot]> {
        match &self.output {
            RunOutput::Snapshots(snapshots) => Some(snapshots),
            RunOutput::Flux(_) => None,
        }
    }

    pub fn into_output(self) -> RunOutput {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> GridConfig {
        GridConfig::new(GridParams {
            points: 11,
            ..GridParams::default()
        })
        .unwrap()
    }

    #[test]
    fn test_flux_mode_one_sample_per_step() {
        let config = small();
        let run = SimulationRunner::new(config, 250, OutputMode::Flux)
            .unwrap()
            .run();
        let samples = run.flux_samples().unwrap();

        assert_eq!(samples.len(), 250);
        assert!(run.snapshots().is_none());
        for (t, s) in samples.iter().enumerate() {
            assert_eq!(s.time, t as f64 * config.dt());
        }
    }

    #[test]
    fn test_flux_mode_first_sample_after_first_step() {
        // After one step on 11 points the field is [100, 50, 0, ...]:
        // left power = -50 * (50 - 100) / 0.1 = 25000 W.
        let run = SimulationRunner::new(small(), 1, OutputMode::Flux)
            .unwrap()
            .run();
        let s = run.flux_samples().unwrap()[0];
        assert!((s.left_power - 25_000.0).abs() < 1e-6, "left = {}", s.left_power);
        assert_eq!(s.right_power, 0.0);
        assert_eq!(s.time, 0.0);
    }

    #[test]
    fn test_snapshot_mode_capture_points() {
        let config = small();
        let run = SimulationRunner::new(config, 250, OutputMode::Snapshots { stride: 100 })
            .unwrap()
            .run();
        let snaps = run.snapshots().unwrap();

        assert_eq!(snaps.len(), snapshot_count(250, 100));
        let updates: Vec<usize> = snaps.iter().map(|s| s.updates).collect();
        assert_eq!(updates, vec![0, 1, 101, 201]);
        let times: Vec<f64> = snaps.iter().map(|s| s.time).collect();
        assert_eq!(times, vec![0.0, 0.0, 100.0 * config.dt(), 200.0 * config.dt()]);

        let initial = FieldState::initialize(&config);
        assert_eq!(snaps[0].values, initial.values());
        assert!(run.flux_samples().is_none());
    }

    #[test]
    fn test_snapshots_do_not_alias_live_field() {
        let run = SimulationRunner::new(small(), 300, OutputMode::Snapshots { stride: 100 })
            .unwrap()
            .run();
        let snaps = run.snapshots().unwrap();
        assert_ne!(snaps[1].values, snaps[2].values);
        assert_ne!(snaps[0].values.as_slice(), run.final_field().values());
    }

    #[test]
    fn test_snapshot_count() {
        assert_eq!(snapshot_count(3000, 100), 31);
        assert_eq!(snapshot_count(3001, 100), 32);
        assert_eq!(snapshot_count(0, 100), 1);
        assert_eq!(snapshot_count(5, 1), 6);
    }

    #[test]
    fn test_zero_steps() {
        let run = SimulationRunner::new(small(), 0, OutputMode::Flux)
            .unwrap()
            .run();
        assert!(run.output().is_empty());
        assert_eq!(run.final_field().values(), FieldState::initialize(&small()).values());
    }

    #[test]
    fn test_rejects_zero_stride() {
        let err = SimulationRunner::new(small(), 10, OutputMode::Snapshots { stride: 0 })
            .unwrap_err();
        assert_eq!(err.parameter(), "stride");
    }

    #[test]
    fn test_flux_mode_requires_material_constants() {
        let params = GridParams {
            conductivity: 0.0,
            ..GridParams::default()
        };
        let err = SimulationRunner::from_params(params, 10, OutputMode::Flux).unwrap_err();
        assert_eq!(err.parameter(), "conductivity");

        // Snapshot mode never looks at k or A.
        assert!(SimulationRunner::from_params(params, 10, OutputMode::default()).is_ok());
    }

    #[test]
    fn test_from_params_surfaces_grid_errors() {
        let params = GridParams {
            points: 2,
            ..GridParams::default()
        };
        let err = SimulationRunner::from_params(params, 10, OutputMode::Flux).unwrap_err();
        assert_eq!(err.parameter(), "points");
    }

    #[test]
    fn test_mode_serde() {
        let mode: OutputMode = serde_json::from_str(r#"{"kind": "snapshots"}"#).unwrap();
        assert_eq!(mode, OutputMode::Snapshots { stride: DEFAULT_STRIDE });

        let mode: OutputMode = serde_json::from_str(r#"{"kind": "flux"}"#).unwrap();
        assert_eq!(mode, OutputMode::Flux);
        assert_eq!(serde_json::to_string(&mode).unwrap(), r#"{"kind":"flux"}"#);
    }
}
