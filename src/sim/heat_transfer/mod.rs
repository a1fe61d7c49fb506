//! Explicit finite-difference heat conduction in a 1D slab.
//!
//! The slab is discretized into `n` evenly spaced points whose two ends are
//! held at fixed temperatures. Each step is a forward Euler update of the
//! interior points with the time step pinned to the explicit stability limit.
//!
//! # Architecture
//!
//! ```text
//! GridParams ──► GridConfig ──► FieldState::initialize() ──► SimulationRunner
//!                                                                 │
//!                                        Stepper::advance() every step
//!                                                                 │
//!                                    FluxProbe::sample() │ snapshot copy
//!                                                                 ▼
//!                                                       SimulationRun (RunOutput)
//! ```
//!
//! A run records either one [`FluxSample`] per step or a strided sequence of
//! [`FieldSnapshot`]s; the stepping sequence is the same in both cases.

pub mod field;
pub mod flux;
pub mod grid;
pub mod runner;
pub mod solver;

pub use field::FieldState;
pub use flux::{FluxProbe, FluxSample};
pub use grid::{GridConfig, GridParams};
pub use runner::{
    DEFAULT_STEPS, DEFAULT_STRIDE, FieldSnapshot, OutputMode, RunOutput, SimulationRun,
    SimulationRunner, snapshot_count,
};
pub use solver::{Stepper, Sweep};
