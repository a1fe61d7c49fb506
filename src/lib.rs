pub mod error;
pub mod io;
pub mod sim;

// Prelude
pub use error::HeatError;
pub use sim::heat_transfer::{
    FieldSnapshot, FieldState, FluxProbe, FluxSample, GridConfig, GridParams, OutputMode,
    RunOutput, SimulationRun, SimulationRunner, Stepper, Sweep,
};
