//! File I/O for slab simulations.
//!
//! Job files are JSON; results are written as CSV tables (and optionally a
//! JSON dump of the whole run) for plotting elsewhere.

pub mod config;
pub mod table;

pub use config::{JobConfig, OutputConfig, job_from_str, job_to_string, read_job};
pub use table::{write_flux_table, write_profile_table, write_run_csv, write_run_json};
