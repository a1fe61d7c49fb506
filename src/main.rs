//! slabheat command-line interface.
//!
//! ```sh
//! slabheat run job.json
//! slabheat validate job.json
//! slabheat defaults > job.json
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use slabheat::io::{self, JobConfig};
use slabheat::{RunOutput, SimulationRun};

#[derive(Parser)]
#[command(name = "slabheat")]
#[command(about = "Explicit finite-difference heat conduction in a 1D slab")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation from a JSON job file (defaults when omitted).
    Run {
        /// Path to the job file.
        job: Option<PathBuf>,
        /// Output directory (overrides the job file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a job file without running it.
    Validate {
        /// Path to the job file.
        job: PathBuf,
    },
    /// Print the default job as JSON.
    Defaults,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { job, output } => {
            let job = match &job {
                Some(path) => io::read_job(path)?,
                None => JobConfig::default(),
            };
            let runner = job.runner()?;
            let run = runner.run();
            print_summary(&run);

            let out_dir = output.unwrap_or_else(|| job.output.directory.clone());
            let csv_name = match run.output() {
                RunOutput::Flux(_) => "flux.csv",
                RunOutput::Snapshots(_) => "profiles.csv",
            };
            let csv_path = out_dir.join(csv_name);
            io::write_run_csv(&csv_path, &run)?;
            println!("Wrote {}", csv_path.display());

            if job.output.save_json {
                let json_path = out_dir.join("run.json");
                io::write_run_json(&json_path, &run)?;
                println!("Wrote {}", json_path.display());
            }
            Ok(())
        }
        Commands::Validate { job } => {
            let config = io::read_job(&job)?;
            let runner = config.runner()?;
            let grid = runner.config();
            println!("Job is valid: {}", job.display());
            println!(
                "  n = {}, dx = {:.4e} m, dt = {:.4e} s, {} steps ({:.4e} s), mode: {}",
                grid.points(),
                grid.dx(),
                grid.dt(),
                runner.steps(),
                runner.steps() as f64 * grid.dt(),
                runner.mode()
            );
            Ok(())
        }
        Commands::Defaults => {
            println!("{}", io::job_to_string(&JobConfig::default())?);
            Ok(())
        }
    }
}

fn print_summary(run: &SimulationRun) {
    let grid = run.config();
    println!("Slab heat conduction");
    println!("{:=<60}", "");
    println!(
        "  L = {} m, n = {}, alpha = {:e} m2/s",
        grid.length(),
        grid.points(),
        grid.diffusivity()
    );
    println!(
        "  T_left = {:.1} C, T_right = {:.1} C",
        grid.left_temp(),
        grid.right_temp()
    );
    println!("  dx = {:.4e} m, dt = {:.4e} s", grid.dx(), grid.dt());
    println!("  Steps: {}", run.steps());

    match run.output() {
        RunOutput::Flux(samples) => {
            if let Some(last) = samples.last() {
                println!(
                    "  Final power: left = {:.2} W, right = {:.2} W (storage {:.2} W)",
                    last.left_power,
                    last.right_power,
                    last.storage_rate()
                );
            }
        }
        RunOutput::Snapshots(snapshots) => {
            println!("  Snapshots: {}", snapshots.len());
        }
    }
    println!();
}
