use anyhow::Result;
use slabheat::{GridConfig, OutputMode, SimulationRunner};

/// Power through both faces of a 1 m wall over time.
///
/// k = 50 W/(m*K), A = 1 m^2. The left face starts far above the right one
/// and both approach k*A*dT/L as the profile becomes linear.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GridConfig::default();
    let run = SimulationRunner::new(config, 3000, OutputMode::Flux)?.run();
    let samples = run.flux_samples().unwrap_or_default();

    let steady = config.conductivity() * config.area() * (config.left_temp() - config.right_temp())
        / config.length();

    println!("Power at Boundaries Over Time");
    println!("{:=<60}", "");
    println!("  Steady-state power: {steady:.2} W");
    println!();
    println!("  {:>10}  {:>14}  {:>14}", "Time [s]", "Left [W]", "Right [W]");
    println!("  {:-<42}", "");
    for s in samples.iter().step_by(250) {
        println!(
            "  {:>10.2}  {:>14.3}  {:>14.3}",
            s.time, s.left_power, s.right_power
        );
    }
    if let Some(last) = samples.last() {
        println!("  {:-<42}", "");
        println!(
            "  {:>10.2}  {:>14.3}  {:>14.3}",
            last.time, last.left_power, last.right_power
        );
    }
    Ok(())
}
