use anyhow::Result;
use slabheat::{GridConfig, OutputMode, SimulationRunner};

/// Temperature distribution in a 1 m wall over time.
///
/// Starts from a wall at 0 C with the left face suddenly held at 100 C and
/// prints the profile every 100 steps, one column per capture.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GridConfig::default();
    let run = SimulationRunner::new(config, 3000, OutputMode::Snapshots { stride: 100 })?.run();
    let snapshots = run.snapshots().unwrap_or_default();

    println!("1D Temperature Distribution in a Wall Over Time");
    println!("{:=<60}", "");
    println!(
        "  dx = {:.4e} m, dt = {:.4} s, {} captures",
        config.dx(),
        config.dt(),
        snapshots.len()
    );
    println!();

    // Only every 10th point keeps the table readable.
    let x = config.positions();
    let rows: Vec<usize> = (0..x.len()).step_by(10).chain([x.len() - 1]).collect();

    for snap in snapshots.iter().skip(1).step_by(5) {
        println!("Time = {:.2} s", snap.time);
        for &i in &rows {
            println!("    x = {:>6.3} m   T = {:>8.3} C", x[i], snap.values[i]);
        }
        println!();
    }
    Ok(())
}
