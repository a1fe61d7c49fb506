use slabheat::{
    FieldState, FluxProbe, GridConfig, GridParams, HeatError, OutputMode, SimulationRunner,
    Stepper, Sweep,
};

fn wall() -> GridConfig {
    GridConfig::new(GridParams {
        length: 1.0,
        left_temp: 100.0,
        right_temp: 0.0,
        diffusivity: 1e-4,
        conductivity: 50.0,
        area: 1.0,
        points: 100,
    })
    .unwrap()
}

#[test]
fn test_converges_to_linear_profile() {
    let config = wall();
    // alpha * t / L^2 ~ 1.5, slowest mode decayed by ~e^-15.
    let run = SimulationRunner::new(config, 30_000, OutputMode::Flux)
        .unwrap()
        .run();

    let x = config.positions();
    for (i, (&xi, &t)) in x.iter().zip(run.final_field().values()).enumerate() {
        let expected = 100.0 * (1.0 - xi / config.length());
        assert!(
            (t - expected).abs() <= 1e-2 * 100.0,
            "point {i} (x={xi:.3}m): got {t:.4}, expected {expected:.4}"
        );
    }
}

#[test]
fn test_power_balances_at_steady_state() {
    let config = wall();
    let run = SimulationRunner::new(config, 30_000, OutputMode::Flux)
        .unwrap()
        .run();
    let last = run.flux_samples().unwrap().last().copied().unwrap();

    // k*A*dT/L = 50 * 1 * 100 / 1
    let expected = 5000.0;
    assert!(
        (last.left_power - expected).abs() < 1e-2 * expected,
        "left = {}",
        last.left_power
    );
    assert!(
        (last.right_power - expected).abs() < 1e-2 * expected,
        "right = {}",
        last.right_power
    );
    assert!(last.storage_rate().abs() < 1e-3 * expected);
}

#[test]
fn test_slab_still_charging_after_3000_steps() {
    let run = SimulationRunner::new(wall(), 3000, OutputMode::Flux)
        .unwrap()
        .run();
    let samples = run.flux_samples().unwrap();

    // Left power falls towards the steady value while right power rises from zero.
    let first = samples[0];
    let last = samples[samples.len() - 1];
    assert!(first.left_power > last.left_power);
    assert!(first.right_power < last.right_power);
    assert!(last.storage_rate() > 0.0);
    assert!(last.left_power > 5000.0 && last.right_power < 5000.0);
}

#[test]
fn test_snapshot_and_flux_runs_share_trajectory() {
    let config = wall();
    let steps = 1000;
    let flux_run = SimulationRunner::new(config, steps, OutputMode::Flux)
        .unwrap()
        .run();
    let snap_run = SimulationRunner::new(config, steps, OutputMode::Snapshots { stride: 100 })
        .unwrap()
        .run();

    let samples = flux_run.flux_samples().unwrap();
    let snapshots = snap_run.snapshots().unwrap();
    let probe = FluxProbe::new(&config);

    assert_eq!(snapshots.len(), 11);
    for snap in snapshots.iter().filter(|s| s.updates > 0) {
        let from_snapshot = probe.sample(&snap.values, snap.time);
        assert_eq!(
            from_snapshot,
            samples[snap.updates - 1],
            "mismatch after {} updates",
            snap.updates
        );
    }
    assert_eq!(flux_run.final_field().values(), snap_run.final_field().values());
}

#[test]
fn test_parallel_run_matches_serial() {
    let config = wall();
    let serial = SimulationRunner::new(config, 500, OutputMode::Snapshots { stride: 50 })
        .unwrap()
        .run();
    let parallel = SimulationRunner::new(config, 500, OutputMode::Snapshots { stride: 50 })
        .unwrap()
        .with_sweep(Sweep::Parallel)
        .run();

    assert_eq!(serial.output(), parallel.output());
}

#[test]
fn test_boundaries_fixed_in_every_snapshot() {
    let run = SimulationRunner::new(wall(), 2000, OutputMode::Snapshots { stride: 1 })
        .unwrap()
        .run();
    for snap in run.snapshots().unwrap() {
        assert_eq!(snap.values[0], 100.0);
        assert_eq!(snap.values[99], 0.0);
    }
}

#[test]
fn test_five_point_first_step() {
    let config = GridConfig::new(GridParams {
        points: 5,
        ..GridParams::default()
    })
    .unwrap();
    assert_eq!(config.dx(), 0.25);
    assert!((config.dt() - 312.5).abs() < 1e-9);

    let mut field = FieldState::initialize(&config);
    assert_eq!(field.values(), &[100.0, 0.0, 0.0, 0.0, 0.0]);

    Stepper::default().advance(&mut field, &config);
    let expected = [100.0, 50.0, 0.0, 0.0, 0.0];
    for (got, want) in field.values().iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "got {:?}", field.values());
    }
}

#[test]
fn test_invalid_configurations() {
    let err = GridConfig::new(GridParams {
        points: 2,
        ..GridParams::default()
    })
    .unwrap_err();
    assert!(matches!(
        err,
        HeatError::InvalidConfiguration {
            parameter: "points",
            ..
        }
    ));

    let err = GridConfig::new(GridParams {
        length: 0.0,
        ..GridParams::default()
    })
    .unwrap_err();
    assert!(matches!(
        err,
        HeatError::InvalidConfiguration {
            parameter: "length",
            ..
        }
    ));
}
