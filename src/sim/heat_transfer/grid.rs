use serde::{Deserialize, Serialize};

use crate::error::{HeatError, Result};

/// Time step as a fraction of `dx^2 / alpha`.
///
/// The explicit scheme is stable while `alpha * dt / dx^2 <= 0.5`, so this
/// places every run on the stability limit.
pub const DT_FACTOR: f64 = 0.5;

/// Minimum number of grid points (two boundaries plus one interior point).
pub const MIN_POINTS: usize = 3;

/// Raw slab parameters, as written in a job file.
///
/// Defaults describe a 1 m wall held at 100 C on the left and 0 C on the right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridParams {
    /// Slab length in m.
    pub length: f64,
    /// Fixed temperature at x = 0 in C.
    pub left_temp: f64,
    /// Fixed temperature at x = L in C.
    pub right_temp: f64,
    /// Thermal diffusivity in m^2/s.
    pub diffusivity: f64,
    /// Thermal conductivity in W/(m*K). Only needed for boundary power.
    pub conductivity: f64,
    /// Cross-section area in m^2. Only needed for boundary power.
    pub area: f64,
    /// Number of grid points, boundaries included.
    pub points: usize,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            length: 1.0,
            left_temp: 100.0,
            right_temp: 0.0,
            diffusivity: 1e-4,
            conductivity: 50.0,
            area: 1.0,
            points: 100,
        }
    }
}

/// Validated, immutable discretization of the slab.
///
/// Holds the input parameters together with the derived grid spacing
/// `dx = L / (n - 1)` and time step `dt = DT_FACTOR * dx^2 / alpha`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridParams", into = "GridParams")]
pub struct GridConfig {
    params: GridParams,
    dx: f64,
    dt: f64,
}

impl GridConfig {
    /// Validates `params` and derives the spacing and time step.
    pub fn new(params: GridParams) -> Result<Self> {
        if params.points < MIN_POINTS {
            return Err(HeatError::invalid(
                "points",
                format!("must be at least {MIN_POINTS}, got {}", params.points),
            ));
        }
        for (name, value) in [
            ("length", params.length),
            ("left_temp", params.left_temp),
            ("right_temp", params.right_temp),
            ("diffusivity", params.diffusivity),
            ("conductivity", params.conductivity),
            ("area", params.area),
        ] {
            if !value.is_finite() {
                return Err(HeatError::invalid(name, format!("must be finite, got {value}")));
            }
        }
        if params.length <= 0.0 {
            return Err(HeatError::invalid(
                "length",
                format!("must be positive, got {}", params.length),
            ));
        }
        if params.diffusivity <= 0.0 {
            return Err(HeatError::invalid(
                "diffusivity",
                format!("must be positive, got {}", params.diffusivity),
            ));
        }

        let config = Self::derive(params);
        if !(config.dt.is_finite() && config.dt > 0.0) {
            return Err(HeatError::invalid(
                "diffusivity",
                format!(
                    "derived time step {} is not a positive finite number (dx = {})",
                    config.dt, config.dx
                ),
            ));
        }
        Ok(config)
    }

    fn derive(params: GridParams) -> Self {
        let dx = params.length / (params.points - 1) as f64;
        let dt = DT_FACTOR * dx * dx / params.diffusivity;
        Self { params, dx, dt }
    }

    /// Checks the material constants used to turn gradients into power.
    pub fn check_flux_properties(&self) -> Result<()> {
        if self.params.conductivity <= 0.0 {
            return Err(HeatError::invalid(
                "conductivity",
                format!("must be positive, got {}", self.params.conductivity),
            ));
        }
        if self.params.area <= 0.0 {
            return Err(HeatError::invalid(
                "area",
                format!("must be positive, got {}", self.params.area),
            ));
        }
        Ok(())
    }

    pub fn params(&self) -> &GridParams {
        &self.params
    }

    pub fn length(&self) -> f64 {
        self.params.length
    }

    pub fn left_temp(&self) -> f64 {
        self.params.left_temp
    }

    pub fn right_temp(&self) -> f64 {
        self.params.right_temp
    }

    pub fn diffusivity(&self) -> f64 {
        self.params.diffusivity
    }

    pub fn conductivity(&self) -> f64 {
        self.params.conductivity
    }

    pub fn area(&self) -> f64 {
        self.params.area
    }

    pub fn points(&self) -> usize {
        self.params.points
    }

    /// Grid spacing in m.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Time step in s.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Dimensionless diffusion number `alpha * dt / dx^2`.
    pub fn diffusion_number(&self) -> f64 {
        self.params.diffusivity * self.dt / (self.dx * self.dx)
    }

    /// Coordinates of the grid points, from 0 to L inclusive.
    pub fn positions(&self) -> Vec<f64> {
        let last = (self.params.points - 1) as f64;
        (0..self.params.points)
            .map(|i| self.params.length * i as f64 / last)
            .collect()
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::derive(GridParams::default())
    }
}

impl TryFrom<GridParams> for GridConfig {
    type Error = HeatError;

    fn try_from(params: GridParams) -> Result<Self> {
        Self::new(params)
    }
}

impl From<GridConfig> for GridParams {
    fn from(config: GridConfig) -> Self {
        config.params
    }
}
