use serde::{Deserialize, Serialize};

use crate::sim::heat_transfer::grid::GridConfig;

/// Boundary power at one instant.
///
/// Positive power means heat flowing in the +x direction (left to right).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluxSample {
    /// Simulation time in s.
    pub time: f64,
    /// Power through the left boundary in W.
    pub left_power: f64,
    /// Power through the right boundary in W.
    pub right_power: f64,
}

impl FluxSample {
    /// Rate at which the slab is storing heat [W]: power in at the left minus
    /// power out at the right. Tends to zero at steady state.
    pub fn storage_rate(&self) -> f64 {
        self.left_power - self.right_power
    }
}

/// Boundary heat flux probe.
///
/// Uses first-order one-sided differences at each end:
///
/// ```text
/// P_left  = -k*A * (T[1]   - T[0])   / dx
/// P_right = -k*A * (T[n-1] - T[n-2]) / dx
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluxProbe {
    /// k*A [W*m/K].
    conductance_length: f64,
    dx: f64,
}

impl FluxProbe {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            conductance_length: config.conductivity() * config.area(),
            dx: config.dx(),
        }
    }

    /// Samples the boundary power of `field` (boundaries included, length >= 3).
    pub fn sample(&self, field: &[f64], time: f64) -> FluxSample {
        let n = field.len();
        debug_assert!(n >= 3, "flux probe needs at least 3 points, got {n}");
        FluxSample {
            time,
            left_power: -self.conductance_length * (field[1] - field[0]) / self.dx,
            right_power: -self.conductance_length * (field[n - 1] - field[n - 2]) / self.dx,
        }
    }
}
