use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sim::heat_transfer::field::FieldState;
use crate::sim::heat_transfer::grid::GridConfig;

/// How the interior points of one step are swept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sweep {
    /// Single-threaded loop over the interior.
    #[default]
    Serial,
    /// Interior points split across the rayon thread pool.
    ///
    /// Every point is computed from the same inputs with the same expression,
    /// so the result is bit-identical to [`Sweep::Serial`].
    Parallel,
}

/// Explicit (forward Euler) finite-difference stepper with Dirichlet boundaries.
///
/// One step applies
///
/// ```text
/// T'[i] = T[i] + alpha*dt/dx^2 * (T[i+1] - 2*T[i] + T[i-1])    for 1 <= i <= n-2
/// ```
///
/// and copies the two boundary values unchanged. No stability or NaN checks
/// are made; non-finite temperatures propagate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stepper {
    sweep: Sweep,
}

impl Stepper {
    pub fn new(sweep: Sweep) -> Self {
        Self { sweep }
    }

    pub fn sweep(&self) -> Sweep {
        self.sweep
    }

    /// Advance `field` by one time step of `config.dt()`.
    pub fn advance(&self, field: &mut FieldState, config: &GridConfig) {
        let r = config.diffusion_number();
        let (current, next) = field.buffers_mut();
        let n = current.len();

        next[0] = current[0];
        next[n - 1] = current[n - 1];

        let interior = &mut next[1..n - 1];
        match self.sweep {
            Sweep::Serial => {
                for (t, w) in interior.iter_mut().zip(current.windows(3)) {
                    *t = explicit_update(w, r);
                }
            }
            Sweep::Parallel => {
                interior
                    .par_iter_mut()
                    .zip(current.par_windows(3))
                    .for_each(|(t, w)| *t = explicit_update(w, r));
            }
        }

        field.commit();
    }
}

/// New value of the centre point of a `[left, centre, right]` stencil window.
#[inline]
fn explicit_update(w: &[f64], r: f64) -> f64 {
    w[1] + r * (w[2] - 2.0 * w[1] + w[0])
}
