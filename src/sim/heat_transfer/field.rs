use crate::sim::heat_transfer::grid::GridConfig;

/// Temperature field on the slab grid.
///
/// The live buffer is paired with a scratch buffer of the same length. A step
/// reads the live buffer, writes the scratch buffer, then swaps the two, so a
/// sweep never observes values it has already overwritten and no step
/// allocates.
#[derive(Debug, Clone)]
pub struct FieldState {
    /// Current temperatures [C], boundaries included.
    temperatures: Vec<f64>,
    /// Write target for the next step.
    scratch: Vec<f64>,
    left_temp: f64,
    right_temp: f64,
}

impl FieldState {
    /// Initial field: interior at 0 C, boundaries at their fixed temperatures.
    pub fn initialize(config: &GridConfig) -> Self {
        let n = config.points();
        let mut temperatures = vec![0.0; n];
        temperatures[0] = config.left_temp();
        temperatures[n - 1] = config.right_temp();
        Self {
            scratch: temperatures.clone(),
            temperatures,
            left_temp: config.left_temp(),
            right_temp: config.right_temp(),
        }
    }

    /// The fixed `(left, right)` boundary temperatures.
    pub fn boundary_values(&self) -> (f64, f64) {
        (self.left_temp, self.right_temp)
    }

    /// Current temperatures, boundaries included.
    pub fn values(&self) -> &[f64] {
        &self.temperatures
    }

    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }

    /// Splits the field into the read-only live buffer and the writable scratch buffer.
    pub(crate) fn buffers_mut(&mut self) -> (&[f64], &mut [f64]) {
        (&self.temperatures, &mut self.scratch)
    }

    /// Makes the scratch buffer authoritative. The old live buffer becomes scratch.
    pub(crate) fn commit(&mut self) {
        std::mem::swap(&mut self.temperatures, &mut self.scratch);
    }
}
