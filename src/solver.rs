/// Settings of the root-finding used for inverse evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverOptions {
    /// Maximum error on the searched component for a root to be accepted,
    /// relative to the largest magnitude of the section's control values on
    /// that axis.
    pub tolerance: f64,
    /// Maximum number of refinement steps per monotonic interval.
    /// A search that runs out of steps is dropped.
    pub max_iterations: usize,
}

impl SolverOptions {
    /// The default relative tolerance on the searched component.
    pub const DEFAULT_TOLERANCE: f64 = 1e-9;

    /// The default iteration cap.
    pub const DEFAULT_MAX_ITERATIONS: usize = 64;

    /// Returns a copy of these options with the given tolerance.
    pub fn with_tolerance(self, tolerance: f64) -> Self {
        Self { tolerance, ..self }
    }

    /// Returns a copy of these options with the given iteration cap.
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tolerance: Self::DEFAULT_TOLERANCE,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }
}
