use serde::{Deserialize, Serialize};

/// Pass cap used by the request/response boundary.
pub const DEFAULT_SERVICE_ITERATION_CAP: usize = 50;

/// Knobs for a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Upper bound on bounded-search passes: the first pass plus every
    /// threshold increase. `None` searches until a solution is found.
    pub max_iterations: Option<usize>,
}

impl SolverConfig {
    pub fn unbounded() -> Self {
        Self { max_iterations: None }
    }

    pub fn service() -> Self {
        Self {
            max_iterations: Some(DEFAULT_SERVICE_ITERATION_CAP),
        }
    }

    pub fn with_max_iterations(mut self, cap: usize) -> Self {
        self.max_iterations = Some(cap);
        self
    }
}
