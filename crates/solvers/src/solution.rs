#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The result of one completed solver run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    /// Objective value at `position`, in the problem's own direction.
    pub value: f64,

    /// Best feasible position found.
    pub position: Vec<f64>,

    /// Iteration count when the solver finished.
    pub iters: usize,
}
