use thiserror::Error;

use crate::{DomainError, bound::BoundError};

/// Errors that can occur when evaluating a [`Problem`](crate::Problem).
#[derive(Debug, Error)]
pub enum EvalError {
    /// The position length disagrees with the problem's dimensions.
    #[error("position has {actual} coordinates but the problem has {expected} dimensions")]
    ArgumentMismatch { expected: usize, actual: usize },

    /// The objective is undefined at the position.
    #[error("objective failed: {0}")]
    Objective(#[source] DomainError),

    /// A constraint predicate is undefined at the position.
    #[error("constraint {index} failed: {source}")]
    Constraint {
        index: usize,
        #[source]
        source: DomainError,
    },
}

/// Errors that can occur when constructing a [`Problem`](crate::Problem).
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ProblemError {
    /// The number of bounds disagrees with the declared dimensions.
    #[error("{bounds} bounds given for a problem with {dimensions} dimensions")]
    ArgumentMismatch { dimensions: usize, bounds: usize },

    /// A problem must have at least one dimension.
    #[error("a problem must have at least one dimension")]
    NoDimensions,

    /// A bound is invalid.
    #[error("bound {index} is invalid: {source}")]
    Bound {
        index: usize,
        #[source]
        source: BoundError,
    },
}
