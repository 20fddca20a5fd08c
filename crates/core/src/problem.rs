use std::{fmt, sync::Arc};

use crate::{Bound, Constraint, EvalError, Goal, Objective, ProblemError};

/// Describes a bounded, optionally constrained optimization problem.
///
/// A problem bundles an [`Objective`], one [`Bound`] per dimension, a [`Goal`],
/// and an ordered list of [`Constraint`] predicates. Constraints may be added
/// while building the problem; solvers share it behind an [`Arc`], after which
/// it is immutable.
///
/// [`Problem::evaluate`] returns a *score* normalized by the goal, so solvers
/// always prefer the greater score and never need to check the direction.
///
/// # Example
///
/// ```
/// use swarm_core::{Goal, Problem};
///
/// let problem = Problem::new(
///     |x: &[f64]| 40.0 * x[0] + 50.0 * x[1],
///     [(0.0, 100.0), (0.0, 100.0)],
///     2,
///     Goal::Maximize,
/// )
/// .unwrap()
/// .with_constraint(|x: &[f64]| x[0] + x[1] <= 50.0);
///
/// assert!(problem.is_feasible(&[20.0, 30.0]).unwrap());
/// assert!(!problem.is_feasible(&[40.0, 30.0]).unwrap());
/// ```
#[derive(Clone)]
pub struct Problem {
    objective: Arc<dyn Objective>,
    bounds: Vec<Bound>,
    goal: Goal,
    constraints: Vec<Arc<dyn Constraint>>,
}

impl Problem {
    /// Creates an unconstrained problem.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::ArgumentMismatch`] if the number of bounds
    /// differs from `dimensions`, [`ProblemError::NoDimensions`] if
    /// `dimensions` is zero, or [`ProblemError::Bound`] if a bound is invalid.
    pub fn new<O, B>(
        objective: O,
        bounds: B,
        dimensions: usize,
        goal: Goal,
    ) -> Result<Self, ProblemError>
    where
        O: Objective + 'static,
        B: IntoIterator<Item = (f64, f64)>,
    {
        let bounds = bounds
            .into_iter()
            .enumerate()
            .map(|(index, limits)| {
                Bound::try_from(limits).map_err(|source| ProblemError::Bound { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if bounds.len() != dimensions {
            return Err(ProblemError::ArgumentMismatch {
                dimensions,
                bounds: bounds.len(),
            });
        }
        if dimensions == 0 {
            return Err(ProblemError::NoDimensions);
        }

        Ok(Self {
            objective: Arc::new(objective),
            bounds,
            goal,
            constraints: Vec::new(),
        })
    }

    /// Adds a constraint and returns the problem.
    #[must_use]
    pub fn with_constraint<C>(mut self, constraint: C) -> Self
    where
        C: Constraint + 'static,
    {
        self.add_constraint(constraint);
        self
    }

    /// Appends a constraint.
    ///
    /// Predicates are opaque, so dimension mismatches surface when the
    /// problem is evaluated, not here.
    pub fn add_constraint<C>(&mut self, constraint: C)
    where
        C: Constraint + 'static,
    {
        self.constraints.push(Arc::new(constraint));
    }

    /// Returns the number of dimensions.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.bounds.len()
    }

    /// Returns the per-dimension bounds.
    #[must_use]
    pub fn bounds(&self) -> &[Bound] {
        &self.bounds
    }

    /// Returns the optimization direction.
    #[must_use]
    pub fn goal(&self) -> Goal {
        self.goal
    }

    /// Returns the number of registered constraints.
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Evaluates the raw objective value at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::ArgumentMismatch`] if `x` has the wrong length,
    /// or [`EvalError::Objective`] if the objective fails or returns NaN.
    pub fn objective_value(&self, x: &[f64]) -> Result<f64, EvalError> {
        self.check_dimensions(x)?;
        let value = self.objective.evaluate(x).map_err(EvalError::Objective)?;
        if value.is_nan() {
            return Err(EvalError::Objective("objective returned NaN".into()));
        }
        Ok(value)
    }

    /// Evaluates the normalized score at `x` (greater is better).
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::ArgumentMismatch`] if `x` has the wrong length,
    /// or [`EvalError::Objective`] if the objective fails.
    pub fn evaluate(&self, x: &[f64]) -> Result<f64, EvalError> {
        self.objective_value(x).map(|value| self.goal.score(value))
    }

    /// Returns true if every constraint holds at `x`.
    ///
    /// Constraints are checked in registration order and checking stops at
    /// the first one that does not hold. A problem without constraints is
    /// feasible everywhere.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::ArgumentMismatch`] if `x` has the wrong length,
    /// or [`EvalError::Constraint`] if a predicate fails.
    pub fn is_feasible(&self, x: &[f64]) -> Result<bool, EvalError> {
        self.check_dimensions(x)?;
        for (index, constraint) in self.constraints.iter().enumerate() {
            let holds = constraint
                .check(x)
                .map_err(|source| EvalError::Constraint { index, source })?;
            if !holds {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Returns true if every coordinate of `x` lies within its bound.
    #[must_use]
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.dimensions()
            && self
                .bounds
                .iter()
                .zip(x)
                .all(|(bound, &value)| bound.contains(value))
    }

    fn check_dimensions(&self, x: &[f64]) -> Result<(), EvalError> {
        if x.len() == self.dimensions() {
            Ok(())
        } else {
            Err(EvalError::ArgumentMismatch {
                expected: self.dimensions(),
                actual: x.len(),
            })
        }
    }
}

impl fmt::Debug for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Problem")
            .field("bounds", &self.bounds)
            .field("goal", &self.goal)
            .field("constraints", &self.constraints.len())
            .finish_non_exhaustive()
    }
}
