/// An error raised by a user objective or constraint.
///
/// Examples include the logarithm of a non-positive quantity or a model that
/// cannot be evaluated at the requested point. Solvers do not inspect these
/// errors; they propagate them to the caller.
pub type DomainError = Box<dyn std::error::Error + Send + Sync>;

/// An objective function `f(x) -> value`.
///
/// Implementations receive a slice whose length the owning
/// [`Problem`](crate::Problem) has already checked against its dimensions.
///
/// Closures of the form `Fn(&[f64]) -> f64` implement this trait directly.
/// Wrap fallible closures in [`TryFn`].
pub trait Objective: Send + Sync {
    /// Evaluates the objective at `x`.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the objective is undefined at `x`.
    fn evaluate(&self, x: &[f64]) -> Result<f64, DomainError>;
}

/// A boolean constraint predicate `g(x) -> bool`.
///
/// A point is feasible when every constraint of a problem returns `true`.
///
/// Closures of the form `Fn(&[f64]) -> bool` implement this trait directly.
/// Wrap fallible closures in [`TryFn`].
pub trait Constraint: Send + Sync {
    /// Checks whether `x` satisfies the constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the predicate cannot be evaluated at `x`.
    fn check(&self, x: &[f64]) -> Result<bool, DomainError>;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn evaluate(&self, x: &[f64]) -> Result<f64, DomainError> {
        Ok(self(x))
    }
}

impl<F> Constraint for F
where
    F: Fn(&[f64]) -> bool + Send + Sync,
{
    fn check(&self, x: &[f64]) -> Result<bool, DomainError> {
        Ok(self(x))
    }
}

/// Adapter for fallible closures.
///
/// `TryFn(f)` implements [`Objective`] when `f` returns `Result<f64, E>` and
/// [`Constraint`] when `f` returns `Result<bool, E>`.
///
/// ```
/// use swarm_core::{Objective, TryFn};
///
/// let log = TryFn(|x: &[f64]| {
///     if x[0] > 0.0 { Ok(x[0].ln()) } else { Err("non-positive input") }
/// });
///
/// assert!(log.evaluate(&[1.0]).is_ok());
/// assert!(log.evaluate(&[-1.0]).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TryFn<F>(pub F);

impl<F, E> Objective for TryFn<F>
where
    F: Fn(&[f64]) -> Result<f64, E> + Send + Sync,
    E: Into<DomainError>,
{
    fn evaluate(&self, x: &[f64]) -> Result<f64, DomainError> {
        (self.0)(x).map_err(Into::into)
    }
}

impl<F, E> Constraint for TryFn<F>
where
    F: Fn(&[f64]) -> Result<bool, E> + Send + Sync,
    E: Into<DomainError>,
{
    fn check(&self, x: &[f64]) -> Result<bool, DomainError> {
        (self.0)(x).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn closures_are_objectives() {
        let sum = |x: &[f64]| x.iter().sum::<f64>();
        assert_relative_eq!(sum.evaluate(&[1.0, 2.0]).unwrap(), 3.0);
    }

    #[test]
    fn closures_are_constraints() {
        let positive = |x: &[f64]| x[0] > 0.0;
        assert!(positive.check(&[1.0]).unwrap());
        assert!(!positive.check(&[-1.0]).unwrap());
    }

    #[test]
    fn fallible_constraint_propagates_error() {
        let guarded = TryFn(|x: &[f64]| {
            if x[0].is_nan() {
                Err("undefined")
            } else {
                Ok(x[0] < 1.0)
            }
        });

        assert!(guarded.check(&[0.5]).unwrap());
        let error = guarded.check(&[f64::NAN]).unwrap_err();
        assert_eq!(error.to_string(), "undefined");
    }
}
