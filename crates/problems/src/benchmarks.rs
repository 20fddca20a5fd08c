//! Standard test functions with known optima.
//!
//! Each constructor returns a [`Benchmark`] holding a ready [`Problem`] and,
//! where one is known, the optimal objective value.

use std::sync::Arc;

use swarm_core::{Goal, Problem, ProblemError};

/// A benchmark problem and its known optimal value.
#[derive(Debug, Clone)]
pub struct Benchmark {
    pub name: &'static str,
    pub problem: Arc<Problem>,
    pub optimum: Option<f64>,
}

/// Himmelblau's function, `(x² + y − 11)² + (x + y² − 7)²`.
///
/// It has four global minima of value zero, one of them at `(3, 2)`.
#[must_use]
pub fn himmelblau_fn(x: &[f64]) -> f64 {
    let (a, b) = (x[0], x[1]);
    (a * a + b - 11.0).powi(2) + (a + b * b - 7.0).powi(2)
}

/// The Rosenbrock function, `(1 − x)² + 100(y − x²)²`, minimum zero at `(1, 1)`.
#[must_use]
pub fn rosenbrock_fn(x: &[f64]) -> f64 {
    let (a, b) = (x[0], x[1]);
    (1.0 - a).powi(2) + 100.0 * (b - a * a).powi(2)
}

/// `2x·sin(x²)`, whose maximum on `[-3, 3]` is about 5.616 near `x = 2.814`.
#[must_use]
pub fn wave_fn(x: &[f64]) -> f64 {
    2.0 * x[0] * (x[0] * x[0]).sin()
}

/// `x⁴ + x³ − 3x² + 1`.
#[must_use]
pub fn quartic_fn(x: &[f64]) -> f64 {
    let v = x[0];
    v.powi(4) + v.powi(3) - 3.0 * v * v + 1.0
}

/// Minimize Himmelblau's function on `[-5, 5]²`.
///
/// # Errors
///
/// Never fails for these fixed bounds; the result mirrors [`Problem::new`].
pub fn himmelblau() -> Result<Benchmark, ProblemError> {
    let problem = Problem::new(himmelblau_fn, [(-5.0, 5.0), (-5.0, 5.0)], 2, Goal::Minimize)?;
    Ok(Benchmark {
        name: "himmelblau",
        problem: Arc::new(problem),
        optimum: Some(0.0),
    })
}

/// Minimize the Rosenbrock function on `[-3, 3]²`.
///
/// # Errors
///
/// Never fails for these fixed bounds; the result mirrors [`Problem::new`].
pub fn rosenbrock() -> Result<Benchmark, ProblemError> {
    let problem = Problem::new(rosenbrock_fn, [(-3.0, 3.0), (-3.0, 3.0)], 2, Goal::Minimize)?;
    Ok(Benchmark {
        name: "rosenbrock",
        problem: Arc::new(problem),
        optimum: Some(0.0),
    })
}

/// Maximize `2x·sin(x²)` on `[-3, 3]`.
///
/// # Errors
///
/// Never fails for these fixed bounds; the result mirrors [`Problem::new`].
pub fn wave() -> Result<Benchmark, ProblemError> {
    let problem = Problem::new(wave_fn, [(-3.0, 3.0)], 1, Goal::Maximize)?;
    Ok(Benchmark {
        name: "wave",
        problem: Arc::new(problem),
        optimum: Some(WAVE_MAX),
    })
}

/// Maximize the quartic on `[-3, 3]` where `g(x) = x⁴ + x³ − 2x²` satisfies
/// `g(x) + 2 ≥ 0` and `g(x) + 0.1 ≤ 0`.
///
/// The feasible region is three intervals inside `(-2, 1)`. The maximum,
/// about 0.8539, lies on the boundary `g(x) = -0.1` near `x = -0.2147`.
///
/// # Errors
///
/// Never fails for these fixed bounds; the result mirrors [`Problem::new`].
pub fn constrained_quartic() -> Result<Benchmark, ProblemError> {
    let g = |x: &[f64]| {
        let v = x[0];
        v.powi(4) + v.powi(3) - 2.0 * v * v
    };

    let problem = Problem::new(quartic_fn, [(-3.0, 3.0)], 1, Goal::Maximize)?
        .with_constraint(move |x: &[f64]| g(x) + 2.0 >= 0.0)
        .with_constraint(move |x: &[f64]| g(x) + 0.1 <= 0.0);

    Ok(Benchmark {
        name: "constrained quartic",
        problem: Arc::new(problem),
        optimum: Some(QUARTIC_MAX),
    })
}

/// `2x·sin(x²)` at its maximizer on `[-3, 3]`.
const WAVE_MAX: f64 = 5.616_262;

/// The constrained quartic at its maximizer.
const QUARTIC_MAX: f64 = 0.853_888;

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn himmelblau_minima() {
        assert_relative_eq!(himmelblau_fn(&[3.0, 2.0]), 0.0);
        assert_relative_eq!(
            himmelblau_fn(&[-2.805_118, 3.131_312]),
            0.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(himmelblau_fn(&[0.0, 0.0]), 170.0);
    }

    #[test]
    fn rosenbrock_minimum() {
        assert_relative_eq!(rosenbrock_fn(&[1.0, 1.0]), 0.0);
        assert_relative_eq!(rosenbrock_fn(&[0.0, 0.0]), 1.0);
    }

    #[test]
    fn wave_maximum_is_near_edge() {
        let best = (0..=60_000)
            .map(|i| -3.0 + f64::from(i) * 1e-4)
            .map(|x| wave_fn(&[x]))
            .fold(f64::NEG_INFINITY, f64::max);

        assert_relative_eq!(best, WAVE_MAX, epsilon = 1e-3);
    }

    #[test]
    fn quartic_feasible_region() {
        let problem = constrained_quartic().unwrap().problem;

        assert!(problem.is_feasible(&[-0.5]).unwrap());
        assert!(problem.is_feasible(&[-1.9]).unwrap());
        assert!(problem.is_feasible(&[0.5]).unwrap());
        assert!(!problem.is_feasible(&[0.0]).unwrap());
        assert!(!problem.is_feasible(&[2.0]).unwrap());
        assert!(!problem.is_feasible(&[-2.5]).unwrap());
    }

    #[test]
    fn benchmark_directions() {
        assert_eq!(himmelblau().unwrap().problem.goal(), Goal::Minimize);
        assert_eq!(rosenbrock().unwrap().problem.goal(), Goal::Minimize);
        assert_eq!(wave().unwrap().problem.goal(), Goal::Maximize);
    }

    #[test]
    fn quartic_maximum_sits_on_constraint_boundary() {
        let benchmark = constrained_quartic().unwrap();
        let best = (0..=60_000)
            .map(|i| -3.0 + f64::from(i) * 1e-4)
            .filter(|&x| benchmark.problem.is_feasible(&[x]).unwrap())
            .map(|x| quartic_fn(&[x]))
            .fold(f64::NEG_INFINITY, f64::max);

        assert_relative_eq!(best, benchmark.optimum.unwrap(), epsilon = 1e-3);
    }
}
