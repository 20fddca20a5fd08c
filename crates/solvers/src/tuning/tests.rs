use std::{sync::Arc, time::Duration};

use approx::assert_relative_eq;
use rayon::ThreadPoolBuilder;
use swarm_core::{Constraint, Goal, Objective, Problem};

use crate::{pso, trials};

use super::{
    ConfigError, Error, Hyperparameters, Limits, RuntimeConstraint, Settings, Tuner,
    VarianceObjective,
};

fn wave() -> Arc<Problem> {
    let problem = Problem::new(
        |x: &[f64]| 2.0 * x[0] * (x[0] * x[0]).sin(),
        [(-3.0, 3.0)],
        1,
        Goal::Maximize,
    )
    .unwrap();
    Arc::new(problem)
}

/// Maximize `x` on `[0, 1]`, feasible only above 0.95.
fn narrow() -> Arc<Problem> {
    let problem = Problem::new(|x: &[f64]| x[0], [(0.0, 1.0)], 1, Goal::Maximize)
        .unwrap()
        .with_constraint(|x: &[f64]| x[0] > 0.95);
    Arc::new(problem)
}

fn narrow_limits(seed: u64) -> Limits {
    Limits::new(10, Duration::from_secs(10), 300, 5, 2.0)
        .unwrap()
        .with_seed(seed)
}

fn limits() -> Limits {
    Limits::new(3, Duration::from_secs(10), 8, 5, 2.0)
        .unwrap()
        .with_seed(17)
}

fn settings(outer_threads: usize) -> Settings {
    Settings::new(
        pso::Config::new(3, 2, 1.5, 1.5).unwrap(),
        trials::Config::new(2).unwrap().with_seed(1),
    )
    .with_outer_threads(outer_threads)
    .unwrap()
}

#[test]
fn search_problem_spans_limits() {
    let tuner = Tuner::new(wave(), limits());

    let problem = tuner.search_problem(None).unwrap();

    let bounds: Vec<_> = problem.bounds().iter().map(|b| (b.min(), b.max())).collect();
    assert_eq!(bounds, [(1.0, 8.0), (0.0, 5.0), (0.0, 2.0), (0.0, 2.0)]);
    assert_eq!(problem.dimensions(), Hyperparameters::DIMENSIONS);
    assert_eq!(problem.goal(), Goal::Minimize);
    assert_eq!(problem.constraint_count(), 1);
}

#[test]
fn seeded_variance_is_reproducible() {
    let objective = VarianceObjective::new(wave(), limits());
    let candidate = [4.0, 3.0, 1.0, 1.0];

    let first = objective.evaluate(&candidate).unwrap();
    let second = objective.evaluate(&candidate).unwrap();

    assert!(first >= 0.0);
    assert_relative_eq!(first, second);
}

#[test]
fn malformed_candidate_is_a_domain_error() {
    let objective = VarianceObjective::new(wave(), limits());

    assert!(objective.evaluate(&[4.0, 3.0]).is_err());
}

#[test]
fn runtime_constraint_accepts_fast_candidates() {
    let pool = ThreadPoolBuilder::new().num_threads(2).build().unwrap();
    let constraint = RuntimeConstraint::new(wave(), limits(), Some(Arc::new(pool)));

    assert!(constraint.check(&[4.0, 3.0, 1.0, 1.0]).unwrap());
}

#[test]
fn runtime_constraint_is_checked_after_the_run() {
    let limits = Limits::new(3, Duration::ZERO, 8, 5, 2.0).unwrap();
    let constraint = RuntimeConstraint::new(wave(), limits, None);

    assert!(!constraint.check(&[4.0, 3.0, 1.0, 1.0]).unwrap());
}

#[test]
fn run_reports_one_outcome_per_outer_trial() {
    let tuner = Tuner::new(wave(), limits());

    let batch = tuner.run(&settings(1)).unwrap();

    assert_eq!(batch.outcomes().len(), 2);
    for outcome in batch.outcomes() {
        let hyper = Hyperparameters::from_position(&outcome.position).unwrap();
        assert!((1..=8).contains(&hyper.particles));
        assert!(hyper.iterations <= 5);
        assert!((0.0..=2.0).contains(&hyper.cognitive));
        assert!((0.0..=2.0).contains(&hyper.social));
        assert!(outcome.value >= 0.0);
    }
}

#[test]
fn run_with_inner_and_outer_pools() {
    let limits = limits().with_threads(2, 4).unwrap();
    let tuner = Tuner::new(wave(), limits);

    let batch = tuner.run(&settings(2)).unwrap();

    assert_eq!(batch.outcomes().len(), 2);
}

#[test]
fn run_rejects_thread_multiplication() {
    let limits = limits().with_threads(2, 4).unwrap();
    let tuner = Tuner::new(wave(), limits);

    let error = tuner.run(&settings(3)).unwrap_err();

    assert!(matches!(
        error,
        Error::Config(ConfigError::ThreadBudget {
            outer: 3,
            inner: 2,
            max: 4
        })
    ));
}

#[test]
fn candidate_with_failed_trials_is_rejected() {
    // A single particle rarely spawns inside the narrow feasible region.
    let lonely = [1.0, 0.0, 1.0, 1.0];

    for seed in 0..4 {
        let objective = VarianceObjective::new(narrow(), narrow_limits(seed));
        let constraint = RuntimeConstraint::new(narrow(), narrow_limits(seed), None);

        assert!(!constraint.check(&lonely).unwrap());
        assert!(objective.evaluate(&lonely).unwrap().is_infinite());
    }
}

#[test]
fn failing_candidate_never_beats_a_complete_one() {
    let lonely = [1.0, 0.0, 1.0, 1.0];
    let crowd = [300.0, 0.0, 1.0, 1.0];

    for seed in 0..4 {
        let objective = VarianceObjective::new(narrow(), narrow_limits(seed));
        let constraint = RuntimeConstraint::new(narrow(), narrow_limits(seed), None);

        let variance = objective.evaluate(&crowd).unwrap();
        assert!(constraint.check(&crowd).unwrap());
        assert!(variance.is_finite());
        assert!(variance < objective.evaluate(&lonely).unwrap());
    }
}

#[test]
fn search_problem_marks_failing_candidates_infeasible() {
    let tuner = Tuner::new(narrow(), narrow_limits(1));

    let problem = tuner.search_problem(None).unwrap();

    assert!(!problem.is_feasible(&[1.0, 0.0, 1.0, 1.0]).unwrap());
    assert!(problem.is_feasible(&[300.0, 0.0, 1.0, 1.0]).unwrap());
}

#[test]
fn infeasible_target_leaves_no_feasible_candidate() {
    let target = Problem::new(|x: &[f64]| x[0], [(0.0, 1.0)], 1, Goal::Maximize)
        .unwrap()
        .with_constraint(|_: &[f64]| false);
    let tuner = Tuner::new(Arc::new(target), limits());
    let settings = Settings::new(
        pso::Config::new(3, 2, 1.5, 1.5).unwrap(),
        trials::Config::new(2)
            .unwrap()
            .with_seed(1)
            .with_policy(trials::FailurePolicy::Abort),
    );

    let error = tuner.run(&settings).unwrap_err();

    match error {
        Error::Trials(trials::Error::Trial { trial, source }) => {
            assert_eq!(trial, 0);
            assert!(source.to_string().starts_with("no feasible position"));
        }
        error => panic!("unexpected error: {error}"),
    }
}
