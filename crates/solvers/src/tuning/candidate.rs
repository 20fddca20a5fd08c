use std::{
    hash::{DefaultHasher, Hash, Hasher},
    sync::Arc,
};

use rayon::ThreadPool;
use swarm_core::{Constraint, DomainError, Objective, Problem};
use tracing::{debug, warn};

use crate::{
    pso::Pso,
    trials::{self, MultipleSolving, TrialBatch},
};

use super::{Hyperparameters, Limits};

/// Scores a candidate by the variance of its inner trial values.
///
/// Each evaluation builds a fresh solver and runner for the target problem,
/// so evaluations share no state. Inner trials run sequentially.
///
/// A candidate with any failed inner trial scores `f64::INFINITY`, so it is
/// never preferred over a candidate whose trials all completed.
#[derive(Debug, Clone)]
pub struct VarianceObjective {
    target: Arc<Problem>,
    limits: Limits,
}

impl VarianceObjective {
    #[must_use]
    pub fn new(target: Arc<Problem>, limits: Limits) -> Self {
        Self { target, limits }
    }
}

impl Objective for VarianceObjective {
    fn evaluate(&self, x: &[f64]) -> Result<f64, DomainError> {
        match complete_batch(&self.target, &self.limits, x, None)? {
            Some(batch) => Ok(batch.require_statistics()?.variance),
            None => Ok(f64::INFINITY),
        }
    }
}

/// Accepts a candidate whose inner trials average at most the runtime limit.
///
/// The limit is checked after the inner run completes. A slow run is never
/// interrupted. A candidate with any failed inner trial is rejected.
#[derive(Debug, Clone)]
pub struct RuntimeConstraint {
    target: Arc<Problem>,
    limits: Limits,
    pool: Option<Arc<ThreadPool>>,
}

impl RuntimeConstraint {
    /// Creates the constraint, running inner trials on `pool` if given.
    #[must_use]
    pub fn new(target: Arc<Problem>, limits: Limits, pool: Option<Arc<ThreadPool>>) -> Self {
        Self {
            target,
            limits,
            pool,
        }
    }
}

impl Constraint for RuntimeConstraint {
    fn check(&self, x: &[f64]) -> Result<bool, DomainError> {
        let Some(batch) = complete_batch(&self.target, &self.limits, x, self.pool.as_deref())?
        else {
            return Ok(false);
        };
        let runtime = batch.require_statistics()?.average_runtime;

        let within = runtime <= self.limits.max_runtime();
        if !within {
            warn!(
                ?runtime,
                max_runtime = ?self.limits.max_runtime(),
                "candidate exceeds runtime limit"
            );
        }
        Ok(within)
    }
}

/// Runs the inner trials for the candidate at `x`.
///
/// Returns `None` if any inner trial failed, under either failure policy.
fn complete_batch(
    target: &Arc<Problem>,
    limits: &Limits,
    x: &[f64],
    pool: Option<&ThreadPool>,
) -> Result<Option<TrialBatch>, DomainError> {
    let hyper = Hyperparameters::from_position(x).ok_or("candidate is not a hyperparameter vector")?;
    let config = hyper.config(limits.inertia())?;

    let mut trials = trials::Config::new(limits.tries())?.with_policy(limits.policy());
    if let Some(seed) = limits.seed() {
        trials = trials.with_seed(candidate_seed(seed, x));
    }

    debug!(?hyper, "evaluating candidate");
    let runner = MultipleSolving::new(Pso::new(Arc::clone(target), config), trials);
    let batch = match runner.solve_batch(pool) {
        Ok(batch) if batch.failures().is_empty() => batch,
        Ok(batch) => {
            debug!(?hyper, failures = batch.failures().len(), "candidate has failed trials");
            return Ok(None);
        }
        Err(trials::Error::Trial { trial, source }) => {
            debug!(?hyper, trial, error = %source, "candidate has a failed trial");
            return Ok(None);
        }
        Err(error) => return Err(error.into()),
    };
    Ok(Some(batch))
}

/// Mixes the base seed with the candidate position.
fn candidate_seed(seed: u64, x: &[f64]) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    for value in x {
        value.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}
