//! Self-tuning of particle swarm hyperparameters.
//!
//! [`Tuner`] searches for the particle count, iteration count, and learning
//! factors that make repeated solves of a *target* problem most consistent.
//! It does so with a particle swarm of its own:
//!
//! - each outer position decodes to [`Hyperparameters`]
//! - [`VarianceObjective`] runs a fresh inner batch of target solves with
//!   those hyperparameters and returns the variance of the outcome values
//!   (to be minimized)
//! - [`RuntimeConstraint`] runs another inner batch and accepts the candidate
//!   only if its trials averaged no more than [`Limits::max_runtime`]
//!
//! Both inner batches of a candidate draw from the same seed, so they fail
//! or succeed together. A candidate with any failed inner trial is
//! infeasible, and is never scored.
//!
//! The outer swarm is itself repeated through [`MultipleSolving`], so the
//! result is a [`TrialBatch`] whose outcome positions decode with
//! [`Hyperparameters::from_position`] and whose values are variances.
//!
//! # Threads
//!
//! Inner runs use a pool of [`Limits::inner_threads`] workers and outer
//! trials a pool of [`Settings::outer_threads`] workers, so up to their
//! product may be busy at once. [`Tuner::run`] rejects settings whose product
//! exceeds [`Limits::max_total_threads`] before building any pool.
//!
//! # Runtime limit
//!
//! The runtime limit is a post-hoc check. An inner run always completes, and
//! only then is its average runtime compared to the limit.

mod candidate;
mod config;
mod error;
mod hyperparameters;

#[cfg(test)]
mod tests;

pub use candidate::{RuntimeConstraint, VarianceObjective};
pub use config::{ConfigError, Limits, Settings};
pub use error::Error;
pub use hyperparameters::Hyperparameters;

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};
use swarm_core::{Goal, Problem};
use tracing::info;

use crate::{
    pso::Pso,
    trials::{MultipleSolving, TrialBatch},
};

/// Searches particle swarm hyperparameters for a target problem.
#[derive(Debug, Clone)]
pub struct Tuner {
    target: Arc<Problem>,
    limits: Limits,
}

impl Tuner {
    #[must_use]
    pub fn new(target: Arc<Problem>, limits: Limits) -> Self {
        Self { target, limits }
    }

    /// Returns the target problem.
    #[must_use]
    pub fn target(&self) -> &Problem {
        &self.target
    }

    #[must_use]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Builds the hyperparameter search problem.
    ///
    /// Particle counts are searched in `[1, max_particles]`, iteration counts
    /// in `[0, max_iterations]`, and both learning factors in
    /// `[0, max_learning_factor]`.
    ///
    /// Inner runs are seeded from [`Limits::seed`], or from one fresh seed
    /// shared by the objective and the constraint when it is unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the search bounds are invalid.
    #[allow(clippy::cast_precision_loss)]
    pub fn search_problem(&self, pool: Option<Arc<ThreadPool>>) -> Result<Problem, Error> {
        let limits = self.limits.with_seed(self.limits.seed().unwrap_or_else(rand::random));
        let learning = (0.0, limits.max_learning_factor());
        let bounds = [
            (1.0, limits.max_particles() as f64),
            (0.0, limits.max_iterations() as f64),
            learning,
            learning,
        ];

        let objective = VarianceObjective::new(Arc::clone(&self.target), limits);
        let constraint = RuntimeConstraint::new(Arc::clone(&self.target), limits, pool);

        let problem = Problem::new(objective, bounds, Hyperparameters::DIMENSIONS, Goal::Minimize)?
            .with_constraint(constraint);
        Ok(problem)
    }

    /// Runs the outer search.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread budget is exceeded, a pool cannot be
    /// built, or an outer trial fails under [`FailurePolicy::Abort`](crate::trials::FailurePolicy::Abort).
    pub fn run(&self, settings: &Settings) -> Result<TrialBatch, Error> {
        let limits = &self.limits;
        limits.check_budget(settings.outer_threads())?;

        info!(
            inner_tries = limits.tries(),
            outer_tries = settings.trials().tries(),
            inner_threads = limits.inner_threads(),
            outer_threads = settings.outer_threads(),
            max_runtime = ?limits.max_runtime(),
            "starting hyperparameter search"
        );

        let inner_pool = build_pool(limits.inner_threads())?.map(Arc::new);
        let outer_pool = build_pool(settings.outer_threads())?;

        let problem = self.search_problem(inner_pool)?;
        let solver = Pso::new(Arc::new(problem), *settings.swarm());
        let runner = MultipleSolving::new(solver, *settings.trials());

        let batch = runner.solve_batch(outer_pool.as_ref())?;
        if let Some(best) = batch.min_outcome()
            && let Some(hyper) = Hyperparameters::from_position(&best.position)
        {
            info!(?hyper, variance = best.value, "hyperparameter search finished");
        }
        Ok(batch)
    }
}

/// Builds a pool of `threads` workers, or none for sequential execution.
fn build_pool(threads: usize) -> Result<Option<ThreadPool>, Error> {
    if threads <= 1 {
        return Ok(None);
    }
    let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
    Ok(Some(pool))
}
