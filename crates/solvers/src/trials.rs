//! Repeated independent solving with summary statistics.
//!
//! [`MultipleSolving`] runs a [`Solver`] a fixed number of times and
//! summarizes the outcome values. Stochastic solvers rarely return the same
//! answer twice, so the spread of many trials says more about a solver setup
//! than any single run.
//!
//! # Seeding
//!
//! Each trial receives its own seed, drawn from a `ChaCha8Rng` master stream.
//! With a fixed master seed ([`Config::with_seed`]) a batch is reproducible,
//! whether trials run sequentially or on a pool of any size.
//!
//! # Parallelism
//!
//! Passing a [`rayon::ThreadPool`] to [`MultipleSolving::run`] dispatches the
//! trials to that pool and blocks until every trial has returned. The pool is
//! owned by the caller; this module never creates one. Outcomes are always
//! ordered by trial index.
//!
//! # Failures
//!
//! A failed trial never affects its siblings. What happens to the batch is
//! set by [`FailurePolicy`].

mod batch;
mod config;
mod error;
mod statistics;


pub use batch::{Failure, Outcome, TrialBatch};
pub use config::{Config, ConfigError, FailurePolicy, SuccessCriterion};
pub use error::Error;
pub use statistics::Statistics;

use std::{fmt, time::Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::{ThreadPool, prelude::*};
use tracing::{debug, info, warn};

use crate::{Solution, Solver};

/// Runs a solver many times and keeps the latest batch of outcomes.
#[derive(Debug)]
pub struct MultipleSolving<S> {
    solver: S,
    config: Config,
    batch: Option<TrialBatch>,
}

impl<S: Solver> MultipleSolving<S> {
    /// Creates a runner for `solver`.
    #[must_use]
    pub fn new(solver: S, config: Config) -> Self {
        Self {
            solver,
            config,
            batch: None,
        }
    }

    /// Returns the wrapped solver.
    #[must_use]
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Returns the config.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs every trial, on `pool` if given, and replaces the previous batch.
    ///
    /// # Errors
    ///
    /// Under [`FailurePolicy::Abort`], returns [`Error::Trial`] for the
    /// failed trial with the lowest index. No batch is kept in that case.
    pub fn run(&mut self, pool: Option<&ThreadPool>) -> Result<&TrialBatch, Error> {
        self.batch = None;
        let batch = self.solve_batch(pool)?;
        Ok(self.batch.insert(batch))
    }

    /// Runs every trial, on `pool` if given, and returns the batch without
    /// keeping it.
    ///
    /// # Errors
    ///
    /// See [`MultipleSolving::run`].
    pub fn solve_batch(&self, pool: Option<&ThreadPool>) -> Result<TrialBatch, Error> {
        let tries = self.config.tries();
        let master = self.config.seed().unwrap_or_else(rand::random);
        let seeds = trial_seeds(master, tries);
        let abort = self.config.policy() == FailurePolicy::Abort;
        debug!(tries, master_seed = master, pooled = pool.is_some(), "starting trials");

        let solver = &self.solver;
        let results: Vec<Result<Outcome, Failure>> = match pool {
            Some(pool) => pool.install(|| {
                seeds
                    .par_iter()
                    .enumerate()
                    .map(|(trial, &seed)| run_trial(solver, trial, seed))
                    .collect()
            }),
            None => {
                let mut results = Vec::with_capacity(tries);
                for (trial, &seed) in seeds.iter().enumerate() {
                    let result = run_trial(solver, trial, seed);
                    let failed = result.is_err();
                    results.push(result);
                    if failed && abort {
                        break;
                    }
                }
                results
            }
        };

        let mut outcomes = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(Failure { trial, error }) if abort => {
                    return Err(Error::Trial {
                        trial,
                        source: error,
                    });
                }
                Err(failure) => {
                    warn!(trial = failure.trial, error = %failure.error, "trial failed");
                    failures.push(failure);
                }
            }
        }

        let statistics = Statistics::compute(&outcomes, tries, self.config.success());
        if let Some(stats) = &statistics {
            info!(
                tries,
                failures = failures.len(),
                mean = stats.mean,
                stdev = stats.stdev,
                average_runtime = ?stats.average_runtime,
                success_rate = ?stats.success_rate,
                "trials finished"
            );
        } else {
            warn!(tries, "every trial failed");
        }

        Ok(TrialBatch {
            tries,
            outcomes,
            failures,
            statistics,
        })
    }
}

impl<S> MultipleSolving<S> {
    /// Returns the latest batch, if [`MultipleSolving::run`] has succeeded.
    #[must_use]
    pub fn batch(&self) -> Option<&TrialBatch> {
        self.batch.as_ref()
    }

    /// Consumes the runner and returns the latest batch.
    #[must_use]
    pub fn into_batch(self) -> Option<TrialBatch> {
        self.batch
    }

    /// Returns the latest outcomes, or an empty slice before the first run.
    #[must_use]
    pub fn outcomes(&self) -> &[Outcome] {
        self.batch
            .as_ref()
            .map(TrialBatch::outcomes)
            .unwrap_or_default()
    }

    /// Returns the latest outcome values ordered by trial index.
    #[must_use]
    pub fn outcome_values(&self) -> Vec<f64> {
        self.batch
            .as_ref()
            .map_or_else(Vec::new, TrialBatch::outcome_values)
    }

    /// Returns the latest statistics, if any trial produced an outcome.
    #[must_use]
    pub fn statistics(&self) -> Option<&Statistics> {
        self.batch.as_ref().and_then(TrialBatch::statistics)
    }
}

impl<S> fmt::Display for MultipleSolving<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.batch {
            Some(batch) => fmt::Display::fmt(batch, f),
            None => write!(f, "not run ({} tries configured)", self.config.tries()),
        }
    }
}

/// Draws one seed per trial from the master stream.
fn trial_seeds(master: u64, tries: usize) -> Vec<u64> {
    let mut rng = ChaCha8Rng::seed_from_u64(master);
    (0..tries).map(|_| rng.random()).collect()
}

/// Runs a single timed trial.
fn run_trial<S: Solver>(solver: &S, trial: usize, seed: u64) -> Result<Outcome, Failure> {
    let start = Instant::now();
    let result = solver.solve_trial(seed);
    let runtime = start.elapsed();

    match result {
        Ok(Solution { value, position, .. }) => {
            debug!(trial, value, ?runtime, "trial finished");
            Ok(Outcome {
                trial,
                value,
                position,
                runtime,
            })
        }
        Err(error) => Err(Failure {
            trial,
            error: error.into(),
        }),
    }
}
