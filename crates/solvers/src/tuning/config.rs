use std::{num::NonZeroUsize, thread, time::Duration};

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    pso,
    trials::{self, FailurePolicy},
};

/// Bounds on the hyperparameter search and on each candidate's inner run.
///
/// Every candidate is judged by `tries` inner trials of the target problem.
/// The candidate is feasible only if every one of those trials completes and
/// they average no more than `max_runtime` each.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Limits {
    tries: usize,
    max_runtime: Duration,
    max_particles: usize,
    max_iterations: usize,
    max_learning_factor: f64,
    inertia: f64,
    inner_threads: usize,
    max_total_threads: usize,
    seed: Option<u64>,
    policy: FailurePolicy,
}

/// Errors that can occur when validating tuning limits or settings.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least one inner trial is required")]
    NoTries,

    #[error("the particle limit must be at least one")]
    NoParticles,

    #[error("maximum learning factor must be finite and non-negative")]
    LearningFactor,

    #[error("inertia weight must be finite and non-negative")]
    Inertia,

    #[error("thread counts must be at least one")]
    NoThreads,

    #[error("{outer} outer × {inner} inner threads exceeds the budget of {max}")]
    ThreadBudget {
        outer: usize,
        inner: usize,
        max: usize,
    },
}

impl Limits {
    /// Creates limits for the hyperparameter search.
    ///
    /// Inner runs are sequential, use the default inertia weight, and may
    /// use every available core in total until changed.
    ///
    /// # Errors
    ///
    /// Returns an error if `tries` or `max_particles` is zero, or if
    /// `max_learning_factor` is negative or not finite.
    pub fn new(
        tries: usize,
        max_runtime: Duration,
        max_particles: usize,
        max_iterations: usize,
        max_learning_factor: f64,
    ) -> Result<Self, ConfigError> {
        if tries == 0 {
            return Err(ConfigError::NoTries);
        }
        if max_particles == 0 {
            return Err(ConfigError::NoParticles);
        }
        if !max_learning_factor.is_finite() || max_learning_factor < 0.0 {
            return Err(ConfigError::LearningFactor);
        }

        Ok(Self {
            tries,
            max_runtime,
            max_particles,
            max_iterations,
            max_learning_factor,
            inertia: pso::Config::default().inertia(),
            inner_threads: 1,
            max_total_threads: thread::available_parallelism().map_or(1, NonZeroUsize::get),
            seed: None,
            policy: FailurePolicy::default(),
        })
    }

    /// Sets the inner worker pool size and the total thread budget.
    ///
    /// An inner pool size of one runs inner trials sequentially.
    ///
    /// # Errors
    ///
    /// Returns an error if either count is zero or `inner` alone exceeds
    /// `max_total`.
    pub fn with_threads(self, inner: usize, max_total: usize) -> Result<Self, ConfigError> {
        if inner == 0 || max_total == 0 {
            return Err(ConfigError::NoThreads);
        }
        if inner > max_total {
            return Err(ConfigError::ThreadBudget {
                outer: 1,
                inner,
                max: max_total,
            });
        }
        Ok(Self {
            inner_threads: inner,
            max_total_threads: max_total,
            ..self
        })
    }

    /// Sets the inertia weight of every inner swarm.
    ///
    /// # Errors
    ///
    /// Returns an error if `inertia` is negative or not finite.
    pub fn with_inertia(self, inertia: f64) -> Result<Self, ConfigError> {
        if !inertia.is_finite() || inertia < 0.0 {
            return Err(ConfigError::Inertia);
        }
        Ok(Self { inertia, ..self })
    }

    /// Seeds inner runs from `seed` and the candidate position, so the same
    /// candidate always sees the same inner trials.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Sets the failure policy of the inner runs.
    #[must_use]
    pub fn with_policy(self, policy: FailurePolicy) -> Self {
        Self { policy, ..self }
    }

    /// Returns the number of inner trials per candidate.
    #[must_use]
    pub fn tries(&self) -> usize {
        self.tries
    }

    /// Returns the largest accepted average inner trial runtime.
    #[must_use]
    pub fn max_runtime(&self) -> Duration {
        self.max_runtime
    }

    #[must_use]
    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    #[must_use]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Returns the upper bound shared by both learning factors.
    #[must_use]
    pub fn max_learning_factor(&self) -> f64 {
        self.max_learning_factor
    }

    #[must_use]
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Returns the inner worker pool size.
    #[must_use]
    pub fn inner_threads(&self) -> usize {
        self.inner_threads
    }

    /// Returns the total thread budget across both nesting levels.
    #[must_use]
    pub fn max_total_threads(&self) -> usize {
        self.max_total_threads
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[must_use]
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Checks that `outer` outer workers fit the thread budget.
    pub(super) fn check_budget(&self, outer: usize) -> Result<(), ConfigError> {
        if outer == 0 {
            return Err(ConfigError::NoThreads);
        }
        match outer.checked_mul(self.inner_threads) {
            Some(total) if total <= self.max_total_threads => Ok(()),
            _ => Err(ConfigError::ThreadBudget {
                outer,
                inner: self.inner_threads,
                max: self.max_total_threads,
            }),
        }
    }
}

/// Settings for the outer swarm that searches the hyperparameter space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Settings {
    swarm: pso::Config,
    trials: trials::Config,
    outer_threads: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            swarm: pso::Config::default(),
            trials: trials::Config::default(),
            outer_threads: 1,
        }
    }
}

impl Settings {
    /// Creates settings for the outer swarm and its repeated trials.
    ///
    /// Outer trials run sequentially until [`Settings::with_outer_threads`]
    /// is called.
    #[must_use]
    pub fn new(swarm: pso::Config, trials: trials::Config) -> Self {
        Self {
            swarm,
            trials,
            outer_threads: 1,
        }
    }

    /// Sets the outer worker pool size.
    ///
    /// The product with the inner pool size is checked against the thread
    /// budget when the search runs.
    ///
    /// # Errors
    ///
    /// Returns an error if `threads` is zero.
    pub fn with_outer_threads(self, threads: usize) -> Result<Self, ConfigError> {
        if threads == 0 {
            return Err(ConfigError::NoThreads);
        }
        Ok(Self {
            outer_threads: threads,
            ..self
        })
    }

    /// Returns the outer swarm config.
    #[must_use]
    pub fn swarm(&self) -> &pso::Config {
        &self.swarm
    }

    /// Returns the outer trials config.
    #[must_use]
    pub fn trials(&self) -> &trials::Config {
        &self.trials
    }

    /// Returns the outer worker pool size.
    #[must_use]
    pub fn outer_threads(&self) -> usize {
        self.outer_threads
    }
}
