use std::{fmt, time::Duration};

use swarm_core::DomainError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Error, Statistics};

/// The result of one successful trial.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Outcome {
    /// Zero-based trial index within the batch.
    pub trial: usize,

    /// Objective value reported by the solver.
    pub value: f64,

    /// Position reported by the solver.
    pub position: Vec<f64>,

    /// Wall-clock time the trial took.
    pub runtime: Duration,
}

/// A trial that failed under [`FailurePolicy::CountAsFailure`](super::FailurePolicy::CountAsFailure).
#[derive(Debug)]
pub struct Failure {
    pub trial: usize,
    pub error: DomainError,
}

/// The outcomes of one run of repeated solving.
#[derive(Debug)]
pub struct TrialBatch {
    pub(super) tries: usize,
    pub(super) outcomes: Vec<Outcome>,
    pub(super) failures: Vec<Failure>,
    pub(super) statistics: Option<Statistics>,
}

impl TrialBatch {
    /// Returns the number of trials that were run.
    #[must_use]
    pub fn tries(&self) -> usize {
        self.tries
    }

    /// Returns the successful outcomes ordered by trial index.
    #[must_use]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Returns the outcome values ordered by trial index.
    #[must_use]
    pub fn outcome_values(&self) -> Vec<f64> {
        self.outcomes.iter().map(|outcome| outcome.value).collect()
    }

    /// Returns the failed trials ordered by trial index.
    #[must_use]
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Returns the statistics, or `None` if every trial failed.
    #[must_use]
    pub fn statistics(&self) -> Option<&Statistics> {
        self.statistics.as_ref()
    }

    /// Returns the statistics.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOutcomes`] if every trial failed.
    pub fn require_statistics(&self) -> Result<&Statistics, Error> {
        self.statistics.as_ref().ok_or(Error::NoOutcomes)
    }

    /// Returns the outcome with the greatest value, first trial on ties.
    #[must_use]
    pub fn max_outcome(&self) -> Option<&Outcome> {
        self.outcomes
            .iter()
            .reduce(|best, outcome| if outcome.value > best.value { outcome } else { best })
    }

    /// Returns the outcome with the least value, first trial on ties.
    #[must_use]
    pub fn min_outcome(&self) -> Option<&Outcome> {
        self.outcomes
            .iter()
            .reduce(|best, outcome| if outcome.value < best.value { outcome } else { best })
    }
}

impl fmt::Display for TrialBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} tries, {} outcomes, {} failures",
            self.tries,
            self.outcomes.len(),
            self.failures.len()
        )?;

        let Some(stats) = &self.statistics else {
            return write!(f, "no statistics");
        };

        writeln!(f, "mean:            {}", stats.mean)?;
        writeln!(f, "median:          {}", stats.median)?;
        writeln!(f, "stdev:           {}", stats.stdev)?;
        writeln!(f, "variance:        {}", stats.variance)?;
        write!(f, "average runtime: {:?}", stats.average_runtime)?;
        if let Some(rate) = stats.success_rate {
            write!(f, "\nsuccess rate:    {:.1}%", rate * 100.0)?;
        }
        Ok(())
    }
}
