use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Outcome, SuccessCriterion};

/// Summary statistics over the outcome values of one batch.
///
/// Variance and standard deviation are population statistics (divided by
/// the number of outcomes, not one less).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Statistics {
    pub mean: f64,
    pub median: f64,
    pub stdev: f64,
    pub variance: f64,

    /// Mean wall-clock time of the successful trials.
    pub average_runtime: Duration,

    /// Fraction of all trials, failed ones included, whose value met the
    /// success criterion. `None` when no criterion was configured.
    pub success_rate: Option<f64>,
}

impl Statistics {
    /// Computes statistics over `outcomes` from a batch of `tries` trials.
    ///
    /// Returns `None` if there are no outcomes.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn compute(
        outcomes: &[Outcome],
        tries: usize,
        success: Option<&SuccessCriterion>,
    ) -> Option<Self> {
        if outcomes.is_empty() {
            return None;
        }

        let n = outcomes.len() as f64;
        let values: Vec<f64> = outcomes.iter().map(|outcome| outcome.value).collect();

        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let total_runtime: Duration = outcomes.iter().map(|outcome| outcome.runtime).sum();
        let average_runtime = u32::try_from(outcomes.len())
            .map_or_else(|_| total_runtime.div_f64(n), |count| total_runtime / count);

        let success_rate = success.map(|success| {
            let hits = values.iter().filter(|&&v| success.is_met(v)).count();
            hits as f64 / tries as f64
        });

        Some(Self {
            mean,
            median: median(values),
            stdev: variance.sqrt(),
            variance,
            average_runtime,
            success_rate,
        })
    }
}

/// Middle value, or the mean of the two middle values for an even count.
fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn outcome(trial: usize, value: f64, millis: u64) -> Outcome {
        Outcome {
            trial,
            value,
            position: vec![value],
            runtime: Duration::from_millis(millis),
        }
    }

    #[test]
    fn textbook_statistics() {
        let outcomes = [
            outcome(0, 2.0, 10),
            outcome(1, 4.0, 20),
            outcome(2, 4.0, 30),
            outcome(3, 4.0, 40),
            outcome(4, 5.0, 50),
            outcome(5, 5.0, 60),
            outcome(6, 7.0, 70),
            outcome(7, 9.0, 80),
        ];

        let stats = Statistics::compute(&outcomes, 8, None).unwrap();

        assert_relative_eq!(stats.mean, 5.0);
        assert_relative_eq!(stats.median, 4.5);
        assert_relative_eq!(stats.variance, 4.0);
        assert_relative_eq!(stats.stdev, 2.0);
        assert_eq!(stats.average_runtime, Duration::from_millis(45));
        assert_eq!(stats.success_rate, None);
    }

    #[test]
    fn odd_count_median_ignores_order() {
        let outcomes = [outcome(0, 3.0, 1), outcome(1, -1.0, 1), outcome(2, 8.0, 1)];

        let stats = Statistics::compute(&outcomes, 3, None).unwrap();

        assert_relative_eq!(stats.median, 3.0);
    }

    #[test]
    fn single_outcome_has_zero_spread() {
        let stats = Statistics::compute(&[outcome(0, 1.5, 5)], 1, None).unwrap();

        assert_relative_eq!(stats.mean, 1.5);
        assert_relative_eq!(stats.median, 1.5);
        assert_relative_eq!(stats.variance, 0.0);
        assert_relative_eq!(stats.stdev, 0.0);
    }

    #[test]
    fn success_rate_counts_failed_trials() {
        let success = SuccessCriterion::new(10.0, 0.5).unwrap();
        let outcomes = [outcome(0, 10.2, 1), outcome(1, 9.0, 1), outcome(3, 9.6, 1)];

        // Four trials were run; trial 2 failed.
        let stats = Statistics::compute(&outcomes, 4, Some(&success)).unwrap();

        assert_relative_eq!(stats.success_rate.unwrap(), 0.5);
    }

    #[test]
    fn no_outcomes_no_statistics() {
        assert!(Statistics::compute(&[], 3, None).is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn statistics_survive_json() {
        let stats = Statistics::compute(&[outcome(0, 1.5, 5)], 1, None).unwrap();

        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains(r#""success_rate":null"#));

        let back: Statistics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
