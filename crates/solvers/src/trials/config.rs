use thiserror::Error;

#[cfg(feature = "serde")]
use serde::Serialize;

/// What to do when one trial fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum FailurePolicy {
    /// Abort the batch with the error of the earliest failed trial.
    Abort,

    /// Record the failure and keep the remaining trials.
    ///
    /// Failed trials have no outcome. They are excluded from every statistic
    /// except the success rate, where they count as unsuccessful.
    #[default]
    CountAsFailure,
}

/// A known optimum and how close an outcome must get to count as a success.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SuccessCriterion {
    target: f64,
    tolerance: f64,
}

impl SuccessCriterion {
    /// Creates a criterion accepting values within `tolerance` of `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if `target` is not finite or `tolerance` is negative
    /// or not finite.
    pub fn new(target: f64, tolerance: f64) -> Result<Self, ConfigError> {
        if !target.is_finite() {
            return Err(ConfigError::Target);
        }
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConfigError::Tolerance);
        }
        Ok(Self { target, tolerance })
    }

    /// Returns the known optimal value.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Returns the accepted absolute distance from the target.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns true if `value` lies within the tolerance of the target.
    #[must_use]
    pub fn is_met(&self, value: f64) -> bool {
        (value - self.target).abs() <= self.tolerance
    }
}

/// Configuration for repeated solving.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Config {
    tries: usize,
    seed: Option<u64>,
    policy: FailurePolicy,
    success: Option<SuccessCriterion>,
}

/// Errors that can occur when validating a repeated solving config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least one trial is required")]
    NoTries,

    #[error("success target must be finite")]
    Target,

    #[error("success tolerance must be finite and non-negative")]
    Tolerance,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tries: 10,
            seed: None,
            policy: FailurePolicy::default(),
            success: None,
        }
    }
}

impl Config {
    /// Creates a config running `tries` independent trials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoTries`] if `tries` is zero.
    pub fn new(tries: usize) -> Result<Self, ConfigError> {
        if tries == 0 {
            return Err(ConfigError::NoTries);
        }
        Ok(Self {
            tries,
            ..Self::default()
        })
    }

    /// Fixes the master seed so the batch is reproducible.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Sets the failure policy.
    #[must_use]
    pub fn with_policy(self, policy: FailurePolicy) -> Self {
        Self { policy, ..self }
    }

    /// Sets the criterion used to compute the success rate.
    #[must_use]
    pub fn with_success(self, success: SuccessCriterion) -> Self {
        Self {
            success: Some(success),
            ..self
        }
    }

    /// Returns the number of trials per run.
    #[must_use]
    pub fn tries(&self) -> usize {
        self.tries
    }

    /// Returns the master seed, if fixed.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the failure policy.
    #[must_use]
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Returns the success criterion, if any.
    #[must_use]
    pub fn success(&self) -> Option<&SuccessCriterion> {
        self.success.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::new(20).unwrap();

        assert_eq!(config.tries(), 20);
        assert_eq!(config.seed(), None);
        assert_eq!(config.policy(), FailurePolicy::CountAsFailure);
        assert!(config.success().is_none());
    }

    #[test]
    fn rejects_zero_tries() {
        assert_eq!(Config::new(0), Err(ConfigError::NoTries));
    }

    #[test]
    fn success_criterion_is_inclusive() {
        let success = SuccessCriterion::new(2300.0, 1.0).unwrap();

        assert!(success.is_met(2299.0));
        assert!(success.is_met(2300.5));
        assert!(!success.is_met(2298.9));
    }

    #[test]
    fn rejects_invalid_success_criterion() {
        assert_eq!(
            SuccessCriterion::new(f64::NAN, 1.0),
            Err(ConfigError::Target)
        );
        assert_eq!(
            SuccessCriterion::new(1.0, -0.1),
            Err(ConfigError::Tolerance)
        );
    }
}
