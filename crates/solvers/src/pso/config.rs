use thiserror::Error;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Configuration for the particle swarm solver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Config {
    particles: usize,
    iterations: usize,
    cognitive: f64,
    social: f64,
    inertia: f64,
    verbose: bool,
}

/// Errors that can occur when validating a particle swarm solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("a swarm needs at least one particle")]
    NoParticles,

    #[error("cognitive coefficient must be finite and non-negative")]
    Cognitive,

    #[error("social coefficient must be finite and non-negative")]
    Social,

    #[error("inertia weight must be finite and non-negative")]
    Inertia,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            particles: 30,
            iterations: 100,
            cognitive: 2.0,
            social: 2.0,
            inertia: 1.0,
            verbose: false,
        }
    }
}

impl Config {
    /// Creates a new config with validated coefficients.
    ///
    /// `cognitive` (c1) weights the pull toward each particle's personal best
    /// and `social` (c2) the pull toward the swarm's global best. The inertia
    /// weight defaults to `1.0`, which keeps the full previous velocity.
    ///
    /// # Errors
    ///
    /// Returns an error if `particles` is zero or a coefficient is negative
    /// or non-finite.
    pub fn new(
        particles: usize,
        iterations: usize,
        cognitive: f64,
        social: f64,
    ) -> Result<Self, ConfigError> {
        if particles == 0 {
            return Err(ConfigError::NoParticles);
        }
        if !is_valid_coefficient(cognitive) {
            return Err(ConfigError::Cognitive);
        }
        if !is_valid_coefficient(social) {
            return Err(ConfigError::Social);
        }

        Ok(Self {
            particles,
            iterations,
            cognitive,
            social,
            ..Self::default()
        })
    }

    /// Sets the inertia weight applied to the previous velocity.
    ///
    /// # Errors
    ///
    /// Returns an error if `inertia` is negative or non-finite.
    pub fn with_inertia(self, inertia: f64) -> Result<Self, ConfigError> {
        if !is_valid_coefficient(inertia) {
            return Err(ConfigError::Inertia);
        }
        Ok(Self { inertia, ..self })
    }

    /// Enables per-iteration progress logging at `info` level.
    #[must_use]
    pub fn with_verbose(self, verbose: bool) -> Self {
        Self { verbose, ..self }
    }

    /// Returns the number of particles in the swarm.
    #[must_use]
    pub fn particles(&self) -> usize {
        self.particles
    }

    /// Returns the number of update iterations.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the cognitive coefficient (c1).
    #[must_use]
    pub fn cognitive(&self) -> f64 {
        self.cognitive
    }

    /// Returns the social coefficient (c2).
    #[must_use]
    pub fn social(&self) -> f64 {
        self.social
    }

    /// Returns the inertia weight.
    #[must_use]
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Returns true if per-iteration progress is logged at `info` level.
    #[must_use]
    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

fn is_valid_coefficient(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn new_keeps_default_inertia() {
        let config = Config::new(45, 20, 2.99, 1.81).unwrap();

        assert_eq!(config.particles(), 45);
        assert_eq!(config.iterations(), 20);
        assert_relative_eq!(config.cognitive(), 2.99);
        assert_relative_eq!(config.social(), 1.81);
        assert_relative_eq!(config.inertia(), 1.0);
        assert!(!config.verbose());
    }

    #[test]
    fn rejects_empty_swarm() {
        assert_eq!(Config::new(0, 10, 2.0, 2.0), Err(ConfigError::NoParticles));
    }

    #[test]
    fn rejects_invalid_coefficients() {
        assert_eq!(Config::new(10, 10, -1.0, 2.0), Err(ConfigError::Cognitive));
        assert_eq!(Config::new(10, 10, 2.0, f64::NAN), Err(ConfigError::Social));
        assert_eq!(
            Config::default().with_inertia(f64::INFINITY),
            Err(ConfigError::Inertia)
        );
    }

    #[test]
    fn zero_iterations_is_allowed() {
        assert!(Config::new(10, 0, 2.0, 2.0).is_ok());
    }
}
