#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::pso;

/// Particle swarm hyperparameters decoded from a point in the search space.
///
/// The search space has four dimensions: particle count, iteration count,
/// cognitive coefficient, and social coefficient. Counts are rounded to the
/// nearest integer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hyperparameters {
    pub particles: usize,
    pub iterations: usize,
    pub cognitive: f64,
    pub social: f64,
}

impl Hyperparameters {
    /// Number of search dimensions.
    pub const DIMENSIONS: usize = 4;

    /// Decodes a search position, or returns `None` if it is not four values.
    ///
    /// Negative counts decode to zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_position(x: &[f64]) -> Option<Self> {
        let &[particles, iterations, cognitive, social] = x else {
            return None;
        };
        Some(Self {
            particles: particles.round().max(0.0) as usize,
            iterations: iterations.round().max(0.0) as usize,
            cognitive,
            social,
        })
    }

    /// Builds a solver config from these hyperparameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the particle count is zero or a coefficient is
    /// invalid.
    pub fn config(&self, inertia: f64) -> Result<pso::Config, pso::ConfigError> {
        pso::Config::new(self.particles, self.iterations, self.cognitive, self.social)?
            .with_inertia(inertia)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn rounds_counts_to_nearest() {
        let hyper = Hyperparameters::from_position(&[12.4, 19.6, 1.5, 2.5]).unwrap();

        assert_eq!(hyper.particles, 12);
        assert_eq!(hyper.iterations, 20);
        assert_relative_eq!(hyper.cognitive, 1.5);
        assert_relative_eq!(hyper.social, 2.5);
    }

    #[test]
    fn wrong_length_does_not_decode() {
        assert!(Hyperparameters::from_position(&[1.0, 2.0, 3.0]).is_none());
        assert!(Hyperparameters::from_position(&[1.0, 2.0, 3.0, 4.0, 5.0]).is_none());
    }

    #[test]
    fn config_uses_decoded_values() {
        let hyper = Hyperparameters::from_position(&[7.0, 0.2, 0.5, 1.0]).unwrap();
        let config = hyper.config(0.9).unwrap();

        assert_eq!(config.particles(), 7);
        assert_eq!(config.iterations(), 0);
        assert_relative_eq!(config.inertia(), 0.9);
    }

    #[test]
    fn empty_swarm_is_rejected() {
        let hyper = Hyperparameters::from_position(&[0.4, 5.0, 1.0, 1.0]).unwrap();

        assert_eq!(hyper.config(1.0), Err(pso::ConfigError::NoParticles));
    }
}
