#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Defines the optimization direction.
///
/// Solvers never compare raw objective values. They compare *scores*, where a
/// greater score is always better: [`Goal::score`] negates the objective when
/// minimizing, and [`Goal::value`] maps a score back to the caller's direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Goal {
    /// Search for the greatest objective value.
    #[default]
    Maximize,

    /// Search for the smallest objective value.
    Minimize,
}

impl Goal {
    /// Transforms an objective value into a score (greater is better).
    ///
    /// - [`Goal::Maximize`]: returns the value unchanged
    /// - [`Goal::Minimize`]: negates the value
    #[inline]
    #[must_use]
    pub fn score(self, value: f64) -> f64 {
        match self {
            Self::Maximize => value,
            Self::Minimize => -value,
        }
    }

    /// Transforms a score back into an objective value.
    ///
    /// This is the inverse of [`Goal::score`].
    #[inline]
    #[must_use]
    pub fn value(self, score: f64) -> f64 {
        // Negation is its own inverse.
        self.score(score)
    }

    /// Returns true when searching for the greatest value.
    #[must_use]
    pub fn is_maximize(self) -> bool {
        matches!(self, Self::Maximize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn minimize_negates_score() {
        assert_relative_eq!(Goal::Minimize.score(2.5), -2.5);
        assert_relative_eq!(Goal::Maximize.score(2.5), 2.5);
    }

    #[test]
    fn value_inverts_score() {
        for goal in [Goal::Maximize, Goal::Minimize] {
            assert_relative_eq!(goal.value(goal.score(-7.25)), -7.25);
        }
    }

    #[test]
    fn better_value_has_greater_score() {
        // Smaller is better when minimizing.
        assert!(Goal::Minimize.score(1.0) > Goal::Minimize.score(3.0));
        assert!(Goal::Maximize.score(3.0) > Goal::Maximize.score(1.0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn goal_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Goal::Minimize).unwrap(), r#""minimize""#);
        let goal: Goal = serde_json::from_str(r#""maximize""#).unwrap();
        assert_eq!(goal, Goal::Maximize);
    }
}
