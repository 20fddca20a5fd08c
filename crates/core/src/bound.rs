use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A closed interval `[min, max]` bounding one dimension of the search space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bound {
    min: f64,
    max: f64,
}

/// Errors that can occur when constructing a [`Bound`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BoundError {
    #[error("bound limits must be finite, got [{min}, {max}]")]
    NotFinite { min: f64, max: f64 },

    #[error("bound minimum {min} exceeds maximum {max}")]
    Reversed { min: f64, max: f64 },
}

impl Bound {
    /// Creates a bound from its limits.
    ///
    /// A degenerate bound (`min == max`) is allowed and pins the dimension.
    ///
    /// # Errors
    ///
    /// Returns an error if either limit is non-finite or `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self, BoundError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(BoundError::NotFinite { min, max });
        }
        if min > max {
            return Err(BoundError::Reversed { min, max });
        }
        Ok(Self { min, max })
    }

    /// Returns the lower limit.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Returns the upper limit.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Returns `max - min`.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Returns true if `value` lies within the closed interval.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamps `value` into the interval.
    ///
    /// This is a hard clamp: values outside the interval land exactly on the
    /// nearest limit.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

impl TryFrom<(f64, f64)> for Bound {
    type Error = BoundError;

    fn try_from((min, max): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(min, max)
    }
}
