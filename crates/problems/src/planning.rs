//! Production planning over one or more periods.
//!
//! A [`Plan`] decides how much of each product to make in each period. Each
//! [`Period`] has predicted prices, a [`ProfitModel`], and one
//! [`Consumption`] row per resource. Whatever a period leaves of a resource
//! carries over to the next period.
//!
//! Decision vectors are laid out chronologically: the quantities of the
//! first period come first, followed by those of the second, and so on.

use std::sync::Arc;

use swarm_core::{Goal, Problem, ProblemError, TryFn};
use thiserror::Error;

/// How a period turns quantities and prices into profit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfitModel {
    /// `Σ price · quantity`.
    #[default]
    Linear,

    /// `Σ 10 · price · log10(quantity)²`, defined for positive quantities.
    LogSquared,
}

impl ProfitModel {
    /// Computes the profit of `quantities` sold at `prices`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::ArgumentMismatch`] if the lengths differ, or
    /// [`PlanError::NonPositiveQuantity`] if the log model meets a quantity
    /// at or below zero.
    pub fn profit(self, quantities: &[f64], prices: &[f64]) -> Result<f64, PlanError> {
        if quantities.len() != prices.len() {
            return Err(PlanError::ArgumentMismatch {
                expected: prices.len(),
                actual: quantities.len(),
            });
        }

        let pairs = quantities.iter().zip(prices);
        match self {
            Self::Linear => Ok(pairs.map(|(q, p)| q * p).sum()),
            Self::LogSquared => pairs
                .map(|(&quantity, p)| {
                    if quantity > 0.0 {
                        Ok(10.0 * p * quantity.log10().powi(2))
                    } else {
                        Err(PlanError::NonPositiveQuantity { quantity })
                    }
                })
                .sum(),
        }
    }
}

/// The stock of one resource and how much each product unit uses of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Consumption {
    pub stock: f64,
    pub usage: Vec<f64>,
}

impl Consumption {
    /// Returns what is left of `available` after producing `quantities`.
    fn leftover(&self, quantities: &[f64], available: f64) -> f64 {
        let used: f64 = self.usage.iter().zip(quantities).map(|(u, q)| u * q).sum();
        available - used
    }
}

/// One production period.
#[derive(Debug, Clone, PartialEq)]
pub struct Period {
    prices: Vec<f64>,
    model: ProfitModel,
    resources: Vec<Consumption>,
}

impl Period {
    /// Creates a period selling one product per price.
    #[must_use]
    pub fn new(prices: Vec<f64>, model: ProfitModel) -> Self {
        Self {
            prices,
            model,
            resources: Vec::new(),
        }
    }

    /// Adds a resource with `stock` units, of which each unit of product `i`
    /// uses `usage[i]`.
    #[must_use]
    pub fn with_resource(mut self, stock: f64, usage: Vec<f64>) -> Self {
        self.resources.push(Consumption { stock, usage });
        self
    }

    /// Returns the number of products.
    #[must_use]
    pub fn products(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    #[must_use]
    pub fn resources(&self) -> &[Consumption] {
        &self.resources
    }

    /// Computes this period's profit.
    ///
    /// # Errors
    ///
    /// See [`ProfitModel::profit`].
    pub fn profit(&self, quantities: &[f64]) -> Result<f64, PlanError> {
        self.model.profit(quantities, &self.prices)
    }
}

/// Errors from building or evaluating a plan.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlanError {
    #[error("a plan needs at least one period")]
    NoPeriods,

    #[error("period {period} tracks {actual} resources, expected {expected}")]
    ResourceMismatch {
        period: usize,
        expected: usize,
        actual: usize,
    },

    #[error("resource {resource} of period {period} has {actual} usage rates for {expected} products")]
    UsageMismatch {
        period: usize,
        resource: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{actual} quantities given for {expected} products")]
    ArgumentMismatch { expected: usize, actual: usize },

    #[error("log profit is undefined for quantity {quantity}")]
    NonPositiveQuantity { quantity: f64 },
}

/// An ordered sequence of production periods.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    periods: Vec<Period>,
}

impl Plan {
    /// Creates a plan from periods in chronological order.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no periods, if periods track different
    /// numbers of resources, or if a usage row's length differs from its
    /// period's product count.
    pub fn new(periods: Vec<Period>) -> Result<Self, PlanError> {
        let first = periods.first().ok_or(PlanError::NoPeriods)?;
        let expected = first.resources.len();

        for (index, period) in periods.iter().enumerate() {
            if period.resources.len() != expected {
                return Err(PlanError::ResourceMismatch {
                    period: index,
                    expected,
                    actual: period.resources.len(),
                });
            }
            for (resource, consumption) in period.resources.iter().enumerate() {
                if consumption.usage.len() != period.products() {
                    return Err(PlanError::UsageMismatch {
                        period: index,
                        resource,
                        expected: period.products(),
                        actual: consumption.usage.len(),
                    });
                }
            }
        }

        Ok(Self { periods })
    }

    #[must_use]
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Returns the total number of decision variables.
    #[must_use]
    pub fn products(&self) -> usize {
        self.periods.iter().map(Period::products).sum()
    }

    /// Computes the total profit over every period.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::ArgumentMismatch`] if `x` has the wrong length, or
    /// a profit model error.
    pub fn profit(&self, x: &[f64]) -> Result<f64, PlanError> {
        self.split(x)?
            .map(|(period, quantities)| period.profit(quantities))
            .sum()
    }

    /// Returns true if every period has enough of every resource.
    ///
    /// Periods are checked in order, each receiving the previous period's
    /// leftovers. The check stops at the first period that runs short.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::ArgumentMismatch`] if `x` has the wrong length.
    pub fn is_feasible(&self, x: &[f64]) -> Result<bool, PlanError> {
        let resources = self.periods.first().map_or(0, |period| period.resources.len());
        let mut carried = vec![0.0; resources];

        for (period, quantities) in self.split(x)? {
            for (consumption, carry) in period.resources.iter().zip(&mut carried) {
                let leftover = consumption.leftover(quantities, consumption.stock + *carry);
                if leftover < 0.0 {
                    return Ok(false);
                }
                *carry = leftover;
            }
        }
        Ok(true)
    }

    /// Builds a problem maximizing profit subject to resource availability.
    ///
    /// # Errors
    ///
    /// Returns an error if `bounds` does not give one valid bound per
    /// product.
    pub fn problem<B>(self, bounds: B) -> Result<Problem, ProblemError>
    where
        B: IntoIterator<Item = (f64, f64)>,
    {
        let dimensions = self.products();
        let plan = Arc::new(self);
        let profit = Arc::clone(&plan);

        let problem = Problem::new(
            TryFn(move |x: &[f64]| profit.profit(x)),
            bounds,
            dimensions,
            Goal::Maximize,
        )?
        .with_constraint(TryFn(move |x: &[f64]| plan.is_feasible(x)));
        Ok(problem)
    }

    /// Pairs each period with its slice of `x`.
    fn split<'a>(
        &'a self,
        x: &'a [f64],
    ) -> Result<impl Iterator<Item = (&'a Period, &'a [f64])>, PlanError> {
        let expected = self.products();
        if x.len() != expected {
            return Err(PlanError::ArgumentMismatch {
                expected,
                actual: x.len(),
            });
        }

        let mut rest = x;
        Ok(self.periods.iter().map(move |period| {
            let (quantities, tail) = rest.split_at(period.products());
            rest = tail;
            (period, quantities)
        }))
    }
}

/// The single-period gas and chloride plan: maximize `40·x0 + 50·x1` with
/// 50 units of nitrogen, 180 of hydrogen, and 40 of chlorine.
///
/// The optimum is `x = (20, 30)` with a profit of 2300.
#[must_use]
pub fn linear() -> Plan {
    Plan {
        periods: vec![gas_and_chloride(ProfitModel::Linear)],
    }
}

/// `years` consecutive copies of the gas and chloride period under `model`.
///
/// # Errors
///
/// Returns [`PlanError::NoPeriods`] if `years` is zero.
pub fn repeated(years: usize, model: ProfitModel) -> Result<Plan, PlanError> {
    Plan::new((0..years).map(|_| gas_and_chloride(model)).collect())
}

fn gas_and_chloride(model: ProfitModel) -> Period {
    Period::new(vec![40.0, 50.0], model)
        .with_resource(50.0, vec![1.0, 1.0])
        .with_resource(180.0, vec![3.0, 4.0])
        .with_resource(40.0, vec![0.0, 1.0])
}
