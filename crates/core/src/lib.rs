//! Core traits and types for constrained swarm optimization.
//!
//! This crate defines the shared abstractions that solvers and problem
//! definitions build on:
//!
//! - [`Problem`]: an objective, per-dimension [`Bound`]s, a [`Goal`], and an
//!   ordered list of constraint predicates
//! - [`Objective`] and [`Constraint`]: capability traits for the user
//!   functions a problem evaluates, implemented by closures and [`TryFn`]
//! - [`Observer`]: receives solver events
//!
//! Solvers compare normalized *scores* (greater is better) obtained from
//! [`Problem::evaluate`], so the optimization direction is handled in one
//! place.

mod bound;
mod error;
mod goal;
mod objective;
mod observer;
mod problem;

pub use bound::{Bound, BoundError};
pub use error::{EvalError, ProblemError};
pub use goal::Goal;
pub use objective::{Constraint, DomainError, Objective, TryFn};
pub use observer::Observer;
pub use problem::Problem;
