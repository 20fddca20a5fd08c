//! Solvers for constrained swarm optimization problems.
//!
//! - [`pso`]: a particle swarm optimizer for one [`Problem`](swarm_core::Problem)
//! - [`trials`]: repeats any [`Solver`] many times, optionally on a worker
//!   pool, and summarizes the outcomes
//! - [`tuning`]: searches for particle swarm hyperparameters that make a
//!   target problem's repeated solves most consistent

pub mod pso;
pub mod trials;
pub mod tuning;

mod solution;
mod solver;

pub use solution::Solution;
pub use solver::Solver;
