//! Ready-made problems for swarm solvers.
//!
//! - [`benchmarks`]: classic test functions with known optima
//! - [`planning`]: single- and multi-period production planning

pub mod benchmarks;
pub mod planning;
