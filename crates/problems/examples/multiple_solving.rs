//! Repeatedly maximize `x⁴ + x³ − 3x² + 1` on `[-3, 3]` under two
//! polynomial constraints.
//!
//! The feasible region is small, so a ten-particle swarm occasionally never
//! finds it. Those trials are recorded as failures instead of aborting the
//! batch.
//!
//! ```text
//! cargo run -p swarm-problems --example multiple_solving
//! ```

use std::error::Error;

use swarm_problems::benchmarks;
use swarm_solvers::{
    pso::{self, Pso},
    trials::{self, FailurePolicy, MultipleSolving},
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let quartic = benchmarks::constrained_quartic()?;
    let pso = Pso::new(quartic.problem, pso::Config::new(10, 20, 2.0, 2.0)?);
    let config = trials::Config::new(10)?.with_policy(FailurePolicy::CountAsFailure);

    let mut ms = MultipleSolving::new(pso, config);
    let batch = ms.run(None)?;

    println!("{batch}");
    for outcome in batch.outcomes() {
        println!("trial {}: {} at {:?}", outcome.trial, outcome.value, outcome.position);
    }
    for failure in batch.failures() {
        println!("trial {} failed: {}", failure.trial, failure.error);
    }
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
