//! Tune particle swarm hyperparameters for Himmelblau's function.
//!
//! An outer swarm searches particle counts, iteration counts, and learning
//! factors. Each candidate is scored by the variance of ten inner solves of
//! Himmelblau's function and rejected if those solves average more than five
//! seconds each.
//!
//! This runs thousands of inner swarms; use a release build.
//!
//! ```text
//! cargo run -p swarm-problems --example pso_for_pso --release
//! RUST_LOG=swarm_solvers::tuning=debug cargo run -p swarm-problems --example pso_for_pso --release
//! ```

use std::{error::Error, time::Duration};

use swarm_problems::benchmarks;
use swarm_solvers::{
    pso, trials,
    tuning::{Hyperparameters, Limits, Settings, Tuner},
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let limits = Limits::new(10, Duration::from_secs(5), 150, 250, 4.0)?.with_threads(4, 8)?;
    let settings = Settings::new(
        pso::Config::new(8, 5, 1.5, 1.0)?.with_verbose(true),
        trials::Config::new(5)?,
    )
    .with_outer_threads(2)?;

    let tuner = Tuner::new(benchmarks::himmelblau()?.problem, limits);
    let batch = tuner.run(&settings)?;

    println!("{batch}");
    for outcome in batch.outcomes() {
        if let Some(hyper) = Hyperparameters::from_position(&outcome.position) {
            println!("variance {:e}: {hyper:?}", outcome.value);
        }
    }
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
