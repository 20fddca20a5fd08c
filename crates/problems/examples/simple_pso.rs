//! Maximize `2x·sin(x²)` on `[-3, 3]` with a single swarm, then repeat the
//! solve to see how often it lands on the global maximum near `x = 2.814`.
//!
//! ```text
//! cargo run -p swarm-problems --example simple_pso
//! RUST_LOG=debug cargo run -p swarm-problems --example simple_pso
//! ```

use std::error::Error;

use swarm_problems::benchmarks;
use swarm_solvers::{
    pso::{self, Pso},
    trials::{self, MultipleSolving, SuccessCriterion},
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let wave = benchmarks::wave()?;
    let config = pso::Config::new(45, 20, 2.99, 1.81)?;
    let pso = Pso::new(wave.problem, config);

    let solution = pso.solve(&mut rand::rng())?;
    println!("single solve: {solution:?}");

    let mut trials = trials::Config::new(20)?;
    if let Some(optimum) = wave.optimum {
        trials = trials.with_success(SuccessCriterion::new(optimum, 0.05)?);
    }
    let mut ms = MultipleSolving::new(pso, trials);
    ms.run(None)?;

    println!("{ms}");
    println!("values: {:?}", ms.outcome_values());
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
