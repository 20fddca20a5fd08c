//! Minimize Himmelblau's function on `[-5, 5]²` with the coefficients found
//! by the `pso_for_pso` example.
//!
//! The function has four global minima, so the reported positions differ
//! between trials while the values all approach zero.
//!
//! ```text
//! cargo run -p swarm-problems --example himmelblau --release
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

    let himmelblau = benchmarks::himmelblau()?;
    let pso = Pso::new(
        himmelblau.problem,
        pso::Config::new(140, 225, 1.052, 0.8791)?,
    );
    let config = trials::Config::new(10)?.with_success(SuccessCriterion::new(0.0, 1e-6)?);

    let mut ms = MultipleSolving::new(pso, config);
    ms.run(None)?;
    println!("{ms}");

    for outcome in ms.outcomes() {
        println!("({:.4}, {:.4}) -> {:e}", outcome.position[0], outcome.position[1], outcome.value);
    }
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
