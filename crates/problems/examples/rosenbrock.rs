//! Minimize the Rosenbrock function on `[-3, 3]²`, running the trials on a
//! worker pool with one thread per core.
//!
//! ```text
//! cargo run -p swarm-problems --example rosenbrock --release
//! cargo run -p swarm-problems --example rosenbrock --release -- 4
//! ```
//!
//! The optional argument sets the pool size.

use std::error::Error;

use rayon::ThreadPoolBuilder;
use swarm_problems::benchmarks;
use swarm_solvers::{
    pso::{self, Pso},
    trials::{self, MultipleSolving, SuccessCriterion},
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let threads = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<usize>())
        .transpose()?
        .unwrap_or(0);
    // Zero lets rayon pick one thread per core.
    let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;

    let rosenbrock = benchmarks::rosenbrock()?;
    let pso = Pso::new(
        rosenbrock.problem,
        pso::Config::new(100, 230, 1.222, 1.542)?,
    );
    let config = trials::Config::new(10)?.with_success(SuccessCriterion::new(0.0, 1e-4)?);

    let mut ms = MultipleSolving::new(pso, config);
    ms.run(Some(&pool))?;
    println!("pool of {} threads", pool.current_num_threads());
    println!("{ms}");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
