//! Production planning with linear and nonlinear profit models.
//!
//! Four plans are solved, each with repeated trials:
//!
//! - **linear**: one period, two products, three resources; the optimum is
//!   `(20, 30)` with a profit of 2300
//! - **log two-year**: two periods with a `10 · price · log10(q)²` profit
//! - **linear three-year**: three periods, six decision variables
//! - **fertilizer**: a two-year plan with large resource stocks and price
//!   growth in the second year
//!
//! Leftover resources of one year are available the next. A small swarm may
//! spawn with no feasible particle at all, so those trials are counted as
//! failures rather than aborting the batch.
//!
//! ```text
//! cargo run -p swarm-problems --example production_planning --release
//! ```

use std::{error::Error, sync::Arc};

use swarm_core::Problem;
use swarm_problems::planning::{self, Period, Plan, ProfitModel};
use swarm_solvers::{
    pso::{self, Pso},
    trials::{self, FailurePolicy, MultipleSolving, SuccessCriterion},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let linear = planning::linear().problem([(0.0, 100.0); 2])?;
    let success = SuccessCriterion::new(2300.0, 1.0)?;
    solve(
        "linear",
        linear,
        pso::Config::new(10, 20, 2.0, 2.0)?,
        trials::Config::new(20)?.with_success(success),
    )?;

    let log_two_year = planning::repeated(2, ProfitModel::LogSquared)?.problem([(5.0, 100.0); 4])?;
    solve(
        "log two-year",
        log_two_year,
        pso::Config::new(40, 20, 2.0, 2.0)?,
        trials::Config::new(10)?,
    )?;

    let linear_three_year = planning::repeated(3, ProfitModel::Linear)?.problem([(0.0, 100.0); 6])?;
    solve(
        "linear three-year",
        linear_three_year,
        pso::Config::new(40, 20, 2.0, 2.0)?,
        trials::Config::new(10)?,
    )?;

    let fertilizer = fertilizer()?.problem([
        (1000.0, 10000.0),
        (1000.0, 10000.0),
        (1500.0, 10000.0),
        (1500.0, 10000.0),
    ])?;
    solve(
        "fertilizer",
        fertilizer,
        pso::Config::new(40, 40, 4.0, 2.0)?,
        trials::Config::new(20)?,
    )?;

    Ok(())
}

/// Two years of gas and chloride production sharing nitrogen, hydrogen, and
/// chlorine stocks.
fn fertilizer() -> Result<Plan, planning::PlanError> {
    let year = |price: f64, nitrogen: f64, hydrogen: f64, chlorine: f64| {
        Period::new(vec![price, price], ProfitModel::Linear)
            .with_resource(nitrogen, vec![1.0, 1.0])
            .with_resource(hydrogen, vec![3.0, 4.0])
            .with_resource(chlorine, vec![0.0, 1.0])
    };

    Plan::new(vec![
        year(100.0, 5000.0, 18600.0, 2000.0),
        year(110.0, 6000.0, 15000.0, 2000.0),
    ])
}

fn solve(
    name: &str,
    problem: Problem,
    swarm: pso::Config,
    trials: trials::Config,
) -> Result<(), Box<dyn Error>> {
    info!(plan = name, products = problem.dimensions(), "solving");

    let pso = Pso::new(Arc::new(problem), swarm);
    let mut ms = MultipleSolving::new(pso, trials.with_policy(FailurePolicy::CountAsFailure));
    let batch = ms.run(None)?;

    println!("== {name} ==");
    println!("{batch}");
    if let Some(best) = batch.max_outcome() {
        println!("best: {} at {:?}", best.value, best.position);
    }
    println!();
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
