//! Particle swarm optimization over a bounded, constrained search space.
//!
//! # Algorithm
//!
//! A swarm of particles is spawned uniformly inside the problem bounds with
//! zero velocity. Each iteration, every particle updates its velocity
//!
//! ```text
//! v' = w·v + c1·r1·(p − x) + c2·r2·(g − x)
//! ```
//!
//! where `p` is the particle's personal best, `g` the swarm's global best,
//! `r1` and `r2` fresh uniform draws in `[0, 1)` per dimension, `c1` and `c2`
//! the cognitive and social coefficients, and `w` the inertia weight (`1.0`
//! by default, which keeps the full previous velocity). The new position
//! `x + v'` is clamped to the bounds.
//!
//! # Constraints
//!
//! A moved particle always commits its new position and velocity, even when
//! the position violates a constraint, so the swarm keeps exploring. Only
//! feasible positions are scored, and only scored positions can replace a
//! personal or global best. A particle that never returns to the feasible
//! region keeps a stale personal best.
//!
//! When no particle is ever feasible the run fails with
//! [`Error::Infeasible`], so callers can retry with relaxed constraints.
//!
//! # Termination
//!
//! The solver always runs exactly [`Config::iterations`] iterations; there is
//! no convergence test and no early exit.
//!
//! # Observer Events
//!
//! [`Pso::solve_observed`] emits [`Event::Initialized`] once and
//! [`Event::Iterated`] after every iteration. Observers are read-only.
//!
//! # Reproducibility
//!
//! All randomness is drawn from the caller's RNG. Two solves with identically
//! seeded RNGs produce identical solutions.

mod config;
mod error;
mod event;
mod particle;
mod swarm;


pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use particle::Particle;
pub use swarm::{Best, Swarm};

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use swarm_core::{Observer, Problem};
use tracing::{debug, info, trace};

use crate::{Solution, Solver};

/// A particle swarm solver for one problem.
///
/// The solver holds no per-run state: every call to [`Pso::solve`] spawns a
/// fresh swarm, runs it to completion, and discards it. One solver can be
/// reused for any number of runs, including concurrent ones.
#[derive(Debug, Clone)]
pub struct Pso {
    problem: Arc<Problem>,
    config: Config,
}

impl Pso {
    /// Creates a solver for `problem`.
    #[must_use]
    pub fn new(problem: Arc<Problem>, config: Config) -> Self {
        Self { problem, config }
    }

    /// Returns the problem being solved.
    #[must_use]
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// Returns the solver config.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the swarm, drawing all randomness from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Eval`] if the objective or a constraint fails, or
    /// [`Error::Infeasible`] if no particle is ever feasible.
    pub fn solve<R: Rng>(&self, rng: &mut R) -> Result<Solution, Error> {
        self.solve_observed(rng, ())
    }

    /// Runs the swarm with a `ChaCha8Rng` seeded from `seed`.
    ///
    /// # Errors
    ///
    /// See [`Pso::solve`].
    pub fn solve_seeded(&self, seed: u64) -> Result<Solution, Error> {
        self.solve(&mut ChaCha8Rng::seed_from_u64(seed))
    }

    /// Runs the swarm and reports each iteration to `observer`.
    ///
    /// See the [module docs](self) for event timing.
    ///
    /// # Errors
    ///
    /// See [`Pso::solve`].
    pub fn solve_observed<R, Obs>(&self, rng: &mut R, mut observer: Obs) -> Result<Solution, Error>
    where
        R: Rng,
        Obs: for<'a> Observer<Event<'a>>,
    {
        let problem = self.problem.as_ref();
        let config = &self.config;

        let mut swarm = Swarm::spawn(problem, config, rng)?;
        debug!(
            particles = config.particles(),
            iterations = config.iterations(),
            dimensions = problem.dimensions(),
            feasible = swarm.feasible_count(),
            "swarm spawned"
        );
        observer.observe(&Event::Initialized { swarm: &swarm });

        for iteration in 1..=config.iterations() {
            swarm.advance(problem, config, rng)?;

            let best = swarm.best().map(|best| problem.goal().value(best.score));
            if config.verbose() {
                info!(iteration, best = ?best, feasible = swarm.feasible_count(), "swarm iteration");
            } else {
                trace!(iteration, best = ?best, feasible = swarm.feasible_count(), "swarm iteration");
            }

            observer.observe(&Event::Iterated {
                iteration,
                swarm: &swarm,
            });
        }

        let solution = swarm.into_solution(problem)?;
        debug!(value = solution.value, iters = solution.iters, "swarm finished");
        Ok(solution)
    }
}

impl Solver for Pso {
    type Error = Error;

    fn solve_trial(&self, seed: u64) -> Result<Solution, Self::Error> {
        self.solve_seeded(seed)
    }
}
