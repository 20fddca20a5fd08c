use rand::Rng;
use swarm_core::{EvalError, Problem};

use crate::Solution;

use super::{Config, Error, Particle};

/// The best feasible position found by any particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Best {
    /// The best position.
    pub position: Vec<f64>,

    /// The normalized score at `position` (greater is better).
    pub score: f64,
}

/// The population of particles managed by one run.
///
/// A swarm only lives for the duration of a single solve. The global best is
/// only ever taken from a feasible particle, so it stays `None` while no
/// particle has been feasible.
#[derive(Debug, Clone)]
pub struct Swarm {
    particles: Vec<Particle>,
    best: Option<Best>,
    iteration: usize,
}

impl Swarm {
    /// Spawns the particles and takes the global best from the feasible ones.
    pub(super) fn spawn<R: Rng>(
        problem: &Problem,
        config: &Config,
        rng: &mut R,
    ) -> Result<Self, EvalError> {
        let particles = (0..config.particles())
            .map(|_| Particle::spawn(problem, rng))
            .collect::<Result<Vec<_>, _>>()?;

        let mut swarm = Self {
            particles,
            best: None,
            iteration: 0,
        };
        swarm.update_best();
        Ok(swarm)
    }

    /// Runs one iteration.
    ///
    /// Every particle steps toward the global best as it stood at the start
    /// of the iteration. The global best is updated only after all particles
    /// have moved.
    pub(super) fn advance<R: Rng>(
        &mut self,
        problem: &Problem,
        config: &Config,
        rng: &mut R,
    ) -> Result<(), EvalError> {
        let leader = self.best.as_ref().map(|best| best.position.as_slice());
        for particle in &mut self.particles {
            particle.step(problem, leader, config, rng)?;
        }

        self.iteration += 1;
        self.update_best();
        Ok(())
    }

    /// Takes the global best from particles that are feasible right now.
    ///
    /// A particle replaces the global best only with a strictly greater
    /// score, so the first particle in order wins a tie.
    fn update_best(&mut self) {
        for particle in &self.particles {
            if let Some(score) = particle.score()
                && self.best.as_ref().is_none_or(|best| score > best.score)
            {
                self.best = Some(Best {
                    position: particle.position().to_vec(),
                    score,
                });
            }
        }
    }

    /// Returns the particles in spawn order.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Returns the global best, if any particle has been feasible.
    #[must_use]
    pub fn best(&self) -> Option<&Best> {
        self.best.as_ref()
    }

    /// Returns the number of completed iterations.
    #[must_use]
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Returns the number of particles feasible at their current position.
    #[must_use]
    pub fn feasible_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_feasible()).count()
    }

    /// Consumes the swarm and reports its global best in the problem's direction.
    pub(super) fn into_solution(self, problem: &Problem) -> Result<Solution, Error> {
        let iters = self.iteration;
        let best = self.best.ok_or(Error::Infeasible { iters })?;

        Ok(Solution {
            value: problem.goal().value(best.score),
            position: best.position,
            iters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use swarm_core::Goal;

    #[test]
    fn spawn_seeds_best_from_feasible_particles() {
        let problem = Problem::new(|x: &[f64]| x[0], [(0.0, 1.0)], 1, Goal::Maximize)
            .unwrap();
        let config = Config::new(25, 0, 2.0, 2.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let swarm = Swarm::spawn(&problem, &config, &mut rng).unwrap();

        let max = swarm
            .particles()
            .iter()
            .map(|p| p.position()[0])
            .fold(f64::NEG_INFINITY, f64::max);
        assert_relative_eq!(swarm.best().unwrap().score, max);
        assert_eq!(swarm.iteration(), 0);
        assert_eq!(swarm.feasible_count(), 25);
    }

    #[test]
    fn tie_keeps_first_particle() {
        // A flat objective scores every particle the same.
        let problem = Problem::new(|_: &[f64]| 1.0, [(0.0, 1.0)], 1, Goal::Maximize)
            .unwrap();
        let config = Config::new(10, 0, 2.0, 2.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let swarm = Swarm::spawn(&problem, &config, &mut rng).unwrap();

        assert_eq!(
            swarm.best().unwrap().position,
            swarm.particles()[0].position()
        );
    }

    #[test]
    fn infeasible_swarm_has_no_best() {
        let problem = Problem::new(|x: &[f64]| x[0], [(0.0, 1.0)], 1, Goal::Maximize)
            .unwrap()
            .with_constraint(|_: &[f64]| false);
        let config = Config::new(5, 3, 2.0, 2.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let mut swarm = Swarm::spawn(&problem, &config, &mut rng).unwrap();
        for _ in 0..3 {
            swarm.advance(&problem, &config, &mut rng).unwrap();
        }

        assert!(swarm.best().is_none());
        assert!(matches!(
            swarm.into_solution(&problem),
            Err(Error::Infeasible { iters: 3 })
        ));
    }

    #[test]
    fn solution_value_uses_problem_direction() {
        let problem = Problem::new(|x: &[f64]| x[0] * x[0], [(1.0, 2.0)], 1, Goal::Minimize)
            .unwrap();
        let config = Config::new(8, 0, 2.0, 2.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let swarm = Swarm::spawn(&problem, &config, &mut rng).unwrap();
        let solution = swarm.into_solution(&problem).unwrap();

        let x = solution.position[0];
        assert_relative_eq!(solution.value, x * x);
        assert!(solution.value > 0.0);
    }
}
