use rand::Rng;
use swarm_core::{EvalError, Problem};

use super::Config;

/// One candidate solution moving through the search space.
///
/// A particle remembers the best feasible position it has visited. Scores are
/// normalized so that greater is better regardless of the problem's goal.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: Vec<f64>,
    velocity: Vec<f64>,
    best_position: Vec<f64>,
    best_score: Option<f64>,
    score: Option<f64>,
}

impl Particle {
    /// Spawns a particle at a uniformly random position with zero velocity.
    ///
    /// The starting position seeds the personal best position. It also seeds
    /// the personal best score when feasible; otherwise that score stays
    /// undefined until the particle reaches a feasible position.
    pub(super) fn spawn<R: Rng>(problem: &Problem, rng: &mut R) -> Result<Self, EvalError> {
        let position: Vec<f64> = problem
            .bounds()
            .iter()
            .map(|bound| rng.random_range(bound.min()..=bound.max()))
            .collect();

        let score = score_if_feasible(problem, &position)?;

        Ok(Self {
            velocity: vec![0.0; position.len()],
            best_position: position.clone(),
            best_score: score,
            score,
            position,
        })
    }

    /// Moves the particle one step.
    ///
    /// The new velocity blends the previous velocity with random pulls toward
    /// the personal best and toward `leader` (the global best, if any). The
    /// position is then clamped to the problem bounds and committed whether
    /// or not it is feasible. Only a feasible position is scored and may
    /// replace the personal best.
    pub(super) fn step<R: Rng>(
        &mut self,
        problem: &Problem,
        leader: Option<&[f64]>,
        config: &Config,
        rng: &mut R,
    ) -> Result<(), EvalError> {
        for (d, bound) in problem.bounds().iter().enumerate() {
            let x = self.position[d];
            let r1: f64 = rng.random();
            let r2: f64 = rng.random();

            let cognitive = config.cognitive() * r1 * (self.best_position[d] - x);
            let social = leader.map_or(0.0, |leader| config.social() * r2 * (leader[d] - x));
            let velocity = config.inertia() * self.velocity[d] + cognitive + social;

            self.velocity[d] = velocity;
            self.position[d] = bound.clamp(x + velocity);
        }

        self.score = score_if_feasible(problem, &self.position)?;

        if let Some(score) = self.score
            && self.best_score.is_none_or(|best| score > best)
        {
            self.best_score = Some(score);
            self.best_position.clone_from(&self.position);
        }

        Ok(())
    }

    /// Returns the current position.
    #[must_use]
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    /// Returns the current velocity.
    #[must_use]
    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    /// Returns the personal best position.
    ///
    /// Until the particle has been feasible, this is its starting position.
    #[must_use]
    pub fn best_position(&self) -> &[f64] {
        &self.best_position
    }

    /// Returns the personal best score, if the particle has ever been feasible.
    #[must_use]
    pub fn best_score(&self) -> Option<f64> {
        self.best_score
    }

    /// Returns the score at the current position, or `None` if infeasible.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Returns true if every constraint holds at the current position.
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.score.is_some()
    }
}

/// Scores `x` if it is feasible. The objective is never called otherwise.
fn score_if_feasible(problem: &Problem, x: &[f64]) -> Result<Option<f64>, EvalError> {
    if problem.is_feasible(x)? {
        problem.evaluate(x).map(Some)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use swarm_core::Goal;

    fn line(goal: Goal) -> Problem {
        Problem::new(|x: &[f64]| x[0], [(0.0, 10.0)], 1, goal).unwrap()
    }

    fn particle_at(x: f64, best: f64, score: Option<f64>) -> Particle {
        Particle {
            position: vec![x],
            velocity: vec![0.0],
            best_position: vec![best],
            best_score: score,
            score,
        }
    }

    #[test]
    fn spawns_within_bounds_at_rest() {
        let problem = Problem::new(
            |x: &[f64]| x[0] + x[1],
            [(-1.0, 1.0), (5.0, 6.0)],
            2,
            Goal::Maximize,
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..100 {
            let particle = Particle::spawn(&problem, &mut rng).unwrap();
            assert!(problem.contains(particle.position()));
            assert_eq!(particle.velocity(), &[0.0, 0.0]);
            assert_eq!(particle.best_position(), particle.position());
        }
    }

    #[test]
    fn infeasible_spawn_has_no_best_score() {
        let problem = line(Goal::Maximize).with_constraint(|_: &[f64]| false);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let particle = Particle::spawn(&problem, &mut rng).unwrap();

        assert!(!particle.is_feasible());
        assert_eq!(particle.best_score(), None);
    }

    #[test]
    fn step_is_clamped_to_bounds() {
        let problem = line(Goal::Maximize);
        let config = Config::new(1, 1, 0.0, 50.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        // A leader far outside the bounds pulls the particle past the limit.
        let mut particle = particle_at(5.0, 5.0, Some(5.0));
        for _ in 0..20 {
            particle.step(&problem, Some([1000.0].as_slice()), &config, &mut rng).unwrap();
            assert!(problem.contains(particle.position()));
        }
        assert_relative_eq!(particle.position()[0], 10.0);
    }

    #[test]
    fn step_without_leader_has_no_social_pull() {
        let problem = line(Goal::Maximize);
        let config = Config::new(1, 1, 0.0, 2.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let mut particle = particle_at(4.0, 4.0, Some(4.0));
        particle.step(&problem, None, &config, &mut rng).unwrap();

        assert_relative_eq!(particle.position()[0], 4.0);
        assert_relative_eq!(particle.velocity()[0], 0.0);
    }

    #[test]
    fn feasible_improvement_updates_personal_best() {
        let problem = line(Goal::Minimize);
        let config = Config::new(1, 1, 0.0, 1.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let mut particle = particle_at(8.0, 8.0, Some(-8.0));
        particle.step(&problem, Some([0.0].as_slice()), &config, &mut rng).unwrap();

        let x = particle.position()[0];
        assert!(x < 8.0);
        assert_eq!(particle.best_position(), &[x]);
        assert_relative_eq!(particle.best_score().unwrap(), -x);
    }

    #[test]
    fn infeasible_move_is_committed_without_scoring() {
        let problem = line(Goal::Maximize).with_constraint(|x: &[f64]| x[0] <= 5.0);
        let config = Config::new(1, 1, 0.0, 1.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let mut particle = particle_at(5.0, 5.0, Some(5.0));
        particle.step(&problem, Some([10.0].as_slice()), &config, &mut rng).unwrap();

        // The particle moved into the infeasible region and stays there.
        assert!(particle.position()[0] > 5.0);
        assert!(!particle.is_feasible());
        assert_eq!(particle.score(), None);

        // Its personal best is untouched.
        assert_eq!(particle.best_position(), &[5.0]);
        assert_relative_eq!(particle.best_score().unwrap(), 5.0);
    }
}
