use crate::Solution;

/// A single-shot solver that can be run as one independent trial.
///
/// Each call receives its own seed and must not share mutable state with
/// other calls, so trials may run concurrently without locking.
///
/// Closures of the form `Fn(u64) -> Result<Solution, E>` implement this trait.
pub trait Solver: Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Runs one trial seeded from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the trial fails.
    fn solve_trial(&self, seed: u64) -> Result<Solution, Self::Error>;
}

impl<F, E> Solver for F
where
    F: Fn(u64) -> Result<Solution, E> + Sync,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn solve_trial(&self, seed: u64) -> Result<Solution, E> {
        self(seed)
    }
}
