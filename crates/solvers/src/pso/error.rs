use swarm_core::EvalError;

/// Errors that can occur during a particle swarm run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Evaluating the problem failed; the run is aborted.
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// No particle was feasible at any point of the run.
    #[error("no feasible position found after {iters} iterations")]
    Infeasible { iters: usize },
}
