use swarm_core::DomainError;
use thiserror::Error;

/// Errors that can occur during repeated solving.
#[derive(Debug, Error)]
pub enum Error {
    /// A trial failed under [`FailurePolicy::Abort`](super::FailurePolicy::Abort).
    #[error("trial {trial} failed: {source}")]
    Trial {
        trial: usize,
        #[source]
        source: DomainError,
    },

    /// Statistics were required but every trial failed.
    #[error("no trial produced an outcome")]
    NoOutcomes,
}
