use rayon::ThreadPoolBuildError;
use swarm_core::ProblemError;
use thiserror::Error;

use crate::trials;

use super::ConfigError;

/// Errors that can occur during a hyperparameter search.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build search space: {0}")]
    Problem(#[from] ProblemError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] ThreadPoolBuildError),

    #[error(transparent)]
    Trials(#[from] trials::Error),
}
