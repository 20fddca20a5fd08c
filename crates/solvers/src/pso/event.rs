use super::Swarm;

/// Events emitted by the particle swarm solver.
///
/// The solver emits one [`Event::Initialized`] after spawning the swarm and
/// then exactly one [`Event::Iterated`] per iteration, after the global best
/// has been updated for that iteration.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// The swarm has been spawned and its starting positions scored.
    Initialized {
        /// The freshly spawned swarm.
        swarm: &'a Swarm,
    },

    /// One iteration has completed.
    Iterated {
        /// The 1-based iteration number.
        iteration: usize,

        /// The swarm after the iteration.
        swarm: &'a Swarm,
    },
}

impl<'a> Event<'a> {
    /// Returns the swarm at the time of the event.
    #[must_use]
    pub fn swarm(&self) -> &'a Swarm {
        match self {
            Self::Initialized { swarm } | Self::Iterated { swarm, .. } => swarm,
        }
    }

    /// Returns the number of completed iterations (zero when initialized).
    #[must_use]
    pub fn iteration(&self) -> usize {
        match self {
            Self::Initialized { .. } => 0,
            Self::Iterated { iteration, .. } => *iteration,
        }
    }
}
