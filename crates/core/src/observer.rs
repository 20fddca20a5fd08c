/// Receives solver events.
///
/// Observers let callers monitor a solver without changing its API, enabling
/// logging, progress reporting, or recording per-iteration state for later
/// analysis. Observers are read-only: they cannot alter the iteration count
/// or steer the search.
///
/// Closures automatically implement `Observer`, and a built-in impl for `()`
/// provides a no-op observer.
pub trait Observer<E> {
    /// Observes a solver event.
    fn observe(&mut self, event: &E);
}

/// Blanket implementation for observer closures.
impl<E, F> Observer<E> for F
where
    F: FnMut(&E),
{
    fn observe(&mut self, event: &E) {
        self(event);
    }
}

/// A no-op observer.
impl<E> Observer<E> for () {
    fn observe(&mut self, _event: &E) {}
}
