//! Connectivity check collaborator.
//!
//! Only the boundary lives here. How reachability is actually detected is
//! up to the host; it injects an implementation into the executor.

/// Reports whether the device currently has network reachability.
///
/// Must be synchronous and free of side effects.
pub trait Connectivity: Send + Sync {
    fn is_connected(&self) -> bool;
}

/// A fixed answer. `Static(true)` is the executor default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Static(pub bool);

impl Connectivity for Static {
    fn is_connected(&self) -> bool {
        self.0
    }
}

impl<F> Connectivity for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_connected(&self) -> bool {
        self()
    }
}
