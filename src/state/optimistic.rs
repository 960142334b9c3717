//! Commit-or-revert guard for optimistic mutations.
//!
//! The UI applies a local state change before the server confirms it.
//! Capture a snapshot first, apply the tentative change, then either
//! commit (drop the snapshot) on success or revert (restore it) on
//! failure. The like toggle is the one mutation that rolls back by
//! re-applying its own inverse instead; see `state::comments`.

#[cfg(test)]
#[path = "optimistic_test.rs"]
mod optimistic_test;

/// A captured pre-mutation snapshot of some piece of state.
#[derive(Clone, Debug)]
pub struct Tentative<T: Clone> {
    snapshot: T,
}

impl<T: Clone> Tentative<T> {
    /// Capture the state as it is right before the tentative change.
    pub fn capture(current: &T) -> Self {
        Self { snapshot: current.clone() }
    }

    /// The server confirmed the change; the snapshot is no longer needed.
    pub fn commit(self) {}

    /// The request failed; hand back the pre-mutation state.
    pub fn revert(self) -> T {
        self.snapshot
    }
}
