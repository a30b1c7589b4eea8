//! Dependency analysis for trimming.
//!
//! The trimmer only needs three things from an analyzer: mark a call as
//! required, advance state tracking past a call, and hand back the
//! required set once the first pass is over.

pub mod state_tracker;

pub use state_tracker::StateTracker;

use crate::trace::Call;
use std::collections::BTreeSet;

pub trait DependencyAnalyzer {
    /// Mark `call` and everything it transitively depends on as required
    fn require(&mut self, call: &Call);

    /// Advance state tracking past `call` without requiring it
    fn analyze(&mut self, call: &Call);

    /// Call numbers required so far
    fn required(&self) -> &BTreeSet<u64>;

    fn into_required(self) -> BTreeSet<u64>
    where
        Self: Sized;
}
