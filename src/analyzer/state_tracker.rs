//! State-key based dependency tracking.
//!
//! Every call declares the state keys it reads, writes (updates on top of
//! the previous value) and resets (replaces outright). For each key the
//! tracker remembers the *providers*: the calls whose effects make up the
//! key's current value. A call depends on the providers of the keys it
//! reads, and requiring a call pulls in those providers transitively.

use super::DependencyAnalyzer;
use crate::trace::Call;
use log::trace;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Default)]
pub struct StateTracker {
    /// state key -> calls contributing to its current value
    providers: HashMap<String, Vec<u64>>,

    /// call -> direct dependencies, recorded when the call was analyzed
    dependencies: HashMap<u64, Vec<u64>>,

    required: BTreeSet<u64>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Providers of every key `call` reads, given the current state
    fn direct_dependencies(&self, call: &Call) -> Vec<u64> {
        let mut deps: Vec<u64> = call
            .state
            .reads
            .iter()
            .filter_map(|key| self.providers.get(key))
            .flatten()
            .copied()
            .filter(|&no| no != call.no)
            .collect();
        deps.sort_unstable();
        deps.dedup();
        deps
    }

    /// Current providers of a state key
    pub fn providers(&self, key: &str) -> &[u64] {
        self.providers.get(key).map(Vec::as_slice).unwrap_or_default()
    }
}

impl DependencyAnalyzer for StateTracker {
    fn require(&mut self, call: &Call) {
        if !self.required.insert(call.no) {
            return;
        }

        // `require` runs before `analyze` for the same call, so its own
        // dependencies come from the live state rather than the record.
        let mut pending = self.direct_dependencies(call);

        while let Some(no) = pending.pop() {
            if !self.required.insert(no) {
                continue;
            }
            trace!("call {} pulled in by dependency", no);
            if let Some(deps) = self.dependencies.get(&no) {
                pending.extend(deps.iter().copied());
            }
        }
    }

    fn analyze(&mut self, call: &Call) {
        let deps = self.direct_dependencies(call);
        if !deps.is_empty() {
            self.dependencies.insert(call.no, deps);
        }

        for key in &call.state.resets {
            self.providers.insert(key.clone(), vec![call.no]);
        }

        for key in &call.state.writes {
            let providers = self.providers.entry(key.clone()).or_default();
            if providers.last() != Some(&call.no) {
                providers.push(call.no);
            }
        }
    }

    fn required(&self) -> &BTreeSet<u64> {
        &self.required
    }

    fn into_required(self) -> BTreeSet<u64> {
        self.required
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::StateAccess;

    fn call(no: u64, state: StateAccess) -> Call {
        Call::new(no, 0, format!("call{}", no)).with_state(state)
    }

    #[test]
    fn test_require_without_analysis_is_just_the_call() {
        let mut tracker = StateTracker::new();
        tracker.require(&call(4, StateAccess::default().reads(["tex"])));

        assert_eq!(tracker.required().iter().copied().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn test_reset_replaces_providers() {
        let mut tracker = StateTracker::new();
        tracker.analyze(&call(0, StateAccess::default().writes(["fb"])));
        tracker.analyze(&call(1, StateAccess::default().writes(["fb"])));
        assert_eq!(tracker.providers("fb"), &[0, 1]);

        tracker.analyze(&call(2, StateAccess::default().resets(["fb"])));
        assert_eq!(tracker.providers("fb"), &[2]);
        assert!(tracker.providers("missing").is_empty());
    }

    #[test]
    fn test_transitive_closure() {
        let mut tracker = StateTracker::new();
        // 0 creates a buffer, 1 fills it from the buffer, 2 binds program, 3 draws
        let calls = [
            call(0, StateAccess::default().resets(["buf"])),
            call(1, StateAccess::default().reads(["buf"]).writes(["vbo"])),
            call(2, StateAccess::default().resets(["program"])),
            call(3, StateAccess::default().reads(["vbo"])),
        ];
        for c in &calls[..3] {
            tracker.analyze(c);
        }

        tracker.require(&calls[3]);

        assert_eq!(
            tracker.into_required().into_iter().collect::<Vec<_>>(),
            vec![0, 1, 3]
        );
    }
}
