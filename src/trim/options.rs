use crate::callset::CallSet;
use std::path::PathBuf;

/// Settings for one trim run, built once from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimOptions {
    /// Calls to be included in the trace
    pub calls: CallSet,

    /// Frames to be included in the trace
    pub frames: CallSet,

    /// Pull in the calls selected calls depend on
    pub dependency_analysis: bool,

    /// Drop calls with no side effects even when selected
    pub prune_uninteresting: bool,

    /// Only select calls from this thread (`None` = all threads)
    pub thread: Option<u32>,

    /// Output path; derived from the input name when absent
    pub output: Option<PathBuf>,

    /// Print the resulting call set after writing
    pub print_callset: bool,
}

impl TrimOptions {
    /// Options with the given selections; an entirely empty selection
    /// means "every call"
    pub fn new(calls: CallSet, frames: CallSet) -> Self {
        let calls = if calls.is_empty() && frames.is_empty() {
            CallSet::all()
        } else {
            calls
        };

        Self {
            calls,
            frames,
            ..Self::default()
        }
    }

    /// `--auto`: dependency analysis plus pruning
    pub fn auto(mut self) -> Self {
        self.dependency_analysis = true;
        self.prune_uninteresting = true;
        self
    }

    /// Whether the scan can stop at this call and frame
    pub fn past_selection(&self, call_no: u64, frame: u64) -> bool {
        self.calls.last().is_exceeded_by(call_no) && self.frames.last().is_exceeded_by(frame)
    }
}

impl Default for TrimOptions {
    fn default() -> Self {
        Self {
            calls: CallSet::all(),
            frames: CallSet::none(),
            dependency_analysis: false,
            prune_uninteresting: false,
            thread: None,
            output: None,
            print_callset: false,
        }
    }
}
