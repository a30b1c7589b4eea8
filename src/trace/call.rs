//! Call records as stored in a trace.
//!
//! A trace is a JSON Lines file: one call object per line.
//! Only the fields the trimmer needs are typed; everything else
//! (arguments, return values, backtraces) rides along in `extra`
//! and is written back untouched.

use serde::{Deserialize, Serialize};

/// One recorded API call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    /// Sequence number, strictly increasing within a trace
    pub no: u64,

    /// Thread the call was recorded on
    #[serde(default)]
    pub thread: u32,

    /// Function name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default)]
    pub flags: CallFlags,

    /// State keys touched by this call (drives dependency analysis)
    #[serde(default, skip_serializing_if = "StateAccess::is_empty")]
    pub state: StateAccess,

    /// Fields the trimmer does not interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Call {
    /// Create a bare call with no flags and no state access
    pub fn new(no: u64, thread: u32, name: impl Into<String>) -> Self {
        Self {
            no,
            thread,
            name: name.into(),
            flags: CallFlags::default(),
            state: StateAccess::default(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_flags(mut self, flags: CallFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_state(mut self, state: StateAccess) -> Self {
        self.state = state;
        self
    }

    /// Whether this call closes the current frame
    pub fn ends_frame(&self) -> bool {
        self.flags.end_frame
    }

    /// Whether this call has no observable side effect
    pub fn is_uninteresting(&self) -> bool {
        self.flags.verbose
    }
}

/// Per-call flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallFlags {
    /// No observable side effect; candidate for pruning
    #[serde(default)]
    pub verbose: bool,

    /// Last call of a frame (e.g. a swap-buffers call)
    #[serde(default)]
    pub end_frame: bool,
}

impl CallFlags {
    pub const END_FRAME: CallFlags = CallFlags {
        verbose: false,
        end_frame: true,
    };

    pub const VERBOSE: CallFlags = CallFlags {
        verbose: true,
        end_frame: false,
    };
}

/// State keys a call reads, accumulates into, or replaces
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateAccess {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reads: Vec<String>,

    /// Keys updated on top of their previous value
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub writes: Vec<String>,

    /// Keys whose previous value is discarded
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resets: Vec<String>,
}

impl StateAccess {
    pub fn is_empty(&self) -> bool {
        self.reads.is_empty() && self.writes.is_empty() && self.resets.is_empty()
    }

    pub fn reads<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reads.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn writes<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.writes.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn resets<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resets.extend(keys.into_iter().map(Into::into));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_record_uses_defaults() {
        let call: Call = serde_json::from_str(r#"{"no": 7}"#).unwrap();

        assert_eq!(call.no, 7);
        assert_eq!(call.thread, 0);
        assert!(!call.ends_frame());
        assert!(!call.is_uninteresting());
        assert!(call.state.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_preserved() {
        let line = r#"{"no":3,"thread":2,"name":"glClear","args":{"mask":16384},"ret":null}"#;
        let call: Call = serde_json::from_str(line).unwrap();

        assert_eq!(call.extra["args"]["mask"], 16384);
        assert!(call.extra.contains_key("ret"));

        let written = serde_json::to_string(&call).unwrap();
        let reread: Call = serde_json::from_str(&written).unwrap();
        assert_eq!(reread, call);
    }

    #[test]
    fn test_flags_deserialize() {
        let line = r#"{"no":1,"flags":{"end_frame":true}}"#;
        let call: Call = serde_json::from_str(line).unwrap();

        assert!(call.ends_frame());
        assert!(!call.is_uninteresting());
    }
}
