//! Trace records, reading and writing.
//!
//! This module handles:
//! - The call record schema
//! - Bookmarked sequential reading of JSON Lines traces
//! - Appending calls to a new trace

pub mod call;
pub mod parser;
pub mod writer;

// Re-export main types
pub use call::{Call, CallFlags, StateAccess};
pub use parser::{Bookmark, CallSource, MemorySource, TraceParser};
pub use writer::{validate_path, CallSink, TraceWriter};
