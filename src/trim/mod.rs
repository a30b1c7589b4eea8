//! Two-pass trimming of call traces.
//!
//! This module transforms a call stream plus a selection into:
//! - The set of required calls (selection, filters and dependency closure)
//! - A trimmed stream of exactly those calls, in original order
//! - An optional compact summary of what was kept

pub mod options;
pub mod passes;
pub mod range_summary;

// Re-export main types and functions
pub use options::TrimOptions;
pub use passes::{compute_required, emit, EmitSummary};
pub use range_summary::CallRangeSummary;
