//! Trace Trim
//!
//! Create a new trace by trimming an existing trace down to the calls,
//! frames and threads you care about, optionally pulling in the calls
//! they depend on and dropping calls with no side effects.
//!
//! This crate provides the core implementation for the
//! `trace-trim` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! trace-trim trim --calls=120-180 --auto capture.trace
//! trace-trim trim --frames=3 --print-callset -o frame3.trace capture.trace
//! ```

pub mod analyzer;
pub mod callset;
pub mod commands;
pub mod trace;
pub mod trim;
pub mod utils;
