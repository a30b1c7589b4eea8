//! The two trimming passes.
//!
//! Whether a call belongs in the output can depend on calls that come
//! after it (a later selected call may need it), so trimming reads the
//! trace twice:
//! 1. [`compute_required`] walks the stream, feeds the analyzer and
//!    collects the required call numbers
//! 2. [`emit`] walks the stream again and writes exactly those calls

use super::options::TrimOptions;
use super::range_summary::CallRangeSummary;
use crate::analyzer::DependencyAnalyzer;
use crate::trace::{CallSink, CallSource};
use crate::utils::error::{ParseError, TrimError};
use log::debug;
use std::collections::BTreeSet;

/// Result of the emission pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitSummary {
    /// Calls written to the sink
    pub written: u64,

    /// Range summary of the written calls, when requested
    pub callset: Option<String>,
}

/// Pass 1: find every call the trimmed trace must contain
///
/// **Public** - first half of a trim
///
/// The source is read from its current position. Thread filtering and
/// pruning only decide which calls become explicit roots; state tracking
/// still sees every call up to the point where the selection is exhausted.
///
/// # Errors
/// * any `ParseError` from the source
pub fn compute_required<S, A>(
    source: &mut S,
    options: &TrimOptions,
    mut analyzer: A,
) -> Result<BTreeSet<u64>, ParseError>
where
    S: CallSource + ?Sized,
    A: DependencyAnalyzer,
{
    let mut frame: u64 = 0;
    let mut scanned: u64 = 0;

    while let Some(call) = source.parse_call()? {
        // There's no use doing any work past the last call or frame requested.
        if options.past_selection(call.no, frame) {
            break;
        }
        scanned += 1;

        let other_thread = options.thread.is_some_and(|thread| call.thread != thread);
        let pruned = options.prune_uninteresting && call.is_uninteresting();

        if !other_thread
            && !pruned
            && (options.calls.contains_call(&call)
                || options.frames.contains_with_flags(frame, call.flags))
        {
            analyzer.require(&call);
        }

        // Track state even for calls that were not selected, so that later
        // dependency decisions see up-to-date state.
        if options.dependency_analysis {
            analyzer.analyze(&call);
        }

        if call.ends_frame() {
            frame += 1;
        }
    }

    let required = analyzer.into_required();
    debug!(
        "Pass 1: scanned {} calls over {} frames, {} required",
        scanned,
        frame,
        required.len()
    );

    Ok(required)
}

/// Pass 2: write the required calls in their original order
///
/// **Public** - second half of a trim
///
/// # Errors
/// * `TrimError::Read` - the source failed
/// * `TrimError::Write` - the sink failed
pub fn emit<S, W>(
    source: &mut S,
    required: &BTreeSet<u64>,
    options: &TrimOptions,
    sink: &mut W,
) -> Result<EmitSummary, TrimError>
where
    S: CallSource + ?Sized,
    W: CallSink + ?Sized,
{
    let mut frame: u64 = 0;
    let mut written: u64 = 0;
    let mut summary = options.print_callset.then(CallRangeSummary::new);

    while let Some(call) = source.parse_call().map_err(TrimError::Read)? {
        if options.past_selection(call.no, frame) {
            break;
        }

        if required.contains(&call.no) {
            sink.write_call(&call).map_err(TrimError::Write)?;
            written += 1;

            if let Some(summary) = summary.as_mut() {
                summary.push(call.no);
            }
        }

        if call.ends_frame() {
            frame += 1;
        }
    }

    debug!("Pass 2: wrote {} of {} required calls", written, required.len());

    Ok(EmitSummary {
        written,
        callset: summary.map(|summary| summary.to_string()),
    })
}
