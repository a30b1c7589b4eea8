//! Trim command implementation.
//!
//! The trim command:
//! 1. Parses the call selection
//! 2. Opens the input trace and bookmarks its start
//! 3. Finds the required calls (pass 1)
//! 4. Creates the output trace
//! 5. Rewinds and writes the required calls (pass 2)
//! 6. Reports the result

use super::models::TrimArgs;
use super::utils::default_output_path;
use crate::analyzer::StateTracker;
use crate::trace::{CallSource, TraceParser, TraceWriter};
use crate::trim::{compute_required, emit, TrimOptions};
use crate::utils::config::{ALL_THREADS, DEPS_EXPERIMENTAL_NOTE};
use crate::utils::error::{TrimError, WriterError};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Outcome of a successful trim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimReport {
    /// Where the trimmed trace was written
    pub output: PathBuf,

    /// Size of the required set after pass 1
    pub required: usize,

    /// Calls actually written
    pub written: u64,

    /// Range summary of the written calls, when requested
    pub callset: Option<String>,
}

/// Execute the trim command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Invalid arguments or call-set syntax (before any file is opened)
/// * Input trace cannot be opened or read
/// * Output trace cannot be created or written
pub fn execute_trim(args: TrimArgs) -> Result<TrimReport> {
    validate_args(&args)?;

    let options = args
        .to_options()
        .context("Invalid call selection")?;

    if options.dependency_analysis {
        eprintln!("{}", DEPS_EXPERIMENTAL_NOTE);
    }

    let report = trim_trace(&args.trace, &options)
        .with_context(|| format!("Failed to trim {}", args.trace.display()))?;

    if let Some(callset) = report.callset.as_deref().filter(|c| !c.is_empty()) {
        println!("{}", callset);
    }

    info!("Trimmed trace is available as {}", report.output.display());

    Ok(report)
}

/// Trim one trace file with already-parsed options
///
/// **Public** - library entry point without CLI concerns
///
/// The output file is only created after pass 1 has finished, so a bad
/// output path never leaves a partial trace behind.
pub fn trim_trace(input: &Path, options: &TrimOptions) -> Result<TrimReport, TrimError> {
    let start_time = Instant::now();

    let mut parser = TraceParser::open(input).map_err(TrimError::OpenError)?;

    // Mark the beginning so we can return here for pass 2.
    let beginning = parser.bookmark();

    info!("Pass 1/2: analyzing which calls are needed...");
    let required = compute_required(&mut parser, options, StateTracker::new())
        .map_err(TrimError::Read)?;

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input));

    // Creating the writer truncates the file, so an alias of the input
    // (`sub/../frame.trace`, a symlink) must be caught before that.
    if is_same_file(input, &output) {
        return Err(TrimError::CreateError(WriterError::InvalidPath(format!(
            "output would overwrite the input trace {}",
            output.display()
        ))));
    }

    let mut writer = TraceWriter::create(&output).map_err(TrimError::CreateError)?;

    parser.set_bookmark(beginning).map_err(TrimError::Read)?;

    info!("Pass 2/2: writing {} required calls...", required.len());
    let summary = emit(&mut parser, &required, options, &mut writer)?;
    writer.finish().map_err(TrimError::Write)?;

    debug!(
        "Trim completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(TrimReport {
        output,
        required: required.len(),
        written: summary.written,
        callset: summary.callset,
    })
}

/// Whether both paths name the same existing file
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Validate trim arguments
///
/// **Public** - can be called before execute_trim for early validation
pub fn validate_args(args: &TrimArgs) -> Result<()> {
    if args.trace.as_os_str().is_empty() {
        anyhow::bail!("trim requires a trace file as an argument");
    }

    if args.thread < ALL_THREADS || args.thread > i64::from(u32::MAX) {
        anyhow::bail!(
            "thread must be a thread id or {} for all threads, got {}",
            ALL_THREADS,
            args.thread
        );
    }

    if let Some(output) = &args.output {
        if output == &args.trace {
            anyhow::bail!("output would overwrite the input trace {}", output.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(trace: &str) -> TrimArgs {
        TrimArgs {
            trace: PathBuf::from(trace),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_args_valid() {
        assert!(validate_args(&args("frame.trace")).is_ok());
    }

    #[test]
    fn test_validate_args_missing_trace() {
        assert!(validate_args(&TrimArgs::default()).is_err());
    }

    #[test]
    fn test_validate_args_bad_thread() {
        let args = TrimArgs {
            thread: -2,
            ..args("frame.trace")
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_output_is_input() {
        let args = TrimArgs {
            output: Some(PathBuf::from("frame.trace")),
            ..args("frame.trace")
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_invalid_callset_fails_before_io() {
        let args = TrimArgs {
            calls: Some("1-x".to_string()),
            ..args("/nonexistent/never-opened.trace")
        };

        let err = execute_trim(args).unwrap_err();
        let root = err.root_cause().to_string();
        assert!(root.contains("Invalid call range syntax"), "{}", root);
    }
}
