//! Configuration and constants for the CLI.

/// Suffix appended to the input file stem when no output path is given
pub const TRIM_SUFFIX: &str = "-trim";

/// Extension used for trace files
pub const TRACE_EXTENSION: &str = "trace";

/// Thread filter sentinel meaning "every thread"
pub const ALL_THREADS: i64 = -1;

/// Printed to stderr whenever dependency analysis is enabled
pub const DEPS_EXPERIMENTAL_NOTE: &str = "\
Note: The dependency analysis in \"trace-trim\" is still experimental.
      We hope that it will be useful, but it may lead to incorrect results.
      If you find a trace that misbehaves while trimming, please report it
      together with the trace and the options you used.";
