//! Trace Trim CLI
//!
//! Creates a new trace by trimming an existing trace.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use trace_trim::commands::{display_version, execute_trim, TrimArgs};
use trace_trim::utils::config::ALL_THREADS;

/// Trace Trim - cut recorded call traces down to size
#[derive(Parser, Debug)]
#[command(name = "trace-trim")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new trace by trimming an existing trace
    Trim {
        /// Trace file to trim
        trace: PathBuf,

        /// Include specified calls in the trimmed output
        #[arg(long, value_name = "CALLSET", long_help = "\
Include specified calls in the trimmed output.
Ranges like 10-20,35,40- ; use --calls=@FILE to read the call set from a file.")]
        calls: Option<String>,

        /// Include specified frames in the trimmed output
        #[arg(long, value_name = "FRAMESET")]
        frames: Option<String>,

        /// Include additional calls to satisfy dependencies
        #[arg(long, long_help = "\
Perform dependency analysis and include dependent calls as needed,
(even if those calls were not explicitly requested with --calls or --frames).")]
        deps: bool,

        /// Omit uninteresting calls from the trace output
        #[arg(long, long_help = "\
Omit calls with no side effects, even if the call is within the range
specified by --calls/--frames.")]
        prune: bool,

        /// Trim automatically to calls specified in --calls/--frames (--deps --prune)
        #[arg(short, long)]
        auto: bool,

        /// Print the final set of calls included in output
        #[arg(long, long_help = "\
Print to stdout the final set of calls included in the trim output. This can
be useful for tweaking the trimmed call set from --auto on the command-line.")]
        print_callset: bool,

        /// Only retain calls from specified thread (-1 = all threads)
        #[arg(
            long,
            value_name = "THREAD_ID",
            default_value_t = ALL_THREADS,
            allow_negative_numbers = true,
            value_parser = clap::value_parser!(i64).range(ALL_THREADS..=i64::from(u32::MAX))
        )]
        thread: i64,

        /// Output trace file (defaults to <TRACE>-trim.trace)
        #[arg(short, long, value_name = "TRACE_FILE")]
        output: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Usage errors exit with 1, help and version with 0
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        std::process::exit(if err.use_stderr() { 1 } else { 0 });
    });

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Trim {
            trace,
            calls,
            frames,
            deps,
            prune,
            auto,
            print_callset,
            thread,
            output,
        } => {
            let args = TrimArgs {
                trace,
                calls,
                frames,
                deps,
                prune,
                auto,
                print_callset,
                thread,
                output,
            };

            execute_trim(args)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
