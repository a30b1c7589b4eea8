use crate::callset::CallSet;
use crate::trim::TrimOptions;
use crate::utils::config::ALL_THREADS;
use crate::utils::error::CallSetError;
use std::path::PathBuf;

/// Arguments for the trim command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct TrimArgs {
    /// Trace file to trim
    pub trace: PathBuf,

    /// `--calls` call-set text
    pub calls: Option<String>,

    /// `--frames` call-set text
    pub frames: Option<String>,

    /// Include dependencies of selected calls
    pub deps: bool,

    /// Omit calls with no side effects
    pub prune: bool,

    /// Shorthand for deps + prune
    pub auto: bool,

    /// Print the resulting call set to stdout
    pub print_callset: bool,

    /// Thread to keep (`-1` = all threads)
    pub thread: i64,

    /// Output trace path (derived from the input when absent)
    pub output: Option<PathBuf>,
}

impl Default for TrimArgs {
    fn default() -> Self {
        Self {
            trace: PathBuf::new(),
            calls: None,
            frames: None,
            deps: false,
            prune: false,
            auto: false,
            print_callset: false,
            thread: ALL_THREADS,
            output: None,
        }
    }
}

impl TrimArgs {
    /// Build the run options, parsing both call sets
    ///
    /// # Errors
    /// * `CallSetError::InvalidRangeSyntax` - malformed `--calls` or `--frames`
    /// * `CallSetError::ReadFailed` - unreadable `@FILE`
    pub fn to_options(&self) -> Result<TrimOptions, CallSetError> {
        let parse = |text: &Option<String>| match text {
            Some(text) => CallSet::parse(text),
            None => Ok(CallSet::none()),
        };

        let mut options = TrimOptions::new(parse(&self.calls)?, parse(&self.frames)?);
        options.dependency_analysis = self.deps || self.auto;
        options.prune_uninteresting = self.prune || self.auto;
        options.thread = u32::try_from(self.thread).ok();
        options.output = self.output.clone();
        options.print_callset = self.print_callset;

        Ok(options)
    }
}
