use crate::utils::config::{TRACE_EXTENSION, TRIM_SUFFIX};
use std::path::{Path, PathBuf};

/// Default output path for a trimmed trace
///
/// Strips the input's extension and appends `-trim.trace`, keeping the
/// input's directory: `captures/frame.trace` -> `captures/frame-trim.trace`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_default();
    name.push(TRIM_SUFFIX);
    name.push(".");
    name.push(TRACE_EXTENSION);

    input.with_file_name(name)
}

/// Display version information
pub fn display_version() {
    println!("Trace Trim v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Create a new trace by trimming an existing trace.");
}
