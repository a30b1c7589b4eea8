//! Trace output writer.
//!
//! Appends calls to a JSON Lines file in the order they are given.
//! Calls are never renumbered.

use super::call::Call;
use crate::utils::error::WriterError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Destination for trimmed calls
pub trait CallSink {
    fn write_call(&mut self, call: &Call) -> Result<(), WriterError>;
}

impl CallSink for Vec<Call> {
    fn write_call(&mut self, call: &Call) -> Result<(), WriterError> {
        self.push(call.clone());
        Ok(())
    }
}

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), WriterError> {
    if path.as_os_str().is_empty() {
        return Err(WriterError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(WriterError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Writes calls to a trace file
///
/// **Public** - main entry point for trace output
#[derive(Debug)]
pub struct TraceWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    written: u64,
}

impl TraceWriter {
    /// Create (or truncate) the output trace
    ///
    /// # Errors
    /// * `WriterError::InvalidPath` - empty path or a directory
    /// * `WriterError::Create` - parent directory or file cannot be created
    pub fn create(output_path: impl AsRef<Path>) -> Result<Self, WriterError> {
        let output_path = output_path.as_ref();

        validate_path(output_path)?;

        // Create parent directories if needed
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating parent directories: {}", parent.display());
                std::fs::create_dir_all(parent).map_err(|source| WriterError::Create {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let file = File::create(output_path).map_err(|source| WriterError::Create {
            path: output_path.to_path_buf(),
            source,
        })?;

        info!("Writing trimmed trace to: {}", output_path.display());

        Ok(Self {
            path: output_path.to_path_buf(),
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    /// Flush buffered output and close the file
    pub fn finish(mut self) -> Result<u64, WriterError> {
        self.writer.flush()?;
        debug!("Wrote {} calls to {}", self.written, self.path.display());
        Ok(self.written)
    }
}

impl CallSink for TraceWriter {
    fn write_call(&mut self, call: &Call) -> Result<(), WriterError> {
        serde_json::to_writer(&mut self.writer, call)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_output_path_empty() {
        assert!(validate_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_writer_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("nested/dirs/out.trace");

        let mut writer = TraceWriter::create(&nested).unwrap();
        writer.write_call(&Call::new(0, 0, "glFlush")).unwrap();
        assert_eq!(writer.finish().unwrap(), 1);

        let contents = std::fs::read_to_string(&nested).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }
}
