//! Sequential, bookmarkable reading of call traces.
//!
//! The trimmer reads a trace twice, so every source can hand out a
//! [`Bookmark`] and later rewind to it.

use super::call::Call;
use crate::utils::error::ParseError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Saved read position of a call source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bookmark {
    /// Byte offset for files, record index for in-memory sources
    offset: u64,
    /// Line number of the next record (1-based)
    line: u64,
    /// Last call number handed out before this position
    last_no: Option<u64>,
}

impl Bookmark {
    /// Position of the first record
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            last_no: None,
        }
    }
}

impl Default for Bookmark {
    fn default() -> Self {
        Self::start()
    }
}

/// A rewindable stream of calls in sequence order
pub trait CallSource {
    /// Read the next call, or `None` at end of stream
    fn parse_call(&mut self) -> Result<Option<Call>, ParseError>;

    /// Current read position
    fn bookmark(&self) -> Bookmark;

    /// Rewind (or fast-forward) to a previously captured position
    fn set_bookmark(&mut self, bookmark: Bookmark) -> Result<(), ParseError>;
}

/// Tracks the strictly-increasing call number invariant
fn check_order(last_no: &mut Option<u64>, call: &Call) -> Result<(), ParseError> {
    if let Some(previous) = *last_no {
        if call.no <= previous {
            return Err(ParseError::OutOfOrder {
                previous,
                found: call.no,
            });
        }
    }
    *last_no = Some(call.no);
    Ok(())
}

/// Reads a JSON Lines trace file
///
/// **Public** - main entry point for reading traces from disk
#[derive(Debug)]
pub struct TraceParser {
    path: PathBuf,
    reader: BufReader<File>,
    len: u64,
    position: Bookmark,
    buf: String,
}

impl TraceParser {
    /// Open a trace file for reading
    ///
    /// # Errors
    /// * `ParseError::Open` - file missing or unreadable
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();

        let open_err = |source| ParseError::Open {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(open_err)?;
        let len = file.metadata().map_err(open_err)?.len();

        info!("Opened trace: {} ({} bytes)", path.display(), len);

        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            len,
            position: Bookmark::start(),
            buf: String::new(),
        })
    }
}

impl CallSource for TraceParser {
    fn parse_call(&mut self) -> Result<Option<Call>, ParseError> {
        loop {
            self.buf.clear();
            let read = self.reader.read_line(&mut self.buf)?;
            if read == 0 {
                return Ok(None);
            }

            let line = self.position.line;
            self.position.offset += read as u64;
            self.position.line += 1;

            let record = self.buf.trim();
            if record.is_empty() {
                continue;
            }

            let call: Call = serde_json::from_str(record)
                .map_err(|source| ParseError::Json { line, source })?;
            check_order(&mut self.position.last_no, &call)?;

            return Ok(Some(call));
        }
    }

    fn bookmark(&self) -> Bookmark {
        self.position
    }

    fn set_bookmark(&mut self, bookmark: Bookmark) -> Result<(), ParseError> {
        if bookmark.offset > self.len {
            return Err(ParseError::InvalidBookmark(bookmark.offset));
        }

        debug!(
            "Rewinding {} to byte {} (line {})",
            self.path.display(),
            bookmark.offset,
            bookmark.line
        );

        self.reader.seek(SeekFrom::Start(bookmark.offset))?;
        self.position = bookmark;
        Ok(())
    }
}

/// Call source backed by a vector, for tests and library callers that
/// already hold the calls in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    calls: Vec<Call>,
    position: Bookmark,
}

impl MemorySource {
    pub fn new(calls: Vec<Call>) -> Self {
        Self {
            calls,
            position: Bookmark::start(),
        }
    }
}

impl CallSource for MemorySource {
    fn parse_call(&mut self) -> Result<Option<Call>, ParseError> {
        let Some(call) = self.calls.get(self.position.offset as usize) else {
            return Ok(None);
        };

        check_order(&mut self.position.last_no, call)?;
        self.position.offset += 1;
        self.position.line += 1;

        Ok(Some(call.clone()))
    }

    fn bookmark(&self) -> Bookmark {
        self.position
    }

    fn set_bookmark(&mut self, bookmark: Bookmark) -> Result<(), ParseError> {
        if bookmark.offset > self.calls.len() as u64 {
            return Err(ParseError::InvalidBookmark(bookmark.offset));
        }
        self.position = bookmark;
        Ok(())
    }
}
