//! Call-set selection language.
//!
//! A [`CallSet`] is a union of ranges over call numbers or frame numbers:
//!
//! ```text
//! 12          a single call
//! 3-9         3 through 9 inclusive
//! 40-         40 and everything after
//! *           everything
//! 0-100/10    every 10th call from 0 to 100
//! */frame     every call that ends a frame
//! @calls.txt  the same syntax, read from a file
//! ```
//!
//! Terms are separated by commas or whitespace. Besides membership a set
//! exposes an upper [`Bound`], which the trimmer uses to stop reading a
//! trace once nothing further can match.

pub mod range;

pub use range::CallRange;

use crate::trace::{Call, CallFlags};
use crate::utils::error::CallSetError;
use log::debug;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Upper limit of a call set, used as a scan-termination bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The set matches nothing
    Empty,
    /// Nothing above this value matches
    Finite(u64),
    /// Matches arbitrarily large values
    Unbounded,
}

impl Bound {
    /// Whether `n` lies beyond everything the set can match
    pub fn is_exceeded_by(self, n: u64) -> bool {
        match self {
            Bound::Empty => true,
            Bound::Finite(last) => n > last,
            Bound::Unbounded => false,
        }
    }
}

/// Keyword sets used as defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    /// Match nothing
    None,
    /// Match calls that end a frame
    Frame,
    /// Match everything
    All,
}

/// A set of call (or frame) numbers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallSet {
    ranges: Vec<CallRange>,
}

impl CallSet {
    pub fn all() -> Self {
        Self::from(Frequency::All)
    }

    pub fn none() -> Self {
        Self::from(Frequency::None)
    }

    /// Parse call-set syntax
    ///
    /// **Public** - used for `--calls` and `--frames`
    ///
    /// # Errors
    /// * `CallSetError::InvalidRangeSyntax` - a term is malformed
    /// * `CallSetError::ReadFailed` - an `@FILE` argument cannot be read
    pub fn parse(text: &str) -> Result<Self, CallSetError> {
        let text = text.trim();

        if let Some(path) = text.strip_prefix('@') {
            return Self::from_file(path);
        }

        Self::parse_terms(text)
    }

    /// Read a call set from a file; `#` starts a comment running to end of line
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CallSetError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CallSetError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Reading call set from {}", path.display());

        let mut set = CallSet::none();
        for line in contents.lines() {
            let line = line.split('#').next().unwrap_or_default();
            set.ranges.extend(Self::parse_terms(line)?.ranges);
        }
        Ok(set)
    }

    fn parse_terms(text: &str) -> Result<Self, CallSetError> {
        let ranges = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(CallRange::parse_token)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &[CallRange] {
        &self.ranges
    }

    /// True for a set built from no ranges
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn contains(&self, n: u64) -> bool {
        self.ranges.iter().any(|range| range.contains(n))
    }

    /// Frame-aware membership: `/frame` ranges also require `end_frame`
    pub fn contains_with_flags(&self, n: u64, flags: CallFlags) -> bool {
        self.ranges
            .iter()
            .any(|range| range.contains_with_flags(n, flags))
    }

    pub fn contains_call(&self, call: &Call) -> bool {
        self.contains_with_flags(call.no, call.flags)
    }

    pub fn first(&self) -> Option<u64> {
        self.ranges.iter().map(|range| range.start).min()
    }

    pub fn last(&self) -> Bound {
        let mut bound = Bound::Empty;
        for range in &self.ranges {
            bound = match (bound, range.stop) {
                (_, None) => return Bound::Unbounded,
                (Bound::Finite(last), Some(stop)) => Bound::Finite(last.max(stop)),
                (_, Some(stop)) => Bound::Finite(stop),
            };
        }
        bound
    }
}

impl From<Frequency> for CallSet {
    fn from(frequency: Frequency) -> Self {
        let ranges = match frequency {
            Frequency::None => Vec::new(),
            Frequency::Frame => vec![CallRange::everything().frame_only()],
            Frequency::All => vec![CallRange::everything()],
        };
        Self { ranges }
    }
}

impl FromStr for CallSet {
    type Err = CallSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CallSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", range)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_none() {
        let set = CallSet::parse("  ").unwrap();
        assert!(set.is_empty());
        assert_eq!(set.last(), Bound::Empty);
        assert_eq!(set, CallSet::none());
    }

    #[test]
    fn test_last_is_max_stop() {
        let set = CallSet::parse("10-12,3,7-8").unwrap();
        assert_eq!(set.last(), Bound::Finite(12));
        assert_eq!(set.first(), Some(3));
    }

    #[test]
    fn test_last_unbounded() {
        let set = CallSet::parse("1-2,50-").unwrap();
        assert_eq!(set.last(), Bound::Unbounded);
    }

    #[test]
    fn test_bound_comparisons() {
        assert!(Bound::Empty.is_exceeded_by(0));
        assert!(!Bound::Finite(5).is_exceeded_by(5));
        assert!(Bound::Finite(5).is_exceeded_by(6));
        assert!(!Bound::Unbounded.is_exceeded_by(u64::MAX));
    }

    #[test]
    fn test_whitespace_and_commas_separate_terms() {
        let set = CallSet::parse("1, 3\t5-6").unwrap();
        assert_eq!(set.ranges().len(), 3);
        assert_eq!(set.to_string(), "1,3,5-6");
    }

    #[test]
    fn test_frequency_frame_requires_flag() {
        let set = CallSet::from(Frequency::Frame);
        assert!(!set.contains_with_flags(9, CallFlags::default()));
        assert!(set.contains_with_flags(9, CallFlags::END_FRAME));
        assert_eq!(set.last(), Bound::Unbounded);
    }
}
