//! Compact textual summary of emitted call numbers.
//!
//! Consecutive numbers collapse into `first-last`; runs are comma
//! separated, e.g. `5-7,10-11,15`. The output is valid call-set syntax,
//! so it can be fed back through `--calls`.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallRangeSummary {
    runs: Vec<(u64, u64)>,
}

impl CallRangeSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the next emitted call; numbers must arrive in increasing order
    pub fn push(&mut self, no: u64) {
        if let Some((_, last)) = self.runs.last_mut() {
            if last.checked_add(1) == Some(no) {
                *last = no;
                return;
            }
        }
        self.runs.push((no, no));
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

impl FromIterator<u64> for CallRangeSummary {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut summary = Self::new();
        for no in iter {
            summary.push(no);
        }
        summary
    }
}

impl fmt::Display for CallRangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &(first, last)) in self.runs.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            if first == last {
                write!(f, "{}", first)?;
            } else {
                write!(f, "{}-{}", first, last)?;
            }
        }
        Ok(())
    }
}
