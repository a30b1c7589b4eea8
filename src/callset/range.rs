//! Single ranges of the call-set language and their token syntax.

use crate::trace::CallFlags;
use crate::utils::error::CallSetError;
use std::fmt;

/// One `start[-[stop]][/step][/frame]` term of a call set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallRange {
    pub start: u64,
    /// `None` means no upper limit
    pub stop: Option<u64>,
    pub step: u64,
    /// Only match calls that end a frame
    pub frame_only: bool,
}

impl CallRange {
    pub fn single(n: u64) -> Self {
        Self::new(n, Some(n))
    }

    pub fn new(start: u64, stop: Option<u64>) -> Self {
        Self {
            start,
            stop,
            step: 1,
            frame_only: false,
        }
    }

    /// Everything from zero on
    pub fn everything() -> Self {
        Self::new(0, None)
    }

    pub fn frame_only(mut self) -> Self {
        self.frame_only = true;
        self
    }

    /// Membership ignoring the frame restriction
    pub fn contains(&self, n: u64) -> bool {
        n >= self.start
            && self.stop.map_or(true, |stop| n <= stop)
            && (n - self.start) % self.step == 0
    }

    pub fn contains_with_flags(&self, n: u64, flags: CallFlags) -> bool {
        self.contains(n) && (!self.frame_only || flags.end_frame)
    }

    /// Parse one token such as `12`, `3-9`, `40-`, `*`, `0-100/10` or `*/frame`
    pub fn parse_token(token: &str) -> Result<Self, CallSetError> {
        let invalid = || CallSetError::InvalidRangeSyntax(token.to_string());

        let mut parts = token.split('/');
        let body = parts.next().unwrap_or_default();

        let mut range = if body == "*" {
            Self::everything()
        } else if let Some((start, stop)) = body.split_once('-') {
            let start = parse_number(start).ok_or_else(invalid)?;
            let stop = if stop.is_empty() {
                None
            } else {
                Some(parse_number(stop).ok_or_else(invalid)?)
            };
            if stop.is_some_and(|stop| stop < start) {
                return Err(invalid());
            }
            Self::new(start, stop)
        } else {
            Self::single(parse_number(body).ok_or_else(invalid)?)
        };

        let mut seen_step = false;
        for suffix in parts {
            if suffix == "frame" && !range.frame_only {
                range.frame_only = true;
            } else if !seen_step {
                let step = parse_number(suffix).ok_or_else(invalid)?;
                if step == 0 {
                    return Err(invalid());
                }
                range.step = step;
                seen_step = true;
            } else {
                return Err(invalid());
            }
        }

        Ok(range)
    }
}

/// Digits only; signs and whitespace are rejected
fn parse_number(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl fmt::Display for CallRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stop {
            None if self.start == 0 => write!(f, "*")?,
            None => write!(f, "{}-", self.start)?,
            Some(stop) if stop == self.start => write!(f, "{}", self.start)?,
            Some(stop) => write!(f, "{}-{}", self.start, stop)?,
        }
        if self.step > 1 {
            write!(f, "/{}", self.step)?;
        }
        if self.frame_only {
            write!(f, "/frame")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single() {
        assert_eq!(CallRange::parse_token("42").unwrap(), CallRange::single(42));
    }

    #[test]
    fn test_parse_bounded_and_open() {
        assert_eq!(
            CallRange::parse_token("3-9").unwrap(),
            CallRange::new(3, Some(9))
        );
        assert_eq!(CallRange::parse_token("40-").unwrap(), CallRange::new(40, None));
        assert_eq!(CallRange::parse_token("*").unwrap(), CallRange::everything());
    }

    #[test]
    fn test_parse_suffixes() {
        let range = CallRange::parse_token("0-100/10/frame").unwrap();
        assert_eq!(range.step, 10);
        assert!(range.frame_only);

        assert!(range.contains(30));
        assert!(!range.contains(31));
        assert!(!range.contains_with_flags(30, CallFlags::default()));
        assert!(range.contains_with_flags(30, CallFlags::END_FRAME));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for token in ["", "-", "-5", "a", "1-b", "9-3", "+4", "1/0", "1/x", "1/2/3", "1-2-3"] {
            assert!(
                matches!(
                    CallRange::parse_token(token),
                    Err(CallSetError::InvalidRangeSyntax(_))
                ),
                "token {:?} should be rejected",
                token
            );
        }
    }

    #[test]
    fn test_display_is_canonical() {
        for token in ["7", "3-9", "40-", "*", "0-100/10", "5-/frame"] {
            assert_eq!(CallRange::parse_token(token).unwrap().to_string(), token);
        }
    }
}
