//! Inclusive ranges of physical lines.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive, 1-indexed range of physical lines.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct LineRange {
    /// First line (1-indexed).
    pub first: u32,
    /// Last line (1-indexed, inclusive).
    pub last: u32,
}

impl LineRange {
    /// Creates a range covering `first..=last`.
    ///
    /// # Panics
    ///
    /// Panics if `first` is 0 or `last < first`.
    pub fn new(first: u32, last: u32) -> Self {
        assert!(first >= 1, "line numbers are 1-indexed");
        assert!(last >= first, "line range {first}..={last} is reversed");
        Self { first, last }
    }

    /// A range covering exactly one line.
    pub fn single(line: u32) -> Self {
        Self::new(line, line)
    }

    /// Number of lines covered.
    pub fn len(&self) -> u32 {
        self.last - self.first + 1
    }

    /// Always `false`; a range covers at least one line.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if `line` falls inside the range.
    pub fn contains(&self, line: u32) -> bool {
        (self.first..=self.last).contains(&line)
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first == self.last {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{}-{}", self.first, self.last)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line() {
        let r = LineRange::single(4);
        assert_eq!(r.len(), 1);
        assert!(r.contains(4));
        assert!(!r.contains(5));
        assert_eq!(r.to_string(), "4");
    }

    #[test]
    fn multi_line() {
        let r = LineRange::new(2, 5);
        assert_eq!(r.len(), 4);
        assert!(r.contains(2) && r.contains(5));
        assert_eq!(r.to_string(), "2-5");
    }

    #[test]
    #[should_panic(expected = "reversed")]
    fn reversed_panics() {
        LineRange::new(5, 2);
    }

    #[test]
    #[should_panic(expected = "1-indexed")]
    fn zero_panics() {
        LineRange::new(0, 2);
    }
}
