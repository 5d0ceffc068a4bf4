//! Spans resolved to `path:line:col`.

use std::fmt;
use std::path::PathBuf;

/// A span resolved to 1-indexed line/column coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpan {
    /// Path of the artifact.
    pub file_path: PathBuf,
    /// Starting line.
    pub start_line: u32,
    /// Starting column.
    pub start_col: u32,
    /// Ending line.
    pub end_line: u32,
    /// Ending column.
    pub end_col: u32,
}

impl fmt::Display for ResolvedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.file_path.display(),
            self.start_line,
            self.start_col
        )
    }
}
