//! Line separator detection.

use serde::{Deserialize, Serialize};

/// The line separator convention of an artifact.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Newline {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl Newline {
    /// Detects the convention from the first line break in `source`.
    ///
    /// Sources without any line break use [`Newline::Lf`].
    pub fn detect(source: &str) -> Self {
        match source.find('\n') {
            Some(idx) if idx > 0 && source.as_bytes()[idx - 1] == b'\r' => Newline::CrLf,
            _ => Newline::Lf,
        }
    }

    /// The separator text.
    pub fn as_str(self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
        }
    }
}

/// Strips one trailing line terminator (`\n` or `\r\n`) from `line`.
pub fn trim_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
