//! Artifact text with a physical-line index.

use crate::file_id::FileId;
use crate::line_range::LineRange;
use crate::newline::{trim_terminator, Newline};
use folio_common::ContentHash;
use std::path::PathBuf;

/// One artifact loaded into the [`SourceDb`](crate::SourceDb).
///
/// Physical lines follow `str::lines` semantics: a trailing line break ends the
/// last line and does not open an empty one.
pub struct SourceFile {
    /// Index inside the owning database.
    pub id: FileId,
    /// Filesystem path, or a synthetic name for in-memory sources.
    pub path: PathBuf,
    /// Full text.
    pub content: String,
    /// Detected line separator.
    pub newline: Newline,
    /// Hash of `content`.
    pub content_hash: ContentHash,
    /// Byte offset where each physical line starts.
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Indexes `content`.
    pub fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let line_starts = compute_line_starts(&content);
        let newline = Newline::detect(&content);
        let content_hash = ContentHash::of_source(&content);
        Self {
            id,
            path,
            content,
            newline,
            content_hash,
            line_starts,
        }
    }

    /// The stable key the run cache uses for this artifact.
    pub fn artifact_key(&self) -> String {
        self.path.display().to_string()
    }

    /// Number of physical lines.
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Text of 1-indexed `line` without its terminator.
    ///
    /// # Panics
    ///
    /// Panics if `line` is out of range.
    pub fn line_text(&self, line: u32) -> &str {
        trim_terminator(self.lines_slice(LineRange::single(line)))
    }

    /// Exact source slice covering `range`, terminators included.
    pub fn lines_slice(&self, range: LineRange) -> &str {
        let start = self.line_starts[(range.first - 1) as usize] as usize;
        let end = self
            .line_starts
            .get(range.last as usize)
            .map_or(self.content.len(), |&s| s as usize);
        &self.content[start..end]
    }

    /// Converts a byte offset to 1-indexed `(line, column)`.
    pub fn line_col(&self, byte_offset: u32) -> (u32, u32) {
        if self.line_starts.is_empty() {
            return (1, byte_offset + 1);
        }
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line = (line_idx as u32) + 1;
        let col = byte_offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// Byte offset where 1-indexed `line` starts, clamped to the end of content.
    pub fn line_start(&self, line: u32) -> u32 {
        self.line_starts
            .get(line.saturating_sub(1) as usize)
            .copied()
            .unwrap_or(self.content.len() as u32)
    }

    /// Substring between two byte offsets.
    pub fn snippet(&self, start: u32, end: u32) -> &str {
        &self.content[start as usize..end as usize]
    }
}

fn compute_line_starts(content: &str) -> Vec<u32> {
    let mut starts = Vec::new();
    let mut offset = 0u32;
    for line in content.split_inclusive('\n') {
        starts.push(offset);
        offset += line.len() as u32;
    }
    starts
}
