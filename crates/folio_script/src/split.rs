//! Partitioning of source text into statement bodies and gap lines.
//!
//! Every physical line lands in exactly one [`RawSegment`], and each raw
//! segment's text is an exact slice of the source with its line terminators,
//! so concatenating the stream reproduces the source byte for byte.

use crate::error::ParseError;
use crate::parser::parse_statements;
use crate::statement::{Boundary, Statement};
use folio_source::newline::trim_terminator;
use folio_source::LineRange;
use serde::Serialize;

/// Whether a raw segment is a statement body or a gap line.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum RawKind {
    /// Lines `first_line..=last_line` of one statement.
    Code,
    /// A single line outside every statement body.
    Comment,
}

/// One unclassified piece of the partition.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct RawSegment<'a> {
    /// Body or gap line.
    pub kind: RawKind,
    /// Exact source slice, terminators included.
    pub text: &'a str,
    /// Lines covered.
    pub lines: LineRange,
}

impl<'a> RawSegment<'a> {
    /// The text without its final line terminator.
    pub fn trimmed(&self) -> &'a str {
        trim_terminator(self.text)
    }
}

/// Parses `source` and partitions it.
pub fn split_source(source: &str) -> Result<SourceSplitter<'_>, ParseError> {
    let statements = parse_statements(source)?;
    Ok(split_source_with(source, &statements))
}

/// Partitions `source` using an already-parsed statement list.
///
/// Statements are sorted by first line; duplicates and lines past the end of
/// the source are ignored.
pub fn split_source_with<'a>(source: &'a str, statements: &[Statement]) -> SourceSplitter<'a> {
    let lines: Vec<&str> = source.split_inclusive('\n').collect();
    let boundaries = compute_boundaries(&lines, statements);
    let mut line_starts = Vec::with_capacity(lines.len() + 1);
    let mut offset = 0;
    for line in &lines {
        line_starts.push(offset);
        offset += line.len();
    }
    line_starts.push(source.len());

    let mut boundaries = boundaries.into_iter();
    SourceSplitter {
        source,
        has_statements: boundaries.len() > 0,
        next_boundary: boundaries.next(),
        boundaries,
        line_starts,
        cursor: 1,
    }
}

/// Computes each statement's last body line.
///
/// A body ends at the last line before the next statement (or the end of
/// input) that is neither blank nor an unindented `#` comment, so trailing
/// commentary belongs to the gap that follows the body.
pub fn compute_boundaries(lines: &[&str], statements: &[Statement]) -> Vec<Boundary> {
    let line_count = lines.len() as u32;
    let mut sorted: Vec<Statement> = statements
        .iter()
        .copied()
        .filter(|s| s.first_line >= 1 && s.first_line <= line_count)
        .collect();
    sorted.sort_by_key(|s| s.first_line);
    sorted.dedup_by_key(|s| s.first_line);

    let scan_starts = sorted
        .iter()
        .skip(1)
        .map(|next| next.first_line - 1)
        .chain(std::iter::once(line_count));

    sorted
        .iter()
        .zip(scan_starts)
        .map(|(stmt, scan_from)| Boundary {
            kind: stmt.kind,
            first_line: stmt.first_line,
            last_line: last_body_line(lines, scan_from, stmt.first_line),
        })
        .collect()
}

fn last_body_line(lines: &[&str], from: u32, floor: u32) -> u32 {
    let mut line = from;
    while line > floor && !is_body_line(lines[(line - 1) as usize]) {
        line -= 1;
    }
    line
}

fn is_body_line(line: &str) -> bool {
    let text = trim_terminator(line);
    !text.trim().is_empty() && !text.starts_with('#')
}

/// Lazy, single-pass iterator over the partition of one source.
pub struct SourceSplitter<'a> {
    source: &'a str,
    /// Byte offset of each line start, plus the source length.
    line_starts: Vec<usize>,
    boundaries: std::vec::IntoIter<Boundary>,
    next_boundary: Option<Boundary>,
    /// Next 1-indexed line to emit.
    cursor: u32,
    has_statements: bool,
}

impl<'a> SourceSplitter<'a> {
    /// Returns `false` when the source holds no statements at all.
    pub fn has_statements(&self) -> bool {
        self.has_statements
    }

    fn line_count(&self) -> u32 {
        (self.line_starts.len() - 1) as u32
    }

    fn slice(&self, range: LineRange) -> &'a str {
        let start = self.line_starts[(range.first - 1) as usize];
        let end = self.line_starts[range.last as usize];
        &self.source[start..end]
    }

    fn emit(&mut self, kind: RawKind, range: LineRange) -> RawSegment<'a> {
        self.cursor = range.last + 1;
        RawSegment {
            kind,
            text: self.slice(range),
            lines: range,
        }
    }
}

impl<'a> Iterator for SourceSplitter<'a> {
    type Item = RawSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor > self.line_count() {
            return None;
        }
        match self.next_boundary {
            Some(b) if b.first_line == self.cursor => {
                self.next_boundary = self.boundaries.next();
                Some(self.emit(RawKind::Code, LineRange::new(b.first_line, b.last_line)))
            }
            _ => Some(self.emit(RawKind::Comment, LineRange::single(self.cursor))),
        }
    }
}
