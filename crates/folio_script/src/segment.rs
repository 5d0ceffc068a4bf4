//! Marker classification of raw segments into Code, Comment and Escape.

use crate::error::ParseError;
use crate::parser::parse_statements;
use crate::split::{split_source_with, RawKind, RawSegment, SourceSplitter};
use crate::statement::Statement;
use folio_config::{ScriptConfig, DEFAULT_COMMENT, DEFAULT_ESCAPE, DEFAULT_HEADER};
use folio_source::LineRange;
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// The markers that steer classification of gap lines.
#[derive(Debug, Clone)]
pub struct Markers {
    /// Literal prefix that turns a line into a single-line escape.
    pub header: Option<String>,
    /// Pattern that opens a multi-line escape run when it matches at the
    /// start of a line.
    pub escape: Regex,
    /// Pattern removed from a commentary line, at every match.
    pub comment: Regex,
}

impl Markers {
    /// Compiles a marker set from raw patterns.
    pub fn new(header: Option<&str>, escape: &str, comment: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            header: header.map(str::to_string),
            escape: Regex::new(escape)?,
            comment: Regex::new(comment)?,
        })
    }

    /// Builds the marker set described by a `[script]` config section.
    pub fn from_config(config: &ScriptConfig) -> Result<Self, regex::Error> {
        Self::new(config.header_marker(), &config.escape, &config.comment)
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::new(Some(DEFAULT_HEADER), DEFAULT_ESCAPE, DEFAULT_COMMENT)
            .expect("default marker patterns compile")
    }
}

/// Classification of an emitted segment.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum SegmentKind {
    /// Executable source, or a blank spacing line.
    Code,
    /// Prose with its comment marker removed.
    Comment,
    /// Verbatim passthrough content.
    Escape,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SegmentKind::Code => "Code",
            SegmentKind::Comment => "Comment",
            SegmentKind::Escape => "Escape",
        })
    }
}

/// A classified piece of source.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Segment<'a> {
    /// What the text is.
    pub kind: SegmentKind,
    /// Text without its final line terminator.
    pub text: Cow<'a, str>,
    /// Source lines the segment came from.
    pub lines: LineRange,
}

impl<'a> Segment<'a> {
    fn borrowed(kind: SegmentKind, text: &'a str, lines: LineRange) -> Self {
        Self {
            kind,
            text: Cow::Borrowed(text),
            lines,
        }
    }
}

/// An escape run that has been opened but not yet closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EscapeRun<'a> {
    /// Literal text a line must start with to close the run.
    pub marker: &'a str,
    /// Line that opened the run.
    pub opened_at: u32,
}

/// Parses `source` and returns the lazy segment stream.
pub fn splitter<'a>(source: &'a str, markers: &'a Markers) -> Result<Splitter<'a>, ParseError> {
    let statements = parse_statements(source)?;
    Ok(Splitter::with_statements(source, &statements, markers))
}

/// Single-pass iterator of classified [`Segment`]s.
pub struct Splitter<'a> {
    raw: SourceSplitter<'a>,
    markers: &'a Markers,
    escape_run: Option<EscapeRun<'a>>,
}

impl<'a> Splitter<'a> {
    /// Builds the stream from an already-parsed statement list.
    pub fn with_statements(source: &'a str, statements: &[Statement], markers: &'a Markers) -> Self {
        Self {
            raw: split_source_with(source, statements),
            markers,
            escape_run: None,
        }
    }

    /// The escape run still open, if any.
    ///
    /// Once iteration is finished this reports a run that reached the end of
    /// input without its closing line.
    pub fn unterminated_escape(&self) -> Option<EscapeRun<'a>> {
        self.escape_run
    }

    fn classify(&mut self, raw: RawSegment<'a>) -> Option<Segment<'a>> {
        let text = raw.trimmed();

        if let Some(run) = self.escape_run {
            if text.starts_with(run.marker) {
                self.escape_run = None;
            }
            return Some(Segment::borrowed(SegmentKind::Escape, text, raw.lines));
        }

        if !self.raw.has_statements() {
            return Some(Segment::borrowed(SegmentKind::Comment, text, raw.lines));
        }

        if text.trim().is_empty() {
            return Some(Segment::borrowed(SegmentKind::Code, "", raw.lines));
        }

        if raw.kind == RawKind::Code {
            return Some(Segment::borrowed(SegmentKind::Code, text, raw.lines));
        }

        if let Some(found) = self.markers.escape.find(text).filter(|m| m.start() == 0) {
            self.escape_run = Some(EscapeRun {
                marker: &text[found.start()..found.end()],
                opened_at: raw.lines.first,
            });
            return Some(Segment::borrowed(SegmentKind::Escape, text, raw.lines));
        }

        if let Some(header) = &self.markers.header {
            if text.starts_with(header.as_str()) {
                return Some(Segment::borrowed(SegmentKind::Escape, text, raw.lines));
            }
        }

        let stripped = self.markers.comment.replace_all(text, "");
        if stripped.is_empty() {
            return None;
        }
        Some(Segment {
            kind: SegmentKind::Comment,
            text: stripped,
            lines: raw.lines,
        })
    }
}

impl<'a> Iterator for Splitter<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = self.raw.next()?;
            if let Some(segment) = self.classify(raw) {
                return Some(segment);
            }
        }
    }
}
