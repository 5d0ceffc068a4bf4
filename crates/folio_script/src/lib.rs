//! Splitting of Python-style source into Code, Comment and Escape segments.
//!
//! The source is first parsed into top-level statements, then partitioned
//! into statement bodies and gap lines ([`split_source`]), and finally each
//! raw piece is classified against a set of [`Markers`] ([`splitter`]).
//!
//! # Architecture
//!
//! - **Lexer** ([`lexer`]): tokens with bracket depth, line and column.
//! - **Parser** ([`parser`]): checks each logical line's syntax and folds the
//!   lines into top-level [`Statement`]s.
//! - **Split** ([`split`]): backward scan for body ends and the lossless raw
//!   partition.
//! - **Segment** ([`segment`]): marker classification and escape runs.

#![warn(missing_docs)]

/// Parse errors with line and column.
pub mod error;
/// Lexical analyzer for Python-style source text.
pub mod lexer;
/// Top-level statement parser.
pub mod parser;
/// Classified segment stream.
pub mod segment;
/// Raw partition into statement bodies and gap lines.
pub mod split;
/// Statement kinds and boundaries.
pub mod statement;
mod syntax;
/// Token types for the lexer.
pub mod token;

pub use error::{ParseError, ParseErrorKind};
pub use parser::parse_statements;
pub use segment::{splitter, EscapeRun, Markers, Segment, SegmentKind, Splitter};
pub use split::{compute_boundaries, split_source, split_source_with, RawKind, RawSegment, SourceSplitter};
pub use statement::{Boundary, Statement, StatementKind};

/// Parses `source` and returns every statement with its body's line span.
pub fn statement_boundaries(source: &str) -> Result<Vec<Boundary>, ParseError> {
    let statements = parse_statements(source)?;
    let lines: Vec<&str> = source.split_inclusive('\n').collect();
    Ok(compute_boundaries(&lines, &statements))
}
