//! Source artifacts, line indexing, and source locations for diagnostics.
//!
//! The [`SourceDb`] owns every loaded artifact. A [`SourceFile`] keeps the
//! artifact text with precomputed line starts, its detected [`Newline`]
//! convention, and the content hash. [`Span`] and [`LineRange`] point back into
//! that text; [`ResolvedSpan`] is the human-readable form.

#![warn(missing_docs)]

pub mod file_id;
pub mod line_range;
pub mod newline;
pub mod resolved_span;
pub mod source_db;
pub mod source_file;
pub mod span;

pub use file_id::FileId;
pub use line_range::LineRange;
pub use newline::Newline;
pub use resolved_span::ResolvedSpan;
pub use source_db::SourceDb;
pub use source_file::SourceFile;
pub use span::Span;
