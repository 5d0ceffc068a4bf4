//! Byte ranges inside an artifact.

use crate::file_id::FileId;
use serde::{Deserialize, Serialize};

/// A half-open byte range `start..end` inside one artifact.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// The artifact this span points into.
    pub file: FileId,
    /// First byte (inclusive).
    pub start: u32,
    /// One past the last byte.
    pub end: u32,
}

impl Span {
    /// A span with no source location.
    pub const DUMMY: Span = Span {
        file: FileId::DUMMY,
        start: 0,
        end: 0,
    };

    /// Creates a span.
    pub fn new(file: FileId, start: u32, end: u32) -> Self {
        Self { file, start, end }
    }

    /// Length in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns `true` for zero-length spans.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if this is [`Span::DUMMY`].
    pub fn is_dummy(&self) -> bool {
        self.file == FileId::DUMMY
    }
}
