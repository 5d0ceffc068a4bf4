//! Owner of every artifact loaded during a build.

use crate::file_id::FileId;
use crate::resolved_span::ResolvedSpan;
use crate::source_file::SourceFile;
use crate::span::Span;
use std::io;
use std::path::{Path, PathBuf};

/// Owns artifact text and resolves [`Span`]s for diagnostics.
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Reads an artifact from disk.
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.add_source(path, content))
    }

    /// Adds an in-memory artifact; `name` is used as its path.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(id, name.into(), content));
        id
    }

    /// Returns the artifact for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this database.
    pub fn get_file(&self, id: FileId) -> &SourceFile {
        &self.files[id.as_raw() as usize]
    }

    /// Iterates over all loaded artifacts in load order.
    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter()
    }

    /// Resolves `span` to line/column coordinates.
    pub fn resolve_span(&self, span: Span) -> ResolvedSpan {
        let file = self.get_file(span.file);
        let (start_line, start_col) = file.line_col(span.start);
        let (end_line, end_col) = file.line_col(span.end.saturating_sub(1).max(span.start));
        ResolvedSpan {
            file_path: file.path.clone(),
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Source text covered by `span`.
    pub fn snippet(&self, span: Span) -> &str {
        self.get_file(span.file).snippet(span.start, span.end)
    }
}

impl Default for SourceDb {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_get() {
        let mut db = SourceDb::new();
        let id = db.add_source("a.py", "x = 1\n".to_string());
        assert_eq!(db.get_file(id).content, "x = 1\n");
        assert_eq!(db.files().count(), 1);
    }

    #[test]
    fn resolve_span_on_second_line() {
        let mut db = SourceDb::new();
        let id = db.add_source("a.py", "x = 1\ny = (\n".to_string());
        let resolved = db.resolve_span(Span::new(id, 10, 11));
        assert_eq!(resolved.start_line, 2);
        assert_eq!(resolved.start_col, 5);
        assert_eq!(resolved.to_string(), "a.py:2:5");
    }

    #[test]
    fn snippet() {
        let mut db = SourceDb::new();
        let id = db.add_source("a.py", "hello world".to_string());
        assert_eq!(db.snippet(Span::new(id, 6, 11)), "world");
    }

    #[test]
    fn load_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.py");
        std::fs::write(&path, "# title\n").unwrap();

        let mut db = SourceDb::new();
        let id = db.load_file(&path).unwrap();
        assert_eq!(db.get_file(id).content, "# title\n");
        assert_eq!(db.get_file(id).path, path);
    }

    #[test]
    fn load_missing_file_errors() {
        let mut db = SourceDb::new();
        assert!(db.load_file(Path::new("/nonexistent/doc.py")).is_err());
    }
}
