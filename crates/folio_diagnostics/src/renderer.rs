//! Terminal rendering of diagnostics.

use crate::diagnostic::Diagnostic;
use crate::label::LabelStyle;
use folio_source::SourceDb;

/// Formats a diagnostic for some output target.
pub trait DiagnosticRenderer {
    /// Renders one diagnostic.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// rustc-style plain text:
///
/// ```text
/// error[E001]: unterminated string literal
///   --> docs/intro.py:4:5
///   |
/// 4 | s = "abc
///   |     ^ string starts here
/// ```
pub struct TerminalRenderer {
    /// Emit ANSI colors.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn header(&self, diag: &Diagnostic) -> String {
        let head = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return head;
        }
        let ansi = if diag.severity.is_error() { "31" } else { "33" };
        format!("\x1b[1;{ansi}m{head}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = format!("{}: {}\n", self.header(diag), diag.message);

        if !diag.primary_span.is_dummy() {
            let resolved = source_db.resolve_span(diag.primary_span);
            out.push_str(&format!("  --> {resolved}\n"));

            let file = source_db.get_file(diag.primary_span.file);
            let (line, col) = file.line_col(diag.primary_span.start);
            let line_num = line.to_string();
            let padding = " ".repeat(line_num.len());
            let line_content = source_line(&file.content, diag.primary_span.start);

            let span_len = diag.primary_span.len().max(1) as usize;
            let carets = "^".repeat(span_len);
            let col_padding = " ".repeat((col as usize).saturating_sub(1));
            let primary_msg = diag
                .labels
                .iter()
                .find(|l| l.style == LabelStyle::Primary)
                .map(|l| format!(" {}", l.message))
                .unwrap_or_default();

            out.push_str(&format!("{padding} |\n"));
            out.push_str(&format!("{line_num} | {line_content}\n"));
            out.push_str(&format!("{padding} | {col_padding}{carets}{primary_msg}\n"));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }
        out
    }
}

fn source_line(content: &str, byte_offset: u32) -> &str {
    let offset = (byte_offset as usize).min(content.len());
    let start = content[..offset].rfind('\n').map_or(0, |pos| pos + 1);
    let end = content[offset..]
        .find('\n')
        .map_or(content.len(), |pos| offset + pos);
    content[start..end].trim_end_matches('\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::DiagnosticCode;
    use crate::label::Label;
    use folio_source::Span;

    #[test]
    fn render_error_with_span() {
        let mut db = SourceDb::new();
        let id = db.add_source("intro.py", "x = 1\ns = \"abc\n".to_string());
        let span = Span::new(id, 10, 11);
        let diag = Diagnostic::error(DiagnosticCode::PARSE, "unterminated string literal", span)
            .with_label(Label::primary(span, "string starts here"));

        let out = TerminalRenderer::new(false).render(&diag, &db);
        assert!(out.contains("error[E001]: unterminated string literal"));
        assert!(out.contains("--> intro.py:2:5"));
        assert!(out.contains("2 | s = \"abc"));
        assert!(out.contains("|     ^ string starts here"));
    }

    #[test]
    fn render_without_span() {
        let db = SourceDb::new();
        let diag = Diagnostic::error(DiagnosticCode::IO, "cannot read notes.py", Span::DUMMY)
            .with_note("file not found");
        let out = TerminalRenderer::new(false).render(&diag, &db);
        assert!(out.starts_with("error[E002]: cannot read notes.py"));
        assert!(!out.contains("-->"));
        assert!(out.contains("= note: file not found"));
    }

    #[test]
    fn color_wraps_header() {
        let db = SourceDb::new();
        let diag = Diagnostic::warning(DiagnosticCode::UNTERMINATED_ESCAPE, "open", Span::DUMMY);
        let out = TerminalRenderer::new(true).render(&diag, &db);
        assert!(out.starts_with("\x1b[1;33mwarning[W001]\x1b[0m: open"));
    }
}
