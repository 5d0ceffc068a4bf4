//! Parse errors for Python-style source.

use crate::token::Token;
use folio_diagnostics::{Diagnostic, DiagnosticCode, Label};
use folio_source::{FileId, Span};

/// What went wrong while finding statement boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// A string literal was still open at a line break or end of input.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// A bracket was still open at end of input.
    #[error("'{0}' was never closed")]
    UnclosedBracket(char),
    /// A closing bracket with no opener.
    #[error("unmatched '{0}'")]
    UnmatchedBracket(char),
    /// A closing bracket of the wrong shape.
    #[error("closing '{found}' does not match opening '{open}'")]
    MismatchedBracket {
        /// The bracket that is open.
        open: char,
        /// The bracket that was found.
        found: char,
    },
    /// A byte that cannot start any token.
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    /// A backslash continuation with nothing after it.
    #[error("unexpected end of input after line continuation")]
    ContinuationAtEof,
    /// An indented line where no block is open.
    #[error("unexpected indent")]
    UnexpectedIndent,
    /// A block header (`...:`) followed by no indented body.
    #[error("expected an indented block")]
    ExpectedIndentedBlock,
    /// `else`/`elif`/`except`/`finally` with no block before it.
    #[error("'{0}' without a preceding block")]
    DanglingClause(&'static str),
    /// A decorator followed by something other than `def`/`class`.
    #[error("decorator is not followed by a definition")]
    DanglingDecorator,
    /// A dedent to a column that no enclosing block uses.
    #[error("unindent does not match any outer indentation level")]
    InconsistentDedent,
    /// A token that cannot appear where it was found.
    #[error("invalid syntax")]
    InvalidSyntax,
    /// A required token or construct is missing.
    #[error("expected {0}")]
    Expected(&'static str),
    /// Assignment, deletion or loop target that is not assignable.
    #[error("cannot assign to this expression")]
    InvalidTarget,
}

/// A fatal parse failure. No segments are produced for the source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} (line {line}, column {column})")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// 1-indexed line.
    pub line: u32,
    /// 1-indexed byte column.
    pub column: u32,
    /// Byte offset into the source.
    pub offset: u32,
}

impl ParseError {
    /// An error located at the start of `token`.
    pub(crate) fn at(token: &Token, kind: ParseErrorKind) -> Self {
        Self {
            kind,
            line: token.line,
            column: token.column,
            offset: token.start,
        }
    }

    /// Converts into a diagnostic pointing into `file`.
    pub fn to_diagnostic(&self, file: FileId) -> Diagnostic {
        let span = Span::new(file, self.offset, self.offset + 1);
        Diagnostic::error(DiagnosticCode::PARSE, self.kind.to_string(), span)
            .with_label(Label::primary(span, "here"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_position() {
        let err = ParseError {
            kind: ParseErrorKind::UnclosedBracket('('),
            line: 3,
            column: 5,
            offset: 20,
        };
        assert_eq!(err.to_string(), "'(' was never closed (line 3, column 5)");
    }

    #[test]
    fn kind_messages() {
        assert_eq!(
            ParseErrorKind::MismatchedBracket { open: '[', found: ')' }.to_string(),
            "closing ')' does not match opening '['"
        );
        assert_eq!(
            ParseErrorKind::DanglingClause("elif").to_string(),
            "'elif' without a preceding block"
        );
        assert_eq!(ParseErrorKind::Expected("':'").to_string(), "expected ':'");
        assert_eq!(
            ParseErrorKind::InconsistentDedent.to_string(),
            "unindent does not match any outer indentation level"
        );
    }

    #[test]
    fn diagnostic_points_at_offset() {
        let err = ParseError {
            kind: ParseErrorKind::UnexpectedIndent,
            line: 2,
            column: 1,
            offset: 6,
        };
        let diag = err.to_diagnostic(FileId::from_raw(0));
        assert_eq!(diag.code, DiagnosticCode::PARSE);
        assert_eq!(diag.message, "unexpected indent");
        assert_eq!(diag.primary_span.start, 6);
        assert_eq!(diag.labels.len(), 1);
    }
}
