//! Diagnostic codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Code category, shown as a one-letter prefix.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// `E`: the artifact could not be processed.
    Error,
    /// `W`: suspicious input that was still processed.
    Warning,
}

impl Category {
    /// The prefix letter.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
        }
    }
}

/// A category plus a number, displayed as e.g. `E001`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// Category of the code.
    pub category: Category,
    /// Number within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Source text could not be split into statements.
    pub const PARSE: DiagnosticCode = DiagnosticCode::new(Category::Error, 1);
    /// An artifact could not be read.
    pub const IO: DiagnosticCode = DiagnosticCode::new(Category::Error, 2);
    /// An escape run was still open at end of input.
    pub const UNTERMINATED_ESCAPE: DiagnosticCode = DiagnosticCode::new(Category::Warning, 1);

    /// Creates a code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_pads_number() {
        assert_eq!(DiagnosticCode::PARSE.to_string(), "E001");
        assert_eq!(DiagnosticCode::UNTERMINATED_ESCAPE.to_string(), "W001");
        assert_eq!(DiagnosticCode::new(Category::Error, 42).to_string(), "E042");
    }

    #[test]
    fn serde_roundtrip() {
        let json = serde_json::to_string(&DiagnosticCode::IO).unwrap();
        let back: DiagnosticCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DiagnosticCode::IO);
    }
}
