//! Top-level statements.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The syntax-node kind of a top-level statement.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum StatementKind {
    /// `def`
    FunctionDef,
    /// `async def`
    AsyncFunctionDef,
    /// `class`
    ClassDef,
    /// `if`
    If,
    /// `for`
    For,
    /// `async for`
    AsyncFor,
    /// `while`
    While,
    /// `with`
    With,
    /// `async with`
    AsyncWith,
    /// `try`
    Try,
    /// `match`
    Match,
    /// `import`
    Import,
    /// `from ... import`
    ImportFrom,
    /// `return`
    Return,
    /// `del`
    Delete,
    /// `pass`
    Pass,
    /// `break`
    Break,
    /// `continue`
    Continue,
    /// `raise`
    Raise,
    /// `global`
    Global,
    /// `nonlocal`
    Nonlocal,
    /// `assert`
    Assert,
    /// `a = b`
    Assign,
    /// `a += b`
    AugAssign,
    /// `a: T = b`
    AnnAssign,
    /// Any other expression.
    Expr,
}

impl StatementKind {
    /// The node name, e.g. `"FunctionDef"`.
    pub fn name(self) -> &'static str {
        match self {
            StatementKind::FunctionDef => "FunctionDef",
            StatementKind::AsyncFunctionDef => "AsyncFunctionDef",
            StatementKind::ClassDef => "ClassDef",
            StatementKind::If => "If",
            StatementKind::For => "For",
            StatementKind::AsyncFor => "AsyncFor",
            StatementKind::While => "While",
            StatementKind::With => "With",
            StatementKind::AsyncWith => "AsyncWith",
            StatementKind::Try => "Try",
            StatementKind::Match => "Match",
            StatementKind::Import => "Import",
            StatementKind::ImportFrom => "ImportFrom",
            StatementKind::Return => "Return",
            StatementKind::Delete => "Delete",
            StatementKind::Pass => "Pass",
            StatementKind::Break => "Break",
            StatementKind::Continue => "Continue",
            StatementKind::Raise => "Raise",
            StatementKind::Global => "Global",
            StatementKind::Nonlocal => "Nonlocal",
            StatementKind::Assert => "Assert",
            StatementKind::Assign => "Assign",
            StatementKind::AugAssign => "AugAssign",
            StatementKind::AnnAssign => "AnnAssign",
            StatementKind::Expr => "Expr",
        }
    }

    /// Kind introduced by a leading keyword, if `word` is one.
    ///
    /// `async` and `match` need more context and are handled by the parser.
    pub(crate) fn from_keyword(word: &str) -> Option<Self> {
        let kind = match word {
            "def" => StatementKind::FunctionDef,
            "class" => StatementKind::ClassDef,
            "if" => StatementKind::If,
            "for" => StatementKind::For,
            "while" => StatementKind::While,
            "with" => StatementKind::With,
            "try" => StatementKind::Try,
            "import" => StatementKind::Import,
            "from" => StatementKind::ImportFrom,
            "return" => StatementKind::Return,
            "del" => StatementKind::Delete,
            "pass" => StatementKind::Pass,
            "break" => StatementKind::Break,
            "continue" => StatementKind::Continue,
            "raise" => StatementKind::Raise,
            "global" => StatementKind::Global,
            "nonlocal" => StatementKind::Nonlocal,
            "assert" => StatementKind::Assert,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns `true` for `def`/`class` kinds, the only valid decorator targets.
    pub fn is_definition(self) -> bool {
        matches!(
            self,
            StatementKind::FunctionDef | StatementKind::AsyncFunctionDef | StatementKind::ClassDef
        )
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A top-level statement and the 1-indexed line it starts on.
///
/// Decorated definitions start at their first decorator line.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Statement {
    /// Node kind.
    pub kind: StatementKind,
    /// First line (1-indexed).
    pub first_line: u32,
}

impl Statement {
    /// Creates a statement.
    pub fn new(kind: StatementKind, first_line: u32) -> Self {
        Self { kind, first_line }
    }
}

/// A statement with the last line of its body, as computed by the splitter.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Boundary {
    /// Node kind.
    pub kind: StatementKind,
    /// First line (1-indexed).
    pub first_line: u32,
    /// Last line of the body (1-indexed, inclusive).
    pub last_line: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_display() {
        assert_eq!(StatementKind::ImportFrom.name(), "ImportFrom");
        assert_eq!(StatementKind::AugAssign.to_string(), "AugAssign");
    }

    #[test]
    fn keyword_lookup() {
        assert_eq!(StatementKind::from_keyword("def"), Some(StatementKind::FunctionDef));
        assert_eq!(StatementKind::from_keyword("from"), Some(StatementKind::ImportFrom));
        assert_eq!(StatementKind::from_keyword("async"), None);
        assert_eq!(StatementKind::from_keyword("print"), None);
    }

    #[test]
    fn definitions() {
        assert!(StatementKind::ClassDef.is_definition());
        assert!(StatementKind::AsyncFunctionDef.is_definition());
        assert!(!StatementKind::If.is_definition());
    }

    #[test]
    fn serde_roundtrip() {
        let s = Statement::new(StatementKind::Assign, 3);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"kind":"Assign","first_line":3}"#);
        assert_eq!(serde_json::from_str::<Statement>(&json).unwrap(), s);
    }
}
