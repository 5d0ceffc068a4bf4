//! Token types for the Python-style lexer.
//!
//! Token text is not stored; it is sliced from the source with
//! [`Token::text`].

use serde::{Deserialize, Serialize};

/// A token kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum TokenKind {
    /// Identifier or keyword.
    Name,
    /// Numeric literal.
    Number,
    /// String literal, prefix and quotes included.
    String,
    /// Operator or delimiter other than a bracket.
    Op,
    /// `(`, `[` or `{`.
    Open,
    /// `)`, `]` or `}`.
    Close,
    /// End of a logical line.
    Newline,
    /// End of input.
    Eof,
}

/// A lexed token.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Token {
    /// Kind.
    pub kind: TokenKind,
    /// Byte offset of the first byte.
    pub start: u32,
    /// Byte offset one past the last byte.
    pub end: u32,
    /// 1-indexed line the token starts on.
    pub line: u32,
    /// 1-indexed byte column the token starts at.
    pub column: u32,
    /// Bracket nesting depth. Brackets carry the depth outside themselves,
    /// so an opener and its closer share a depth.
    pub depth: u32,
}

impl Token {
    /// Source text of the token.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start as usize..self.end as usize]
    }

    /// Returns `true` if this is the name `word`.
    pub fn is_name(&self, source: &str, word: &str) -> bool {
        self.kind == TokenKind::Name && self.text(source) == word
    }

    /// Returns `true` if this is the operator `op`.
    pub fn is_op(&self, source: &str, op: &str) -> bool {
        self.kind == TokenKind::Op && self.text(source) == op
    }
}

/// Operators, longest first so the lexer can match greedily.
pub(crate) const OPERATORS: &[&str] = &[
    "**=", "//=", ">>=", "<<=", "...", "==", "!=", "<=", ">=", "+=", "-=", "*=", "/=", "%=",
    "&=", "|=", "^=", "@=", "->", "**", "//", "<<", ">>", ":=", "+", "-", "*", "/", "%", "@",
    "&", "|", "^", "~", "<", ">", "=", ".", ",", ":", ";", "!",
];

/// Augmented assignment operators.
pub(crate) const AUGMENTED_ASSIGN: &[&str] = &[
    "+=", "-=", "*=", "/=", "//=", "%=", "@=", "&=", "|=", "^=", ">>=", "<<=", "**=",
];

/// String prefixes accepted before a quote (case-insensitive).
pub(crate) fn is_string_prefix(word: &str) -> bool {
    matches!(
        word.to_ascii_lowercase().as_str(),
        "r" | "u" | "b" | "f" | "br" | "rb" | "fr" | "rf"
    )
}

/// The closing bracket for an opener.
pub(crate) fn closing_for(open: u8) -> u8 {
    match open {
        b'(' => b')',
        b'[' => b']',
        _ => b'}',
    }
}
