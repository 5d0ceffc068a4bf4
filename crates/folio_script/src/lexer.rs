//! Lexical analyzer for Python-style source text.
//!
//! Produces just enough structure to find logical lines: names, numbers,
//! strings (single, double, and triple quoted, with prefixes), operators, and
//! brackets. Comments and whitespace are skipped. A [`TokenKind::Newline`] is
//! emitted at the end of every logical line that holds at least one token;
//! line breaks inside brackets, triple-quoted strings, or after a backslash
//! continuation do not end the logical line.

use crate::error::{ParseError, ParseErrorKind};
use crate::token::{closing_for, is_string_prefix, Token, TokenKind, OPERATORS};

/// Lexes `source`. The result always ends with a [`TokenKind::Eof`] token.
pub fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer {
        source: source.as_bytes(),
        text: source,
        pos: 0,
        line: 1,
        line_start: 0,
        brackets: Vec::new(),
        tokens: Vec::new(),
    };
    lexer.lex_all()?;
    Ok(lexer.tokens)
}

/// An open bracket and where it was opened.
struct OpenBracket {
    byte: u8,
    offset: usize,
    line: u32,
    column: u32,
}

struct Lexer<'a> {
    source: &'a [u8],
    text: &'a str,
    pos: usize,
    line: u32,
    line_start: usize,
    brackets: Vec<OpenBracket>,
    tokens: Vec<Token>,
}

impl Lexer<'_> {
    fn lex_all(&mut self) -> Result<(), ParseError> {
        loop {
            self.skip_blanks();
            if self.at_end() {
                break;
            }
            let b = self.peek();
            match b {
                b'#' => self.skip_comment(),
                b'\\' => self.lex_continuation()?,
                b'\n' => self.lex_line_break(1),
                b'\r' if self.peek_at(1) == b'\n' => self.lex_line_break(2),
                b'\r' => self.pos += 1,
                _ => self.lex_token()?,
            }
        }
        if let Some(open) = self.brackets.first() {
            return Err(ParseError {
                kind: ParseErrorKind::UnclosedBracket(open.byte as char),
                line: open.line,
                column: open.column,
                offset: open.offset as u32,
            });
        }
        self.end_logical_line();
        let end = self.pos as u32;
        let column = self.column();
        self.tokens.push(Token {
            kind: TokenKind::Eof,
            start: end,
            end,
            line: self.line,
            column,
            depth: 0,
        });
        Ok(())
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        self.source.get(self.pos + offset).copied().unwrap_or(0)
    }

    fn column(&self) -> u32 {
        (self.pos - self.line_start) as u32 + 1
    }

    fn error_here(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            kind,
            line: self.line,
            column: self.column(),
            offset: self.pos as u32,
        }
    }

    /// Consumes a line break of `len` bytes at `pos`.
    fn newline(&mut self, len: usize) {
        self.pos += len;
        self.line += 1;
        self.line_start = self.pos;
    }

    fn skip_blanks(&mut self) {
        while matches!(self.peek(), b' ' | b'\t' | b'\x0c') {
            self.pos += 1;
        }
    }

    fn skip_comment(&mut self) {
        while !self.at_end() && !matches!(self.peek(), b'\n' | b'\r') {
            self.pos += 1;
        }
    }

    fn lex_continuation(&mut self) -> Result<(), ParseError> {
        match (self.peek_at(1), self.peek_at(2)) {
            (b'\n', _) => {
                self.pos += 1;
                self.newline(1);
                Ok(())
            }
            (b'\r', b'\n') => {
                self.pos += 1;
                self.newline(2);
                Ok(())
            }
            _ if self.pos + 1 >= self.source.len() => {
                Err(self.error_here(ParseErrorKind::ContinuationAtEof))
            }
            _ => Err(self.error_here(ParseErrorKind::UnexpectedCharacter('\\'))),
        }
    }

    fn lex_line_break(&mut self, len: usize) {
        if self.brackets.is_empty() {
            self.end_logical_line();
        }
        self.newline(len);
    }

    /// Emits a `Newline` unless the current logical line is empty.
    fn end_logical_line(&mut self) {
        let open = self
            .tokens
            .last()
            .is_some_and(|t| t.kind != TokenKind::Newline);
        if open {
            let at = self.pos as u32;
            let column = self.column();
            self.tokens.push(Token {
                kind: TokenKind::Newline,
                start: at,
                end: at,
                line: self.line,
                column,
                depth: 0,
            });
        }
    }

    fn lex_token(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let line = self.line;
        let column = self.column();
        let mut depth = self.brackets.len() as u32;
        let b = self.peek();

        let kind = if is_ident_start(b) {
            self.lex_name();
            let word = &self.text[start..self.pos];
            if matches!(self.peek(), b'\'' | b'"') && is_string_prefix(word) {
                self.lex_string(start)?;
                TokenKind::String
            } else {
                TokenKind::Name
            }
        } else if b.is_ascii_digit() || (b == b'.' && self.peek_at(1).is_ascii_digit()) {
            self.lex_number();
            TokenKind::Number
        } else if b == b'\'' || b == b'"' {
            self.lex_string(start)?;
            TokenKind::String
        } else if matches!(b, b'(' | b'[' | b'{') {
            self.brackets.push(OpenBracket {
                byte: b,
                offset: start,
                line,
                column,
            });
            self.pos += 1;
            TokenKind::Open
        } else if matches!(b, b')' | b']' | b'}') {
            self.close_bracket(b)?;
            depth = self.brackets.len() as u32;
            self.pos += 1;
            TokenKind::Close
        } else {
            self.lex_operator()?;
            TokenKind::Op
        };

        self.tokens.push(Token {
            kind,
            start: start as u32,
            end: self.pos as u32,
            line,
            column,
            depth,
        });
        Ok(())
    }

    fn lex_name(&mut self) {
        while !self.at_end() && is_ident_char(self.peek()) {
            self.pos += 1;
        }
    }

    fn lex_number(&mut self) {
        let hex = self.peek() == b'0' && matches!(self.peek_at(1), b'x' | b'X');
        while !self.at_end() {
            let b = self.peek();
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'.' {
                self.pos += 1;
            } else if matches!(b, b'+' | b'-')
                && !hex
                && matches!(self.source[self.pos - 1], b'e' | b'E')
            {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Lexes a string whose quote starts at `pos`; `start` is where the
    /// prefix (if any) began.
    fn lex_string(&mut self, start: usize) -> Result<(), ParseError> {
        let quote = self.peek();
        let triple = self.peek_at(1) == quote && self.peek_at(2) == quote;
        let open_line = self.line;
        let open_column = (start - self.line_start) as u32 + 1;
        let unterminated = ParseError {
            kind: ParseErrorKind::UnterminatedString,
            line: open_line,
            column: open_column,
            offset: start as u32,
        };

        self.pos += if triple { 3 } else { 1 };
        loop {
            if self.at_end() {
                return Err(unterminated);
            }
            match self.peek() {
                b'\\' => match (self.peek_at(1), self.peek_at(2)) {
                    (b'\n', _) => {
                        self.pos += 1;
                        self.newline(1);
                    }
                    (b'\r', b'\n') => {
                        self.pos += 1;
                        self.newline(2);
                    }
                    _ => self.pos += 2,
                },
                b'\n' if triple => self.newline(1),
                b'\r' if triple && self.peek_at(1) == b'\n' => self.newline(2),
                b'\n' | b'\r' => return Err(unterminated),
                b if b == quote => {
                    if !triple {
                        self.pos += 1;
                        return Ok(());
                    }
                    if self.peek_at(1) == quote && self.peek_at(2) == quote {
                        self.pos += 3;
                        return Ok(());
                    }
                    self.pos += 1;
                }
                _ => self.pos += 1,
            }
        }
    }

    fn close_bracket(&mut self, found: u8) -> Result<(), ParseError> {
        let Some(open) = self.brackets.pop() else {
            return Err(self.error_here(ParseErrorKind::UnmatchedBracket(found as char)));
        };
        if closing_for(open.byte) != found {
            return Err(self.error_here(ParseErrorKind::MismatchedBracket {
                open: open.byte as char,
                found: found as char,
            }));
        }
        Ok(())
    }

    fn lex_operator(&mut self) -> Result<(), ParseError> {
        let rest = &self.source[self.pos..];
        match OPERATORS.iter().find(|op| rest.starts_with(op.as_bytes())) {
            Some(op) => {
                self.pos += op.len();
                Ok(())
            }
            None => {
                let ch = self.text[self.pos..].chars().next().unwrap_or('\0');
                Err(self.error_here(ParseErrorKind::UnexpectedCharacter(ch)))
            }
        }
    }
}

/// Non-ASCII bytes are accepted so that Unicode identifiers lex as names.
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_ident_char(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}
