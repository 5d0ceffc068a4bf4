//! Top-level statement parser.
//!
//! Groups tokens into logical lines, checks each line's syntax, and folds the
//! lines into top-level statements. An indentation stack tracks every open
//! block: a line after a `:` header must indent, and a dedent must land on a
//! column some enclosing block uses. At column 1, clause lines (`else`,
//! `elif`, `except`, `finally`) extend a compound statement and decorator
//! lines extend into the definition they decorate.

use crate::error::{ParseError, ParseErrorKind};
use crate::lexer;
use crate::statement::{Statement, StatementKind};
use crate::syntax;
use crate::token::{Token, TokenKind, AUGMENTED_ASSIGN};

/// Parses `source` into its top-level statements, in source order.
pub fn parse_statements(source: &str) -> Result<Vec<Statement>, ParseError> {
    let tokens = lexer::lex(source)?;
    let mut parser = StatementParser {
        source,
        statements: Vec::new(),
        open: None,
        indents: vec![1],
        block_pending: false,
    };
    for (line, end) in logical_lines(&tokens) {
        parser.feed(line, end)?;
    }
    let eof = tokens.last().copied().unwrap_or(Token {
        kind: TokenKind::Eof,
        start: 0,
        end: 0,
        line: 1,
        column: 1,
        depth: 0,
    });
    parser.finish(&eof)?;
    Ok(parser.statements)
}

/// Splits the token stream after each `Newline` or `Eof`. Yields the
/// non-empty lines together with the token that ends them.
fn logical_lines(tokens: &[Token]) -> impl Iterator<Item = (&[Token], &Token)> {
    tokens
        .split_inclusive(|t| matches!(t.kind, TokenKind::Newline | TokenKind::Eof))
        .filter_map(|chunk| match chunk.split_last() {
            Some((end, line)) if !line.is_empty() => Some((line, end)),
            _ => None,
        })
}

/// The top-level statement currently accepting continuation lines.
struct OpenStatement {
    kind: StatementKind,
    /// Only decorator lines have been seen so far.
    decorator_pending: bool,
}

struct StatementParser<'a> {
    source: &'a str,
    statements: Vec<Statement>,
    open: Option<OpenStatement>,
    /// Columns of the open blocks, outermost first. Never empty.
    indents: Vec<u32>,
    /// The previous line ended with `:` and needs an indented block.
    block_pending: bool,
}

impl StatementParser<'_> {
    fn feed(&mut self, line: &[Token], end: &Token) -> Result<(), ParseError> {
        let first = &line[0];
        let ends_with_colon = line
            .last()
            .is_some_and(|t| t.depth == 0 && t.is_op(self.source, ":"));

        self.indent(first)?;
        self.block_pending = ends_with_colon;
        syntax::check_line(line, end, self.source)?;

        if first.column > 1 {
            return Ok(());
        }

        if let Some(clause) = clause_keyword(first, self.source) {
            return match &self.open {
                Some(open) if accepts_clauses(open.kind) => Ok(()),
                _ => Err(ParseError::at(first, ParseErrorKind::DanglingClause(clause))),
            };
        }

        let is_decorator = first.is_op(self.source, "@");

        if self.open.as_ref().is_some_and(|o| o.decorator_pending) {
            if is_decorator {
                return Ok(());
            }
            let kind = classify(line, self.source, ends_with_colon);
            if !kind.is_definition() {
                return Err(ParseError::at(first, ParseErrorKind::DanglingDecorator));
            }
            if let Some(last) = self.statements.last_mut() {
                last.kind = kind;
            }
            self.open = Some(OpenStatement {
                kind,
                decorator_pending: false,
            });
            return Ok(());
        }

        let kind = if is_decorator {
            StatementKind::FunctionDef
        } else {
            classify(line, self.source, ends_with_colon)
        };
        self.statements.push(Statement::new(kind, first.line));
        self.open = Some(OpenStatement {
            kind,
            decorator_pending: is_decorator,
        });
        Ok(())
    }

    /// Moves the indentation stack to the column of `first`.
    fn indent(&mut self, first: &Token) -> Result<(), ParseError> {
        let column = first.column;
        let current = self.indents.last().copied().unwrap_or(1);
        if self.block_pending {
            if column <= current {
                return Err(ParseError::at(first, ParseErrorKind::ExpectedIndentedBlock));
            }
            self.indents.push(column);
            return Ok(());
        }
        if column > current {
            return Err(ParseError::at(first, ParseErrorKind::UnexpectedIndent));
        }
        while self.indents.last().is_some_and(|&open| open > column) {
            self.indents.pop();
        }
        if self.indents.last() != Some(&column) {
            return Err(ParseError::at(first, ParseErrorKind::InconsistentDedent));
        }
        Ok(())
    }

    fn finish(&self, eof: &Token) -> Result<(), ParseError> {
        if self.block_pending {
            return Err(ParseError::at(eof, ParseErrorKind::ExpectedIndentedBlock));
        }
        match &self.open {
            Some(open) if open.decorator_pending => {
                Err(ParseError::at(eof, ParseErrorKind::DanglingDecorator))
            }
            _ => Ok(()),
        }
    }
}

fn clause_keyword(token: &Token, source: &str) -> Option<&'static str> {
    if token.kind != TokenKind::Name {
        return None;
    }
    match token.text(source) {
        "else" => Some("else"),
        "elif" => Some("elif"),
        "except" => Some("except"),
        "finally" => Some("finally"),
        _ => None,
    }
}

fn accepts_clauses(kind: StatementKind) -> bool {
    matches!(
        kind,
        StatementKind::If
            | StatementKind::For
            | StatementKind::AsyncFor
            | StatementKind::While
            | StatementKind::Try
    )
}

/// Determines the node kind of a logical line that starts a statement.
fn classify(line: &[Token], source: &str, ends_with_colon: bool) -> StatementKind {
    let first = &line[0];
    if first.kind == TokenKind::Name {
        let word = first.text(source);
        if word == "async" {
            let next = line.get(1).filter(|t| t.kind == TokenKind::Name);
            match next.map(|t| t.text(source)) {
                Some("def") => return StatementKind::AsyncFunctionDef,
                Some("for") => return StatementKind::AsyncFor,
                Some("with") => return StatementKind::AsyncWith,
                _ => {}
            }
        }
        if word == "match" && syntax::is_match_header(line, source) {
            return StatementKind::Match;
        }
        if let Some(kind) = StatementKind::from_keyword(word) {
            return kind;
        }
    }
    classify_expression(line, source)
}

/// Finds the first depth-0 assignment-like operator.
fn classify_expression(line: &[Token], source: &str) -> StatementKind {
    let lambda = line[0].is_name(source, "lambda");
    for token in line.iter().filter(|t| t.depth == 0 && t.kind == TokenKind::Op) {
        match token.text(source) {
            "=" => return StatementKind::Assign,
            ":" if lambda => return StatementKind::Expr,
            ":" => return StatementKind::AnnAssign,
            op if AUGMENTED_ASSIGN.contains(&op) => return StatementKind::AugAssign,
            _ => {}
        }
    }
    StatementKind::Expr
}

#[cfg(test)]
mod tests {
    use super::*;
    use StatementKind::*;

    fn parse(source: &str) -> Vec<(StatementKind, u32)> {
        parse_statements(source)
            .unwrap()
            .into_iter()
            .map(|s| (s.kind, s.first_line))
            .collect()
    }

    fn parse_err(source: &str) -> ParseError {
        parse_statements(source).unwrap_err()
    }

    #[test]
    fn empty_and_comment_only() {
        assert!(parse("").is_empty());
        assert!(parse("# just words\n\n# more\n").is_empty());
    }

    #[test]
    fn simple_statements() {
        assert_eq!(parse("a=1\n# note\nb=2\n"), vec![(Assign, 1), (Assign, 3)]);
    }

    #[test]
    fn expression_kinds() {
        let src = "x += 1\ny: int = 2\nprint(y)\nf(a=1)\nd[k] = v\na == b\nlambda q: q\n";
        assert_eq!(
            parse(src),
            vec![
                (AugAssign, 1),
                (AnnAssign, 2),
                (Expr, 3),
                (Expr, 4),
                (Assign, 5),
                (Expr, 6),
                (Expr, 7)
            ]
        );
    }

    #[test]
    fn keyword_kinds() {
        let src = "import os\nfrom a import b\ndel x\nassert y\npass\nraise E\nglobal g\n";
        assert_eq!(
            parse(src),
            vec![
                (Import, 1),
                (ImportFrom, 2),
                (Delete, 3),
                (Assert, 4),
                (Pass, 5),
                (Raise, 6),
                (Global, 7)
            ]
        );
    }

    #[test]
    fn function_body_is_one_statement() {
        let src = "def f(x):\n    y = x\n\n    return y\nf(1)\n";
        assert_eq!(parse(src), vec![(FunctionDef, 1), (Expr, 5)]);
    }

    #[test]
    fn async_kinds() {
        let src = "async def f():\n    pass\nasync for x in y:\n    pass\nasync with a:\n    pass\n";
        assert_eq!(parse(src), vec![(AsyncFunctionDef, 1), (AsyncFor, 3), (AsyncWith, 5)]);
    }

    #[test]
    fn decorators_start_the_definition() {
        let src = "x = 1\n@cache\n@other(2)\ndef f():\n    return 1\n@dataclass\nclass C:\n    a: int\n";
        assert_eq!(parse(src), vec![(Assign, 1), (FunctionDef, 2), (ClassDef, 6)]);
    }

    #[test]
    fn clauses_extend_compound_statements() {
        let src = "if a:\n    x\nelif b:\n    y\nelse:\n    z\ntry:\n    p\nexcept E:\n    q\nfinally:\n    r\n";
        assert_eq!(parse(src), vec![(If, 1), (Try, 7)]);
    }

    #[test]
    fn one_line_compound_with_clause() {
        assert_eq!(parse("if a: x = 1\nelse: x = 2\ny\n"), vec![(If, 1), (Expr, 3)]);
    }

    #[test]
    fn match_statement_and_match_name() {
        let src = "match cmd:\n    case 1:\n        pass\nmatch = 3\n";
        assert_eq!(parse(src), vec![(Match, 1), (Assign, 4)]);
    }

    #[test]
    fn multiline_constructs_start_on_first_line() {
        let src = "x = [\n  1,\n]\ns = \"\"\"\ndoc\n\"\"\"\ny = 1 + \\\n  2\n";
        assert_eq!(parse(src), vec![(Assign, 1), (Assign, 4), (Assign, 7)]);
    }

    #[test]
    fn semicolons_share_one_boundary() {
        assert_eq!(parse("a = 1; b = 2\nc\n"), vec![(Assign, 1), (Expr, 2)]);
    }

    #[test]
    fn unexpected_indent_at_start() {
        let e = parse_err("  x = 1\n");
        assert_eq!(e.kind, ParseErrorKind::UnexpectedIndent);
        assert_eq!((e.line, e.column), (1, 3));
    }

    #[test]
    fn unexpected_indent_after_simple_statement() {
        let e = parse_err("x = 1\n    y = 2\n");
        assert_eq!(e.kind, ParseErrorKind::UnexpectedIndent);
        assert_eq!(e.line, 2);
    }

    #[test]
    fn expected_indented_block() {
        assert_eq!(parse_err("def f():\nx = 1\n").kind, ParseErrorKind::ExpectedIndentedBlock);
        let e = parse_err("x = 1\nwhile True:\n");
        assert_eq!(e.kind, ParseErrorKind::ExpectedIndentedBlock);
    }

    #[test]
    fn dangling_clause() {
        let e = parse_err("x = 1\nelse:\n    y\n");
        assert_eq!(e.kind, ParseErrorKind::DanglingClause("else"));
        assert_eq!(e.line, 2);
        assert_eq!(
            parse_err("def f():\n    pass\nexcept E:\n    pass\n").kind,
            ParseErrorKind::DanglingClause("except")
        );
    }

    #[test]
    fn dangling_decorator() {
        assert_eq!(parse_err("@dec\nx = 1\n").kind, ParseErrorKind::DanglingDecorator);
        assert_eq!(parse_err("@dec\n").kind, ParseErrorKind::DanglingDecorator);
    }

    #[test]
    fn inconsistent_dedent() {
        let e = parse_err("def f():\n    pass\n  x = 1\n");
        assert_eq!(e.kind, ParseErrorKind::InconsistentDedent);
        assert_eq!((e.line, e.column), (3, 3));
        assert_eq!(
            parse_err("if a:\n    if b:\n        x\n      y\n").kind,
            ParseErrorKind::InconsistentDedent
        );
    }

    #[test]
    fn nested_blocks_dedent_to_known_levels() {
        let src = "class A:\n    def f(self):\n        if x:\n            y\n    z = 1\nw\n";
        assert_eq!(parse(src), vec![(ClassDef, 1), (Expr, 6)]);
    }

    #[test]
    fn nested_header_needs_block() {
        let e = parse_err("def f():\n    if x:\n    y = 1\n");
        assert_eq!(e.kind, ParseErrorKind::ExpectedIndentedBlock);
        assert_eq!(e.line, 3);
    }

    #[test]
    fn malformed_lines_are_rejected() {
        let cases = [
            ("x = = 1\n", ParseErrorKind::InvalidSyntax),
            ("def\n", ParseErrorKind::Expected("a name")),
            ("1 +\n", ParseErrorKind::Expected("an expression")),
            ("import\n", ParseErrorKind::Expected("a name")),
            ("class :\n    pass\n", ParseErrorKind::Expected("a name")),
            ("for in:\n    pass\n", ParseErrorKind::InvalidSyntax),
            ("def f():\n    x = = 1\n", ParseErrorKind::InvalidSyntax),
        ];
        for (source, kind) in cases {
            assert_eq!(parse_err(source).kind, kind, "source {source:?}");
        }
    }

    #[test]
    fn lexer_errors_propagate() {
        assert_eq!(parse_err("x = (1,\n").kind, ParseErrorKind::UnclosedBracket('('));
    }
}
