//! Syntax check of one logical line.
//!
//! A recursive-descent pass over the line's tokens that follows the Python
//! grammar for statements, clause headers and expressions. It also rejects
//! assignment to things that cannot be assigned. Block structure and
//! indentation belong to the statement parser; each line is checked on its
//! own.

use crate::error::{ParseError, ParseErrorKind};
use crate::token::{Token, TokenKind, AUGMENTED_ASSIGN};

/// Reserved words that can never be used as names.
const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Comparison operators spelled with symbols.
const COMPARISONS: &[&str] = &["==", "!=", "<", ">", "<=", ">="];

/// Binary operators below comparison, loosest first.
const BINARY_LEVELS: &[&[&str]] = &[
    &["|"],
    &["^"],
    &["&"],
    &["<<", ">>"],
    &["+", "-"],
    &["*", "/", "//", "%", "@"],
];

/// Operators that can begin an expression.
const PREFIX_OPERATORS: &[&str] = &["-", "+", "~", "*", "**", "..."];

/// Checks a logical line. `end` is the `Newline` or `Eof` token after it.
pub(crate) fn check_line(line: &[Token], end: &Token, source: &str) -> Result<(), ParseError> {
    LineParser {
        tokens: line,
        end,
        source,
        pos: 0,
        in_pattern: false,
    }
    .logical_line()
}

/// Returns `true` when `line` is a `match` header rather than a statement
/// using `match` as a name.
pub(crate) fn is_match_header(line: &[Token], source: &str) -> bool {
    line.first().is_some_and(|t| t.is_name(source, "match"))
        && line.get(1).is_some_and(|t| starts_pattern(t, source))
        && line.last().is_some_and(|t| t.depth == 0 && t.is_op(source, ":"))
}

fn is_case_header(line: &[Token], source: &str) -> bool {
    line.first().is_some_and(|t| t.is_name(source, "case"))
        && line.get(1).is_some_and(|t| starts_pattern(t, source))
        && line[1..].iter().any(|t| t.depth == 0 && t.is_op(source, ":"))
}

fn starts_pattern(token: &Token, source: &str) -> bool {
    token.kind != TokenKind::Op || matches!(token.text(source), "-" | "*")
}

/// What an expression denotes, as far as assignment cares.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Form {
    /// A bare name.
    Name,
    /// Attribute reference or subscription.
    Member,
    /// Tuple or list whose items are all targets.
    Sequence,
    /// `*x` inside a sequence.
    Starred,
    /// Anything else.
    Value,
}

impl Form {
    fn assignable(self) -> bool {
        matches!(self, Form::Name | Form::Member | Form::Sequence)
    }

    fn single(self) -> bool {
        matches!(self, Form::Name | Form::Member)
    }

    fn sequence_item(self) -> bool {
        self.assignable() || self == Form::Starred
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Params {
    Def,
    Lambda,
}

type Check<T = ()> = Result<T, ParseError>;

struct LineParser<'a> {
    tokens: &'a [Token],
    end: &'a Token,
    source: &'a str,
    pos: usize,
    /// Parsing `case` patterns, where items may carry `as name`.
    in_pattern: bool,
}

impl<'a> LineParser<'a> {
    // --- token access ---

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + n)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn current(&self) -> &'a Token {
        self.peek().unwrap_or(self.end)
    }

    fn text(&self, token: &Token) -> &'a str {
        token.text(self.source)
    }

    fn at_op(&self, op: &str) -> bool {
        self.peek().is_some_and(|t| t.is_op(self.source, op))
    }

    fn at_op_in(&self, ops: &[&str]) -> bool {
        self.peek()
            .is_some_and(|t| t.kind == TokenKind::Op && ops.contains(&self.text(t)))
    }

    fn at_kw(&self, word: &str) -> bool {
        self.peek().is_some_and(|t| t.is_name(self.source, word))
    }

    fn at_open(&self, bracket: &str) -> bool {
        self.peek()
            .is_some_and(|t| t.kind == TokenKind::Open && self.text(t) == bracket)
    }

    fn at_close(&self) -> bool {
        self.peek().is_some_and(|t| t.kind == TokenKind::Close)
    }

    fn at_identifier(&self) -> bool {
        self.peek()
            .is_some_and(|t| t.kind == TokenKind::Name && !KEYWORDS.contains(&self.text(t)))
    }

    fn at_comprehension(&self) -> bool {
        self.at_kw("for")
            || (self.at_kw("async") && self.peek_at(1).is_some_and(|t| t.is_name(self.source, "for")))
    }

    /// No further item can follow a trailing comma here.
    fn at_sequence_end(&self) -> bool {
        match self.peek() {
            None => true,
            Some(t) => match t.kind {
                TokenKind::Close => true,
                TokenKind::Op => !PREFIX_OPERATORS.contains(&self.text(t)),
                TokenKind::Name => self.at_kw("in"),
                _ => false,
            },
        }
    }

    fn at_statement_end(&self) -> bool {
        self.at_end() || self.at_op(";")
    }

    fn eat_op(&mut self, op: &str) -> bool {
        let found = self.at_op(op);
        if found {
            self.pos += 1;
        }
        found
    }

    fn eat_kw(&mut self, word: &str) -> bool {
        let found = self.at_kw(word);
        if found {
            self.pos += 1;
        }
        found
    }

    fn expect_op(&mut self, op: &'static str, what: &'static str) -> Check {
        if self.eat_op(op) {
            Ok(())
        } else {
            Err(self.expected(what))
        }
    }

    fn expect_kw(&mut self, word: &'static str, what: &'static str) -> Check {
        if self.eat_kw(word) {
            Ok(())
        } else {
            Err(self.expected(what))
        }
    }

    fn expect_close(&mut self) -> Check {
        if self.at_close() {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn identifier(&mut self) -> Check {
        if self.at_identifier() {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.expected("a name"))
        }
    }

    fn unexpected(&self) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::at(token, ParseErrorKind::InvalidSyntax),
            None => self.expected("an expression"),
        }
    }

    fn expected(&self, what: &'static str) -> ParseError {
        ParseError::at(self.current(), ParseErrorKind::Expected(what))
    }

    fn finish(&self) -> Check {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(ParseError::at(token, ParseErrorKind::InvalidSyntax)),
        }
    }

    fn require(start: &Token, form: Form, valid: fn(Form) -> bool) -> Check {
        if valid(form) {
            Ok(())
        } else {
            Err(ParseError::at(start, ParseErrorKind::InvalidTarget))
        }
    }

    // --- statements ---

    fn logical_line(&mut self) -> Check {
        let first = self.current();
        if first.is_op(self.source, "@") {
            self.pos += 1;
            self.named_expression()?;
            return self.finish();
        }
        if first.kind != TokenKind::Name {
            return self.simple_statements();
        }
        match self.text(first) {
            "if" | "elif" | "while" => {
                self.pos += 1;
                self.named_expression()?;
                self.block()
            }
            "else" | "try" | "finally" => {
                self.pos += 1;
                self.block()
            }
            "except" => {
                self.pos += 1;
                self.except_header()
            }
            "for" => {
                self.pos += 1;
                self.for_header()
            }
            "with" => {
                self.pos += 1;
                self.with_header()
            }
            "def" => {
                self.pos += 1;
                self.def_header()
            }
            "class" => {
                self.pos += 1;
                self.class_header()
            }
            "async" => {
                self.pos += 1;
                match self.peek().map(|t| self.text(t)) {
                    Some("def") => {
                        self.pos += 1;
                        self.def_header()
                    }
                    Some("for") => {
                        self.pos += 1;
                        self.for_header()
                    }
                    Some("with") => {
                        self.pos += 1;
                        self.with_header()
                    }
                    _ => Err(self.expected("'def', 'for' or 'with'")),
                }
            }
            "match" if is_match_header(self.tokens, self.source) => {
                self.pos += 1;
                self.subject()?;
                self.block()
            }
            "case" if is_case_header(self.tokens, self.source) => {
                self.pos += 1;
                self.case_patterns()?;
                if self.eat_kw("if") {
                    self.named_expression()?;
                }
                self.block()
            }
            "type" if self.type_alias_ahead() => {
                self.pos += 1;
                self.type_alias()
            }
            _ => self.simple_statements(),
        }
    }

    /// The `:` closing a header, then an optional one-line body.
    fn block(&mut self) -> Check {
        self.expect_op(":", "':'")?;
        if self.at_end() {
            return Ok(());
        }
        self.simple_statements()
    }

    fn simple_statements(&mut self) -> Check {
        loop {
            self.simple_statement()?;
            if !self.eat_op(";") || self.at_end() {
                break;
            }
        }
        self.finish()
    }

    fn simple_statement(&mut self) -> Check {
        let word = match self.peek() {
            Some(t) if t.kind == TokenKind::Name => self.text(t),
            _ => "",
        };
        match word {
            "pass" | "break" | "continue" => {
                self.pos += 1;
                Ok(())
            }
            "return" => {
                self.pos += 1;
                if !self.at_statement_end() {
                    self.star_expressions()?;
                }
                Ok(())
            }
            "raise" => {
                self.pos += 1;
                if !self.at_statement_end() {
                    self.expression()?;
                    if self.eat_kw("from") {
                        self.expression()?;
                    }
                }
                Ok(())
            }
            "global" | "nonlocal" => {
                self.pos += 1;
                self.identifier()?;
                while self.eat_op(",") {
                    self.identifier()?;
                }
                Ok(())
            }
            "del" => {
                self.pos += 1;
                let start = self.current();
                let form = self.star_expressions()?;
                Self::require(start, form, Form::assignable)
            }
            "assert" => {
                self.pos += 1;
                self.expression()?;
                if self.eat_op(",") {
                    self.expression()?;
                }
                Ok(())
            }
            "import" => {
                self.pos += 1;
                self.import_names()
            }
            "from" => {
                self.pos += 1;
                self.import_from()
            }
            _ => self.expression_statement(),
        }
    }

    fn expression_statement(&mut self) -> Check {
        if self.at_kw("yield") {
            return self.yield_expression();
        }
        let start = self.current();
        let form = self.star_expressions()?;

        if self.at_op("=") {
            let (mut target, mut target_form) = (start, form);
            while self.eat_op("=") {
                Self::require(target, target_form, Form::assignable)?;
                target = self.current();
                target_form = self.assigned_value()?;
            }
            return Ok(());
        }
        if self.at_op_in(AUGMENTED_ASSIGN) {
            Self::require(start, form, Form::single)?;
            self.pos += 1;
            self.assigned_value()?;
            return Ok(());
        }
        if self.eat_op(":") {
            Self::require(start, form, Form::single)?;
            self.expression()?;
            if self.eat_op("=") {
                self.assigned_value()?;
            }
        }
        Ok(())
    }

    fn assigned_value(&mut self) -> Check<Form> {
        if self.at_kw("yield") {
            self.yield_expression()?;
            return Ok(Form::Value);
        }
        self.star_expressions()
    }

    fn yield_expression(&mut self) -> Check {
        self.pos += 1;
        if self.eat_kw("from") {
            return self.expression().map(drop);
        }
        if !self.at_statement_end() && !self.at_close() && !self.at_op("=") {
            self.star_expressions()?;
        }
        Ok(())
    }

    fn import_names(&mut self) -> Check {
        loop {
            self.dotted_name()?;
            if self.eat_kw("as") {
                self.identifier()?;
            }
            if !self.eat_op(",") {
                return Ok(());
            }
        }
    }

    fn dotted_name(&mut self) -> Check {
        self.identifier()?;
        while self.eat_op(".") {
            self.identifier()?;
        }
        Ok(())
    }

    fn import_from(&mut self) -> Check {
        let mut relative = false;
        while self.eat_op(".") || self.eat_op("...") {
            relative = true;
        }
        if !relative || !self.at_kw("import") {
            self.dotted_name()?;
        }
        self.expect_kw("import", "'import'")?;
        if self.eat_op("*") {
            return Ok(());
        }
        if self.at_open("(") {
            self.pos += 1;
            self.imported_names(true)?;
            return self.expect_close();
        }
        self.imported_names(false)
    }

    fn imported_names(&mut self, grouped: bool) -> Check {
        loop {
            self.identifier()?;
            if self.eat_kw("as") {
                self.identifier()?;
            }
            if !self.eat_op(",") || (grouped && self.at_close()) {
                return Ok(());
            }
        }
    }

    // --- compound headers ---

    fn def_header(&mut self) -> Check {
        self.identifier()?;
        if self.at_open("[") {
            self.type_parameters()?;
        }
        if !self.at_open("(") {
            return Err(self.expected("'('"));
        }
        self.pos += 1;
        self.parameters(Params::Def)?;
        self.expect_close()?;
        if self.eat_op("->") {
            self.expression()?;
        }
        self.block()
    }

    fn class_header(&mut self) -> Check {
        self.identifier()?;
        if self.at_open("[") {
            self.type_parameters()?;
        }
        if self.at_open("(") {
            self.pos += 1;
            self.arguments()?;
            self.expect_close()?;
        }
        self.block()
    }

    fn for_header(&mut self) -> Check {
        self.target_list()?;
        self.expect_kw("in", "'in'")?;
        self.star_expressions()?;
        self.block()
    }

    fn with_header(&mut self) -> Check {
        if self.at_open("(") && self.group_precedes_colon() {
            self.pos += 1;
            loop {
                self.with_item()?;
                if !self.eat_op(",") || self.at_close() {
                    break;
                }
            }
            self.expect_close()?;
        } else {
            self.with_item()?;
            while self.eat_op(",") {
                self.with_item()?;
            }
        }
        self.block()
    }

    fn with_item(&mut self) -> Check {
        self.expression()?;
        if self.eat_kw("as") {
            self.target()?;
        }
        Ok(())
    }

    /// The bracket at the cursor closes right before a `:`.
    fn group_precedes_colon(&self) -> bool {
        let Some(open) = self.peek() else {
            return false;
        };
        self.tokens[self.pos + 1..]
            .iter()
            .position(|t| t.kind == TokenKind::Close && t.depth == open.depth)
            .and_then(|i| self.tokens.get(self.pos + i + 2))
            .is_some_and(|t| t.is_op(self.source, ":"))
    }

    fn except_header(&mut self) -> Check {
        self.eat_op("*");
        if !self.at_op(":") {
            self.expression()?;
            while self.eat_op(",") {
                self.expression()?;
            }
            if self.eat_kw("as") {
                self.identifier()?;
            }
        }
        self.block()
    }

    fn subject(&mut self) -> Check {
        loop {
            self.element()?;
            if !self.eat_op(",") || self.at_op(":") {
                return Ok(());
            }
        }
    }

    fn case_patterns(&mut self) -> Check {
        self.in_pattern = true;
        loop {
            if self.eat_op("*") {
                self.identifier()?;
            } else {
                self.bitwise_or()?;
                if self.eat_kw("as") {
                    self.identifier()?;
                }
            }
            if !self.eat_op(",") || self.at_op(":") {
                break;
            }
        }
        self.in_pattern = false;
        Ok(())
    }

    fn type_alias_ahead(&self) -> bool {
        let name = self.peek_at(1);
        let after = self.peek_at(2);
        name.is_some_and(|t| t.kind == TokenKind::Name && !KEYWORDS.contains(&self.text(t)))
            && after.is_some_and(|t| {
                t.is_op(self.source, "=") || (t.kind == TokenKind::Open && self.text(t) == "[")
            })
    }

    fn type_alias(&mut self) -> Check {
        self.identifier()?;
        if self.at_open("[") {
            self.type_parameters()?;
        }
        self.expect_op("=", "'='")?;
        self.expression()?;
        self.finish()
    }

    fn type_parameters(&mut self) -> Check {
        self.pos += 1;
        loop {
            if !self.eat_op("**") {
                self.eat_op("*");
            }
            self.identifier()?;
            if self.eat_op(":") {
                self.expression()?;
            }
            if self.eat_op("=") {
                self.expression()?;
            }
            if !self.eat_op(",") || self.at_close() {
                break;
            }
        }
        self.expect_close()
    }

    fn parameters_done(&self, style: Params) -> bool {
        match style {
            Params::Def => self.at_close(),
            Params::Lambda => self.at_op(":"),
        }
    }

    /// A parameter list up to `)` or, for a lambda, up to `:`.
    fn parameters(&mut self, style: Params) -> Check {
        let mut defaults = false;
        let mut keyword_only = false;
        while !self.parameters_done(style) {
            let start = self.current();
            if self.eat_op("**") {
                self.parameter(style)?;
                self.eat_op(",");
                if !self.parameters_done(style) {
                    return Err(self.unexpected());
                }
                break;
            }
            if self.eat_op("*") {
                keyword_only = true;
                if self.at_identifier() {
                    self.parameter(style)?;
                }
            } else if !self.eat_op("/") {
                self.parameter(style)?;
                if self.eat_op("=") {
                    self.expression()?;
                    defaults = true;
                } else if defaults && !keyword_only {
                    return Err(ParseError::at(
                        start,
                        ParseErrorKind::Expected("a default value"),
                    ));
                }
            }
            if !self.eat_op(",") {
                break;
            }
        }
        Ok(())
    }

    fn parameter(&mut self, style: Params) -> Check {
        self.identifier()?;
        if style == Params::Def && self.eat_op(":") {
            if self.eat_op("*") {
                self.bitwise_or()?;
            } else {
                self.expression()?;
            }
        }
        Ok(())
    }

    // --- targets ---

    /// Loop targets, stopping before `in`.
    fn target_list(&mut self) -> Check {
        loop {
            self.target()?;
            if !self.eat_op(",") || self.at_kw("in") {
                return Ok(());
            }
        }
    }

    fn target(&mut self) -> Check {
        let starred = self.eat_op("*");
        let start = self.current();
        let form = self.bitwise_or()?;
        let valid: fn(Form) -> bool = if starred { Form::single } else { Form::assignable };
        Self::require(start, form, valid)
    }

    // --- expressions ---

    fn star_expressions(&mut self) -> Check<Form> {
        let start = self.current();
        let first = self.star_expression()?;
        if !self.at_op(",") {
            if first == Form::Starred {
                return Err(ParseError::at(start, ParseErrorKind::InvalidSyntax));
            }
            return Ok(first);
        }
        let mut assignable = first.sequence_item();
        while self.eat_op(",") {
            if self.at_sequence_end() {
                break;
            }
            assignable &= self.star_expression()?.sequence_item();
        }
        Ok(if assignable { Form::Sequence } else { Form::Value })
    }

    fn star_expression(&mut self) -> Check<Form> {
        if self.eat_op("*") {
            self.bitwise_or()?;
            return Ok(Form::Starred);
        }
        self.expression()
    }

    /// A display or argument item: `*x`, `x := y`, or an expression.
    fn element(&mut self) -> Check<Form> {
        if self.eat_op("*") {
            self.bitwise_or()?;
            return Ok(Form::Starred);
        }
        let form = self.named_expression()?;
        self.capture(form)
    }

    /// `as name` after a pattern item.
    fn capture(&mut self, form: Form) -> Check<Form> {
        if self.in_pattern && self.eat_kw("as") {
            self.identifier()?;
            return Ok(Form::Value);
        }
        Ok(form)
    }

    fn named_expression(&mut self) -> Check<Form> {
        if self.at_identifier() && self.peek_at(1).is_some_and(|t| t.is_op(self.source, ":=")) {
            self.pos += 2;
            self.expression()?;
            return Ok(Form::Value);
        }
        self.expression()
    }

    fn expression(&mut self) -> Check<Form> {
        if self.eat_kw("lambda") {
            self.parameters(Params::Lambda)?;
            self.expect_op(":", "':'")?;
            self.expression()?;
            return Ok(Form::Value);
        }
        let form = self.disjunction()?;
        if self.eat_kw("if") {
            self.disjunction()?;
            self.expect_kw("else", "'else'")?;
            self.expression()?;
            return Ok(Form::Value);
        }
        Ok(form)
    }

    fn disjunction(&mut self) -> Check<Form> {
        let form = self.conjunction()?;
        if !self.at_kw("or") {
            return Ok(form);
        }
        while self.eat_kw("or") {
            self.conjunction()?;
        }
        Ok(Form::Value)
    }

    fn conjunction(&mut self) -> Check<Form> {
        let form = self.inversion()?;
        if !self.at_kw("and") {
            return Ok(form);
        }
        while self.eat_kw("and") {
            self.inversion()?;
        }
        Ok(Form::Value)
    }

    fn inversion(&mut self) -> Check<Form> {
        if self.eat_kw("not") {
            self.inversion()?;
            return Ok(Form::Value);
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Check<Form> {
        let form = self.bitwise_or()?;
        let mut compared = false;
        while self.comparison_operator() {
            self.bitwise_or()?;
            compared = true;
        }
        Ok(if compared { Form::Value } else { form })
    }

    fn comparison_operator(&mut self) -> bool {
        if self.at_op_in(COMPARISONS) || self.at_kw("in") {
            self.pos += 1;
            return true;
        }
        if self.at_kw("not") && self.peek_at(1).is_some_and(|t| t.is_name(self.source, "in")) {
            self.pos += 2;
            return true;
        }
        if self.eat_kw("is") {
            self.eat_kw("not");
            return true;
        }
        false
    }

    fn bitwise_or(&mut self) -> Check<Form> {
        self.binary(0)
    }

    fn binary(&mut self, level: usize) -> Check<Form> {
        let Some(ops) = BINARY_LEVELS.get(level) else {
            return self.factor();
        };
        let form = self.binary(level + 1)?;
        let mut combined = false;
        while self.at_op_in(ops) {
            self.pos += 1;
            self.binary(level + 1)?;
            combined = true;
        }
        Ok(if combined { Form::Value } else { form })
    }

    fn factor(&mut self) -> Check<Form> {
        if self.at_op_in(&["+", "-", "~"]) {
            self.pos += 1;
            self.factor()?;
            return Ok(Form::Value);
        }
        self.power()
    }

    fn power(&mut self) -> Check<Form> {
        let awaited = self.eat_kw("await");
        let form = self.primary()?;
        if self.eat_op("**") {
            self.factor()?;
            return Ok(Form::Value);
        }
        Ok(if awaited { Form::Value } else { form })
    }

    fn primary(&mut self) -> Check<Form> {
        let mut form = self.atom()?;
        loop {
            if self.eat_op(".") {
                self.identifier()?;
                form = Form::Member;
            } else if self.at_open("(") {
                self.pos += 1;
                self.arguments()?;
                self.expect_close()?;
                form = Form::Value;
            } else if self.at_open("[") {
                self.pos += 1;
                self.slices()?;
                self.expect_close()?;
                form = Form::Member;
            } else {
                return Ok(form);
            }
        }
    }

    fn atom(&mut self) -> Check<Form> {
        let Some(token) = self.peek() else {
            return Err(self.expected("an expression"));
        };
        match token.kind {
            TokenKind::Name => {
                let word = self.text(token);
                if matches!(word, "True" | "False" | "None") {
                    self.pos += 1;
                    return Ok(Form::Value);
                }
                if KEYWORDS.contains(&word) {
                    return Err(self.unexpected());
                }
                self.pos += 1;
                Ok(Form::Name)
            }
            TokenKind::Number => {
                self.pos += 1;
                Ok(Form::Value)
            }
            TokenKind::String => {
                while self.peek().is_some_and(|t| t.kind == TokenKind::String) {
                    self.pos += 1;
                }
                Ok(Form::Value)
            }
            TokenKind::Open => {
                self.pos += 1;
                let form = match self.text(token) {
                    "(" => self.parenthesized()?,
                    "[" => self.list_display()?,
                    _ => self.brace_display()?,
                };
                self.expect_close()?;
                Ok(form)
            }
            TokenKind::Op if self.text(token) == "..." => {
                self.pos += 1;
                Ok(Form::Value)
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parenthesized(&mut self) -> Check<Form> {
        if self.at_close() {
            return Ok(Form::Sequence);
        }
        if self.at_kw("yield") {
            self.yield_expression()?;
            return Ok(Form::Value);
        }
        let start = self.current();
        let first = self.element()?;
        if self.at_comprehension() {
            self.comprehension()?;
            return Ok(Form::Value);
        }
        if !self.at_op(",") {
            if first == Form::Starred {
                return Err(ParseError::at(start, ParseErrorKind::InvalidSyntax));
            }
            return Ok(first);
        }
        self.items(first)
    }

    fn list_display(&mut self) -> Check<Form> {
        if self.at_close() {
            return Ok(Form::Sequence);
        }
        let first = self.element()?;
        if self.at_comprehension() {
            self.comprehension()?;
            return Ok(Form::Value);
        }
        self.items(first)
    }

    /// The `, item` tail of a tuple or list display.
    fn items(&mut self, first: Form) -> Check<Form> {
        let mut assignable = first.sequence_item();
        while self.eat_op(",") {
            if self.at_close() {
                break;
            }
            assignable &= self.element()?.sequence_item();
        }
        Ok(if assignable { Form::Sequence } else { Form::Value })
    }

    fn brace_display(&mut self) -> Check<Form> {
        if self.at_close() {
            return Ok(Form::Value);
        }
        if self.eat_op("**") {
            self.bitwise_or()?;
            return self.dict_items();
        }
        let key = self.element()?;
        if key != Form::Starred && self.eat_op(":") {
            self.dict_value()?;
            if self.at_comprehension() {
                return self.comprehension().map(|()| Form::Value);
            }
            return self.dict_items();
        }
        if self.at_comprehension() {
            return self.comprehension().map(|()| Form::Value);
        }
        while self.eat_op(",") {
            if self.at_close() {
                break;
            }
            self.element()?;
        }
        Ok(Form::Value)
    }

    fn dict_items(&mut self) -> Check<Form> {
        while self.eat_op(",") {
            if self.at_close() {
                break;
            }
            if self.eat_op("**") {
                self.bitwise_or()?;
                continue;
            }
            self.expression()?;
            self.expect_op(":", "':'")?;
            self.dict_value()?;
        }
        Ok(Form::Value)
    }

    fn dict_value(&mut self) -> Check {
        let form = self.expression()?;
        self.capture(form).map(drop)
    }

    fn comprehension(&mut self) -> Check {
        while self.at_comprehension() {
            self.eat_kw("async");
            self.pos += 1;
            self.target_list()?;
            self.expect_kw("in", "'in'")?;
            self.disjunction()?;
            while self.eat_kw("if") {
                self.disjunction()?;
            }
        }
        Ok(())
    }

    /// Call arguments up to the closing `)`.
    fn arguments(&mut self) -> Check {
        while !self.at_close() {
            if self.eat_op("*") || self.eat_op("**") {
                self.expression()?;
            } else if self.at_identifier()
                && self.peek_at(1).is_some_and(|t| t.is_op(self.source, "="))
            {
                self.pos += 2;
                self.dict_value()?;
            } else {
                self.element()?;
                if self.at_comprehension() {
                    self.comprehension()?;
                }
            }
            if !self.eat_op(",") {
                break;
            }
        }
        Ok(())
    }

    fn slices(&mut self) -> Check {
        loop {
            self.slice()?;
            if !self.eat_op(",") || self.at_close() {
                return Ok(());
            }
        }
    }

    fn slice(&mut self) -> Check {
        if self.eat_op("*") {
            return self.bitwise_or().map(drop);
        }
        if !self.at_op(":") {
            self.named_expression()?;
            if !self.at_op(":") {
                return Ok(());
            }
        }
        self.pos += 1;
        if !self.slice_part_end() {
            self.expression()?;
        }
        if self.eat_op(":") && !self.slice_part_end() {
            self.expression()?;
        }
        Ok(())
    }

    fn slice_part_end(&self) -> bool {
        self.at_close() || self.at_op(",") || self.at_op(":")
    }
}
