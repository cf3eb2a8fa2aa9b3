//! Token cursor and rule attempts
//!
//! The parser keeps the tokens it has pulled in a buffer and moves a cursor over it, so
//! rewinding to a save-point is a matter of resetting an index. Tokens are pulled from the
//! underlying iterator only when the cursor reaches the end of the buffer, and dropped
//! from its front once no uncommitted attempt can rewind to them.
//!
//! A statement line of a multi-line block ends at its newline. While one is being parsed,
//! reads at the line's own bracket nesting stop at newlines instead of skipping them.
//!
//! The rule functions live in submodules, one per area of the grammar, each adding an
//! `impl` block to [`Parser`].

use once_cell::sync::Lazy;

use super::error::{Diagnostic, ParseError, ParseResult};
use crate::bali::ast::Document;
use crate::bali::grammar;
use crate::bali::token::{Token, TokenKind};

mod clauses;
mod collections;
mod components;
mod expressions;
mod procedures;

static ORDERED_ALTERNATIVES: Lazy<bool> = Lazy::new(|| grammar::alternation_conflicts().is_empty());

/// Cursor position plus the number of brackets open there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Mark {
    position: usize,
    nesting: usize,
}

/// Save-point and commit state of one rule attempt.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Attempt {
    rule: &'static str,
    mark: Mark,
    save_point: usize,
    committed: bool,
}

/// Backtracking parser over a token iterator.
pub struct Parser<'s, I: Iterator<Item = Token>> {
    source: &'s str,
    tokens: I,
    buffer: Vec<Token>,
    /// Absolute index of `buffer[0]`.
    offset: usize,
    position: usize,
    nesting: usize,
    /// Nesting of the statement line being parsed, if any.
    line: Option<usize>,
    /// Marks of the attempts that may still rewind, oldest first.
    save_points: Vec<usize>,
}

impl<'s, I: Iterator<Item = Token>> Parser<'s, I> {
    /// Create a parser. `source` is the text the tokens were scanned from and is only
    /// used to render diagnostics.
    pub fn new(source: &'s str, tokens: I) -> Self {
        debug_assert!(
            *ORDERED_ALTERNATIVES,
            "rule catalog lists alternatives in an unreachable order"
        );
        Self {
            source,
            tokens,
            buffer: Vec::new(),
            offset: 0,
            position: 0,
            nesting: 0,
            line: None,
            save_points: Vec::new(),
        }
    }

    /// Parse one document and require that nothing but whitespace follows it.
    pub fn parse_document(&mut self) -> ParseResult<Document> {
        let Some(document) = self.document()? else {
            return Err(self.syntax("Document"));
        };
        if let Some(token) = self.peek_significant()? {
            let diagnostic = Diagnostic::new(self.source, Some(token), None);
            return Err(Box::new(ParseError::TrailingInput(diagnostic)));
        }
        Ok(document)
    }

    fn token_at(&mut self, index: usize) -> Option<&Token> {
        let index = index.checked_sub(self.offset)?;
        while self.buffer.len() <= index {
            let token = self.tokens.next()?;
            self.buffer.push(token);
        }
        self.buffer.get(index)
    }

    fn mark(&self) -> Mark {
        Mark {
            position: self.position,
            nesting: self.nesting,
        }
    }

    fn reset(&mut self, mark: Mark) {
        self.position = mark.position;
        self.nesting = mark.nesting;
    }

    /// Drop the buffered tokens no live save-point can rewind to.
    fn release(&mut self) {
        let floor = self.save_points.first().copied().unwrap_or(self.position);
        if floor > self.offset {
            let released = (floor - self.offset).min(self.buffer.len());
            self.buffer.drain(..released);
            self.offset += released;
        }
    }

    fn lexical(&self, token: Token) -> Box<ParseError> {
        let diagnostic = Diagnostic::new(self.source, Some(token), None);
        Box::new(ParseError::Lexical(diagnostic))
    }

    /// A syntax error in `rule` at the next significant token.
    pub(crate) fn syntax(&mut self, rule: &'static str) -> Box<ParseError> {
        let token = match self.peek_significant() {
            Ok(token) => token,
            Err(error) => return error,
        };
        let diagnostic = Diagnostic::new(self.source, token, Some(rule));
        Box::new(ParseError::Syntax(diagnostic))
    }

    /// The next token that is not a space or newline, without consuming it.
    fn peek_significant(&mut self) -> ParseResult<Option<Token>> {
        let mut index = self.position;
        while let Some(token) = self.token_at(index) {
            match token.kind {
                TokenKind::Space | TokenKind::Newline => index += 1,
                TokenKind::Error => {
                    let token = token.clone();
                    return Err(self.lexical(token));
                }
                _ => return Ok(Some(token.clone())),
            }
        }
        Ok(None)
    }

    /// Consume and return the next token, skipping spaces, and newlines too unless
    /// `skip_newlines` is false or the cursor sits at the end of a statement line.
    fn read(&mut self, skip_newlines: bool) -> ParseResult<Option<Token>> {
        loop {
            let Some(token) = self.token_at(self.position).cloned() else {
                return Ok(None);
            };
            match token.kind {
                TokenKind::Space => self.position += 1,
                TokenKind::Newline if skip_newlines && !self.line_bound() => self.position += 1,
                TokenKind::Error => return Err(self.lexical(token)),
                _ => {
                    self.position += 1;
                    if token.kind == TokenKind::Delimiter {
                        match token.text.as_str() {
                            "(" | "[" | "{" => self.nesting += 1,
                            ")" | "]" | "}" => self.nesting = self.nesting.saturating_sub(1),
                            _ => {}
                        }
                    }
                    return Ok(Some(token));
                }
            }
        }
    }

    fn line_bound(&self) -> bool {
        self.line == Some(self.nesting)
    }

    /// Move past spaces and newlines.
    pub(crate) fn skip_layout(&mut self) {
        while let Some(token) = self.token_at(self.position) {
            if !matches!(token.kind, TokenKind::Space | TokenKind::Newline) {
                break;
            }
            self.position += 1;
        }
    }

    /// Run `rule` as one statement line: newlines at the current nesting end it.
    pub(crate) fn within_line<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let outer = self.line.replace(self.nesting);
        let result = rule(self);
        self.line = outer;
        result
    }

    pub(crate) fn begin(&mut self, rule: &'static str) -> Attempt {
        let save_point = self.save_points.len();
        self.save_points.push(self.position);
        Attempt {
            rule,
            mark: self.mark(),
            save_point,
            committed: false,
        }
    }

    /// Commit an attempt. Its save-point, and those of the finished attempts begun after
    /// it, can no longer be rewound to.
    pub(crate) fn commit(&mut self, attempt: &mut Attempt) {
        if !attempt.committed {
            attempt.committed = true;
            self.save_points.truncate(attempt.save_point);
            self.release();
        }
    }

    /// Give up on an attempt: rewind if it never committed, fail otherwise.
    pub(crate) fn abandon<T>(&mut self, attempt: Attempt) -> ParseResult<Option<T>> {
        if attempt.committed {
            return Err(self.syntax(attempt.rule));
        }
        self.save_points.truncate(attempt.save_point);
        if self.position != attempt.mark.position {
            log::trace!(
                "{}: rewinding {} tokens",
                attempt.rule,
                self.position - attempt.mark.position
            );
        }
        self.reset(attempt.mark);
        Ok(None)
    }

    /// Read a token of `kind`, or rewind and return `None`.
    pub(crate) fn expect_kind(&mut self, kind: TokenKind) -> ParseResult<Option<Token>> {
        let mark = self.mark();
        let skip_newlines = !matches!(kind, TokenKind::Newline | TokenKind::Note);
        match self.read(skip_newlines)? {
            Some(token) if token.kind == kind => Ok(Some(token)),
            _ => {
                self.reset(mark);
                Ok(None)
            }
        }
    }

    /// Read a token whose kind is one of `kinds`, or rewind and return `None`.
    pub(crate) fn expect_any_kind(&mut self, kinds: &[TokenKind]) -> ParseResult<Option<Token>> {
        let mark = self.mark();
        match self.read(true)? {
            Some(token) if kinds.contains(&token.kind) => Ok(Some(token)),
            _ => {
                self.reset(mark);
                Ok(None)
            }
        }
    }

    /// Read a delimiter with one of the given texts, or rewind and return `None`.
    pub(crate) fn expect_one_of(&mut self, texts: &[&str]) -> ParseResult<Option<String>> {
        let mark = self.mark();
        match self.read(true)? {
            Some(token)
                if token.kind == TokenKind::Delimiter && texts.contains(&token.text.as_str()) =>
            {
                Ok(Some(token.text))
            }
            _ => {
                self.reset(mark);
                Ok(None)
            }
        }
    }

    /// Read the delimiter `text`, or rewind and return false.
    pub(crate) fn expect_delimiter(&mut self, text: &str) -> ParseResult<bool> {
        Ok(self.expect_one_of(&[text])?.is_some())
    }

    /// Read the keyword `text` and commit the attempt when it is there.
    pub(crate) fn keyword(&mut self, attempt: &mut Attempt, text: &str) -> ParseResult<bool> {
        let found = self.expect_delimiter(text)?;
        if found {
            self.commit(attempt);
        }
        Ok(found)
    }

    /// Apply `rule` as many times as it matches.
    pub(crate) fn repeat<T>(
        &mut self,
        mut rule: impl FnMut(&mut Self) -> ParseResult<Option<T>>,
    ) -> ParseResult<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = rule(self)? {
            items.push(item);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bali::lexing::Scanner;

    fn parser(source: &str) -> Parser<'_, Scanner<'_>> {
        Parser::new(source, Scanner::new(source))
    }

    #[test]
    fn alternative_order_is_checked_once() {
        assert!(*ORDERED_ALTERNATIVES);
        assert!(Lazy::get(&ORDERED_ALTERNATIVES).is_some());
        parser("x");
        assert_eq!(Lazy::get(&ORDERED_ALTERNATIVES), Some(&true));
    }

    #[test]
    fn newline_and_note_reads_skip_spaces_only() {
        let mut spaced = parser("   \n  x");
        assert!(spaced.expect_kind(TokenKind::Identifier).unwrap().is_some());

        let mut same_line = parser("  x");
        assert!(same_line.expect_kind(TokenKind::Newline).unwrap().is_none());

        let mut noted = parser("\n! note");
        assert!(noted.expect_kind(TokenKind::Note).unwrap().is_none());
        assert!(noted.expect_kind(TokenKind::Newline).unwrap().is_some());
        assert!(noted.expect_kind(TokenKind::Note).unwrap().is_some());
    }

    #[test]
    fn failed_expectations_leave_the_cursor_alone() {
        let mut parser = parser("[ 1 ]");
        assert!(!parser.expect_delimiter("(").unwrap());
        assert!(parser.expect_delimiter("[").unwrap());
        assert!(parser.expect_one_of(&["]", ")"]).unwrap().is_none());
        let number = parser.expect_any_kind(TokenKind::ELEMENTS).unwrap();
        assert_eq!(number.map(|t| t.text), Some("1".to_string()));
    }

    #[test]
    fn uncommitted_attempts_rewind() {
        let mut parser = parser("x y z");
        let attempt = parser.begin("Variable");
        assert!(parser.expect_kind(TokenKind::Identifier).unwrap().is_some());
        assert!(parser.expect_kind(TokenKind::Identifier).unwrap().is_some());
        let result: ParseResult<Option<()>> = parser.abandon(attempt);
        assert_eq!(result, Ok(None));
        let first = parser.expect_kind(TokenKind::Identifier).unwrap();
        assert_eq!(first.map(|t| t.text), Some("x".to_string()));
    }

    #[test]
    fn committed_attempts_fail_with_the_rule() {
        let mut parser = parser("if x");
        let mut attempt = parser.begin("IfClause");
        assert!(parser.keyword(&mut attempt, "if").unwrap());
        let error = parser.abandon::<()>(attempt).unwrap_err();
        assert!(matches!(*error, ParseError::Syntax(_)));
        assert_eq!(error.diagnostic().rule, Some("IfClause"));
        assert_eq!(
            error.diagnostic().token.as_ref().map(|t| t.text.as_str()),
            Some("x")
        );
    }

    #[test]
    fn statement_lines_stop_at_their_newline() {
        let mut parser = parser("x\n+ y");
        let operator = parser
            .within_line(|parser| {
                parser.expect_kind(TokenKind::Identifier)?;
                parser.expect_one_of(&["+"])
            })
            .unwrap();
        assert_eq!(operator, None);
        let operator = parser.expect_one_of(&["+"]).unwrap();
        assert_eq!(operator.as_deref(), Some("+"));
    }

    #[test]
    fn brackets_inside_a_line_span_newlines() {
        let mut parser = parser("f(\n1\n)\n");
        let closed = parser
            .within_line(|parser| {
                parser.expect_kind(TokenKind::Identifier)?;
                parser.expect_delimiter("(")?;
                parser.expect_any_kind(TokenKind::ELEMENTS)?;
                parser.expect_delimiter(")")
            })
            .unwrap();
        assert!(closed);
        assert_eq!(parser.nesting, 0);
    }

    #[test]
    fn rewinds_restore_the_nesting() {
        let mut parser = parser("[ x");
        let attempt = parser.begin("List");
        assert!(parser.expect_delimiter("[").unwrap());
        assert_eq!(parser.nesting, 1);
        assert_eq!(parser.abandon::<()>(attempt), Ok(None));
        assert_eq!(parser.nesting, 0);
    }

    #[test]
    fn commits_release_the_tokens_behind_them() {
        let mut parser = parser("[\n    1\n    2\n    3\n]");
        assert!(parser.parse_document().is_ok());
        assert!(parser.offset > 0);
        assert!(parser.buffer.len() < 4, "{:?}", parser.buffer);
        assert!(parser.save_points.is_empty());
    }

    #[test]
    fn uncommitted_attempts_hold_their_tokens() {
        let mut parser = parser("x y z");
        let mut outer = parser.begin("Outer");
        let mut inner = parser.begin("Inner");
        parser.expect_kind(TokenKind::Identifier).unwrap();
        parser.commit(&mut inner);
        assert_eq!(parser.offset, 0);
        parser.expect_kind(TokenKind::Identifier).unwrap();
        parser.commit(&mut outer);
        assert_eq!(parser.offset, parser.position);
    }

    #[test]
    fn error_tokens_are_lexical_failures() {
        let mut parser = parser("  ?");
        let error = parser.read(true).unwrap_err();
        assert!(matches!(*error, ParseError::Lexical(_)));
        assert!(error.diagnostic().rule.is_none());
    }
}
