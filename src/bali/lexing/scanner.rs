//! Priority-ordered scanner
//!
//! The scanner walks the source left to right. At each position it tries the pattern
//! table in order and takes the first kind whose anchored expression matches; there is
//! no longest-match contest between kinds. When nothing matches, one `Error` token holding
//! the offending character is produced and the iterator ends.

use super::patterns::{scan_order, splits_word};
use crate::bali::token::{Token, TokenKind};

/// Replace every tab with four spaces. Applied to a source before it is scanned.
pub fn normalize(source: &str) -> String {
    source.replace('\t', "    ")
}

/// Lazy token iterator over a source text.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    position: usize,
    line: usize,
    column: usize,
    finished: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Find the first kind in scan order that matches at the cursor, with its length.
    fn match_at_cursor(&self) -> Option<(TokenKind, usize)> {
        let rest = &self.source[self.position..];
        for (kind, regex) in scan_order() {
            let Some(found) = regex.find(rest) else {
                continue;
            };
            if found.is_empty() {
                continue;
            }
            if *kind == TokenKind::Delimiter
                && splits_word(found.as_str(), rest[found.end()..].chars().next())
            {
                continue;
            }
            return Some((*kind, found.end()));
        }
        None
    }

    fn advance(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.position += text.len();
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished || self.position >= self.source.len() {
            self.finished = true;
            return None;
        }
        let (line, column) = (self.line, self.column);
        let token = match self.match_at_cursor() {
            Some((kind, length)) => {
                let text = &self.source[self.position..self.position + length];
                self.advance(text);
                Token::new(line, column, kind, text)
            }
            None => {
                self.finished = true;
                let offending = self.source[self.position..]
                    .chars()
                    .next()
                    .map(String::from)
                    .unwrap_or_default();
                Token::new(line, column, TokenKind::Error, offending)
            }
        };
        log::trace!("scanned {token}");
        Some(token)
    }
}
