//! Core token types shared by the scanner, the parser and the validator.
//!
//! A token is the smallest lexical unit of a bali document: a kind tag, the 1-based line
//! and column of its first character, and the raw text it was scanned from. Tokens are
//! immutable once the scanner emits them.
//!
//! Keywords and punctuation share the single [`TokenKind::Delimiter`] class; the parser
//! tells them apart by comparing text. Every literal element and string form has its own
//! kind, and the value of such a token is opaque to the rest of the front end.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of token kinds produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenKind {
    /// Nothing matched at the cursor; always the last token of a stream.
    Error,
    /// Keywords, punctuation and operators.
    Delimiter,
    Space,
    Newline,
    /// Multi-line `!> ... <!` comment.
    Comment,
    /// Single-line `! ...` note trailing an item.
    Note,
    Identifier,

    // Elements
    Angle,
    Boolean,
    Duration,
    Moment,
    Number,
    Pattern,
    Percentage,
    Probability,
    Resource,
    Symbol,
    Tag,

    // Strings
    Binary,
    Bytecode,
    Moniker,
    Narrative,
    Quote,
    Version,
}

impl TokenKind {
    /// Kinds accepted by the `Element` rule.
    pub const ELEMENTS: &'static [TokenKind] = &[
        TokenKind::Angle,
        TokenKind::Boolean,
        TokenKind::Duration,
        TokenKind::Moment,
        TokenKind::Number,
        TokenKind::Pattern,
        TokenKind::Percentage,
        TokenKind::Probability,
        TokenKind::Resource,
        TokenKind::Symbol,
        TokenKind::Tag,
    ];

    /// Kinds accepted by the `String` rule.
    pub const STRINGS: &'static [TokenKind] = &[
        TokenKind::Binary,
        TokenKind::Bytecode,
        TokenKind::Moniker,
        TokenKind::Narrative,
        TokenKind::Quote,
        TokenKind::Version,
    ];

    pub fn is_element(self) -> bool {
        Self::ELEMENTS.contains(&self)
    }

    pub fn is_string(self) -> bool {
        Self::STRINGS.contains(&self)
    }

    /// Whitespace the parser skips unless a rule asks for it.
    pub fn is_insignificant(self) -> bool {
        matches!(self, TokenKind::Space | TokenKind::Newline)
    }

    /// The lower-case name used for this kind in grammar productions.
    pub fn grammar_name(self) -> &'static str {
        match self {
            TokenKind::Error => "error",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Space => "space",
            TokenKind::Newline => "newline",
            TokenKind::Comment => "comment",
            TokenKind::Note => "note",
            TokenKind::Identifier => "identifier",
            TokenKind::Angle => "angle",
            TokenKind::Boolean => "boolean",
            TokenKind::Duration => "duration",
            TokenKind::Moment => "moment",
            TokenKind::Number => "number",
            TokenKind::Pattern => "pattern",
            TokenKind::Percentage => "percentage",
            TokenKind::Probability => "probability",
            TokenKind::Resource => "resource",
            TokenKind::Symbol => "symbol",
            TokenKind::Tag => "tag",
            TokenKind::Binary => "binary",
            TokenKind::Bytecode => "bytecode",
            TokenKind::Moniker => "moniker",
            TokenKind::Narrative => "narrative",
            TokenKind::Quote => "quote",
            TokenKind::Version => "version",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A scanned token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub line: usize,
    pub column: usize,
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(line: usize, column: usize, kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            line,
            column,
            kind,
            text: text.into(),
        }
    }

    pub fn is_delimiter(&self, text: &str) -> bool {
        self.kind == TokenKind::Delimiter && self.text == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}:{}) {:?}",
            self.kind, self.line, self.column, self.text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_and_string_kinds_are_disjoint() {
        for kind in TokenKind::ELEMENTS {
            assert!(!kind.is_string(), "{kind} is listed as both");
        }
        assert!(TokenKind::Narrative.is_string());
        assert!(TokenKind::Tag.is_element());
        assert!(!TokenKind::Identifier.is_element());
    }

    #[test]
    fn delimiter_comparison_uses_text() {
        let token = Token::new(1, 1, TokenKind::Delimiter, "and");
        assert!(token.is_delimiter("and"));
        assert!(!token.is_delimiter("or"));
        let identifier = Token::new(1, 1, TokenKind::Identifier, "and");
        assert!(!identifier.is_delimiter("and"));
    }
}
