//! Token Pattern Definitions
//!
//! Every token kind is described by one regular expression. The scanner tries them in
//! [scan order](scan_order) at the cursor and accepts the first kind that matches. The
//! validator re-checks finished tokens against the [exact](matches_exactly) form of the
//! same expressions, so both sides always agree on what a kind looks like.
//!
//! # Scan Order
//!
//! 1. keywords and punctuation (delimiter)
//! 2. space, newline
//! 3. comment, note
//! 4. elements: duration, angle, moment, resource, boolean, pattern, percentage,
//!    probability, number, symbol, tag
//! 5. strings: binary, bytecode, moniker, narrative, quote, version
//! 6. identifier
//! 7. operators (delimiter)
//!
//! Punctuation that could start a literal (`<` of a moment, `-` of a number, `/` of a
//! moniker, `.` of a probability) is only tried as an operator after every literal failed.

use crate::bali::token::TokenKind;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Reserved words. They scan as delimiters.
pub const KEYWORDS: &[&str] = &[
    "accept", "and", "as", "at", "break", "checkout", "continue", "discard", "do", "each", "from",
    "if", "in", "ior", "is", "let", "level", "loop", "matches", "matching", "not", "notarize", "on",
    "post", "publish", "reject", "retrieve", "return", "san", "save", "select", "throw", "to",
    "while", "with", "xor",
];

/// Punctuation that never starts a literal, tried before anything else.
pub const PUNCTUATION: &[&str] = &[
    "..", ":=", "?=", "+=", "-=", "*=", "/=", "<-", "[", "]", "(", ")", "{", "}", ",", ":", ";",
    "@", "|",
];

/// Operators that share a first character with some literal, tried last.
pub const OPERATORS: &[&str] = &["//", "&", "+", "-", "*", "/", "^", "<", "=", ">", "."];

const SPACE: &str = r"[ ]+";
const NEWLINE: &str = r"\r?\n";
const COMMENT: &str = r"!>\r?\n[\s\S]*?<!";
const NOTE: &str = r"! [^\r\n]*";

const DURATION: &str =
    r"~-?P(?:\d+W|(?:\d+Y)?(?:\d+M)?(?:\d+D)?(?:T(?:\d+H)?(?:\d+M)?(?:\d+(?:\.\d+)?S)?)?)";
const ANGLE: &str = r"~(?:pi|tau|\d+(?:\.\d+)?(?:E[+-]?\d+)?)";
const MOMENT: &str =
    r"<\d{1,4}(?:-\d{2}(?:-\d{2}(?:T\d{2}(?::\d{2}(?::\d{2}(?:\.\d{1,3})?)?)?)?)?)?>";
const RESOURCE: &str = r"<[a-z][a-z0-9+.\-]*:[^\s>]*>";
const BOOLEAN: &str = r"(?:false|true)\b";
const PATTERN: &str = r#"(?:none|any)\b|"(?:[^"\\\r\n]|\\.)*"\?"#;
const PERCENTAGE: &str = r"-?\d+(?:\.\d+)?%";
const PROBABILITY: &str = r"\.\d+";
const NUMBER: &str = r"-?\d+(?:\.\d+)?(?:E[+-]?\d+)?i?";
const SYMBOL: &str = r"\$[a-zA-Z][a-zA-Z0-9]*(?:-\d+)?";
const TAG: &str = r"#[0-9A-Z]+";

const BINARY: &str = r"'[A-Za-z0-9+/=\s]*'";
const BYTECODE: &str = r"'\[[0-9a-fA-F\s]*\]'";
const MONIKER: &str = r"(?:/[a-zA-Z][a-zA-Z0-9.+\-]*)+";
const NARRATIVE: &str = r#"">\r?\n[\s\S]*?<""#;
const QUOTE: &str = r#""(?:[^"\\\r\n]|\\.)*""#;
const VERSION: &str = r"v\d+(?:\.\d+)*\b";

const IDENTIFIER: &str = r"[a-zA-Z][a-zA-Z0-9]*";

/// Build a regex alternation from literal words, longest first so that `..` wins over
/// `.` and `notarize` over `not`.
fn alternation(groups: &[&[&str]]) -> String {
    let mut words: Vec<&str> = groups
        .iter()
        .flat_map(|group| group.iter().copied())
        .collect();
    words.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    words
        .iter()
        .map(|word| regex::escape(word))
        .collect::<Vec<_>>()
        .join("|")
}

/// The unanchored pattern source for a kind. Delimiters combine all three word lists.
pub fn pattern(kind: TokenKind) -> Option<String> {
    let source = match kind {
        TokenKind::Error => return None,
        TokenKind::Delimiter => return Some(alternation(&[KEYWORDS, PUNCTUATION, OPERATORS])),
        TokenKind::Space => SPACE,
        TokenKind::Newline => NEWLINE,
        TokenKind::Comment => COMMENT,
        TokenKind::Note => NOTE,
        TokenKind::Identifier => IDENTIFIER,
        TokenKind::Angle => ANGLE,
        TokenKind::Boolean => BOOLEAN,
        TokenKind::Duration => DURATION,
        TokenKind::Moment => MOMENT,
        TokenKind::Number => NUMBER,
        TokenKind::Pattern => PATTERN,
        TokenKind::Percentage => PERCENTAGE,
        TokenKind::Probability => PROBABILITY,
        TokenKind::Resource => RESOURCE,
        TokenKind::Symbol => SYMBOL,
        TokenKind::Tag => TAG,
        TokenKind::Binary => BINARY,
        TokenKind::Bytecode => BYTECODE,
        TokenKind::Moniker => MONIKER,
        TokenKind::Narrative => NARRATIVE,
        TokenKind::Quote => QUOTE,
        TokenKind::Version => VERSION,
    };
    Some(source.to_string())
}

fn anchored(source: &str) -> Regex {
    Regex::new(&format!("^(?:{source})")).expect("token patterns are valid regular expressions")
}

/// Lazy-compiled scan table, in priority order. Delimiters appear twice: keywords and
/// punctuation first, operators last.
static SCAN_ORDER: Lazy<Vec<(TokenKind, Regex)>> = Lazy::new(|| {
    let mut table = vec![(
        TokenKind::Delimiter,
        anchored(&alternation(&[KEYWORDS, PUNCTUATION])),
    )];
    for kind in [
        TokenKind::Space,
        TokenKind::Newline,
        TokenKind::Comment,
        TokenKind::Note,
        TokenKind::Duration,
        TokenKind::Angle,
        TokenKind::Moment,
        TokenKind::Resource,
        TokenKind::Boolean,
        TokenKind::Pattern,
        TokenKind::Percentage,
        TokenKind::Probability,
        TokenKind::Number,
        TokenKind::Symbol,
        TokenKind::Tag,
        TokenKind::Binary,
        TokenKind::Bytecode,
        TokenKind::Moniker,
        TokenKind::Narrative,
        TokenKind::Quote,
        TokenKind::Version,
        TokenKind::Identifier,
    ] {
        if let Some(source) = pattern(kind) {
            table.push((kind, anchored(&source)));
        }
    }
    table.push((TokenKind::Delimiter, anchored(&alternation(&[OPERATORS]))));
    table
});

/// Lazy-compiled whole-text patterns keyed by kind, for validation.
static EXACT: Lazy<HashMap<TokenKind, Regex>> = Lazy::new(|| {
    SCAN_ORDER
        .iter()
        .map(|(kind, _)| *kind)
        .filter_map(|kind| {
            let source = pattern(kind)?;
            let regex = Regex::new(&format!("^(?:{source})$"))
                .expect("token patterns are valid regular expressions");
            Some((kind, regex))
        })
        .collect()
});

/// The scan table in priority order.
pub fn scan_order() -> &'static [(TokenKind, Regex)] {
    &SCAN_ORDER
}

/// Whether `text` is, in its entirety, a token of the given kind.
pub fn matches_exactly(kind: TokenKind, text: &str) -> bool {
    EXACT.get(&kind).is_some_and(|regex| regex.is_match(text))
}

/// Whether a delimiter match must be rejected because it is only the head of a word.
pub fn splits_word(matched: &str, following: Option<char>) -> bool {
    let ends_alphanumeric = matched.chars().last().is_some_and(char::is_alphanumeric);
    let continues = following.is_some_and(|c| c.is_alphanumeric() || c == '_');
    ends_alphanumeric && continues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternation_is_longest_first() {
        let source = alternation(&[&["not", "notarize", "."], &[".."]]);
        assert_eq!(source, r"notarize|not|\.\.|\.");
    }

    #[test]
    fn scan_order_starts_with_keywords_and_ends_with_operators() {
        let table = scan_order();
        assert_eq!(
            table.first().map(|(kind, _)| *kind),
            Some(TokenKind::Delimiter)
        );
        assert_eq!(
            table.last().map(|(kind, _)| *kind),
            Some(TokenKind::Delimiter)
        );
        let identifier = table
            .iter()
            .position(|(kind, _)| *kind == TokenKind::Identifier);
        assert_eq!(identifier, Some(table.len() - 2));
    }

    #[test]
    fn every_scanned_kind_has_an_exact_pattern() {
        for (kind, _) in scan_order() {
            assert!(EXACT.contains_key(kind), "{kind} has no exact pattern");
        }
        assert!(!matches_exactly(TokenKind::Error, "?"));
    }

    #[test]
    fn exact_patterns_reject_partial_text() {
        assert!(matches_exactly(TokenKind::Number, "-6.02E23"));
        assert!(!matches_exactly(TokenKind::Number, "12abc"));
        assert!(matches_exactly(TokenKind::Delimiter, "notarize"));
        assert!(matches_exactly(TokenKind::Delimiter, "//"));
        assert!(!matches_exactly(TokenKind::Delimiter, "nota"));
        assert!(matches_exactly(TokenKind::Narrative, "\">\n    line\n<\""));
        assert!(matches_exactly(TokenKind::Moment, "<2024-01-02T03:04:05>"));
        assert!(matches_exactly(
            TokenKind::Resource,
            "<https://bali-nebula.net/>"
        ));
        assert!(matches_exactly(TokenKind::Version, "v1.2.3"));
        assert!(!matches_exactly(TokenKind::Version, "v1.2."));
    }

    #[test]
    fn splits_word_only_for_alphanumeric_heads() {
        assert!(splits_word("and", Some('r')));
        assert!(splits_word("in", Some('_')));
        assert!(!splits_word("and", Some(' ')));
        assert!(!splits_word("and", None));
        assert!(!splits_word("[", Some('a')));
    }
}
