//! Token consistency checks
//!
//!     The parser only ever stores text the scanner produced, so a parsed tree is always
//!     consistent. Trees that arrive some other way (deserialized, assembled by hand,
//!     edited by another tool) are not, and a single bad token would make the canonical
//!     text of the tree parse back into something else.
//!
//!     The [`Validator`] walks a tree and re-checks every token against the pattern of
//!     its kind. It also checks that:
//!
//!         - scanning the text on its own yields that one token, so a keyword or `true`
//!           stored as an identifier is caught
//!         - an `Element` or `String` node holds a kind that rule can produce
//!         - delimiters stored by a single-token choice (operators, assignments, invokes,
//!           inverses, range brackets) are among the ones that rule accepts

use std::fmt;

use crate::bali::ast::{Document, Node};
use crate::bali::grammar;
use crate::bali::lexing::patterns::matches_exactly;
use crate::bali::lexing::Scanner;
use crate::bali::token::TokenKind;
use crate::bali::visiting::{visit, Processor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A token's text is not something the scanner would produce for its kind.
    Inconsistent {
        kind: TokenKind,
        text: String,
        message: String,
    },
    /// A node holds a token kind its rule never produces.
    UnexpectedKind { rule: &'static str, kind: TokenKind },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Inconsistent { message, .. } => write!(f, "{message}"),
            ValidationError::UnexpectedKind { rule, kind } => {
                write!(f, "A {rule} node cannot hold a token of kind {kind}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check every token of `document`.
pub fn validate(document: &Document) -> Result<(), ValidationError> {
    visit(document, &mut Validator::default())
}

/// The kind the scanner gives `text` when it is the whole input, if it is one token.
fn scanned_kind(text: &str) -> Option<TokenKind> {
    let mut tokens = Scanner::new(text);
    let token = tokens.next()?;
    if token.text != text || tokens.next().is_some() {
        return None;
    }
    Some(token.kind)
}

/// A node being walked and the last slot seen inside it.
#[derive(Debug)]
struct Frame {
    rule: &'static str,
    slot: usize,
}

#[derive(Debug, Default)]
pub struct Validator {
    stack: Vec<Frame>,
}

impl Validator {
    /// The choice rule a delimiter stored at the current position was read by.
    fn choice_rule(&self) -> Option<&'static str> {
        let frame = self.stack.last()?;
        match (frame.rule, frame.slot) {
            ("Predicate", _) => Some("Operator"),
            ("Inversion", _) => Some("Inverse"),
            ("LetClause", _) => Some("Assign"),
            ("Method", _) => Some("Invoke"),
            ("Range", 0) => Some("LeftBracket"),
            ("Range", _) => Some("RightBracket"),
            _ => None,
        }
    }

    fn check_kind(&self, kind: TokenKind) -> Result<(), ValidationError> {
        let Some(frame) = self.stack.last() else {
            return Ok(());
        };
        let allowed = match frame.rule {
            "Element" => kind.is_element(),
            "String" => kind.is_string(),
            _ => true,
        };
        if allowed {
            Ok(())
        } else {
            Err(ValidationError::UnexpectedKind {
                rule: frame.rule,
                kind,
            })
        }
    }
}

impl Processor for Validator {
    type Error = ValidationError;

    fn preprocess(
        &mut self,
        node: Node<'_>,
        _index: usize,
        _size: usize,
    ) -> Result<(), Self::Error> {
        self.stack.push(Frame {
            rule: node.rule(),
            slot: 0,
        });
        Ok(())
    }

    fn process_slot(&mut self, _node: Node<'_>, slot: usize) -> Result<(), Self::Error> {
        if let Some(frame) = self.stack.last_mut() {
            frame.slot = slot;
        }
        Ok(())
    }

    fn postprocess(
        &mut self,
        _node: Node<'_>,
        _index: usize,
        _size: usize,
    ) -> Result<(), Self::Error> {
        self.stack.pop();
        Ok(())
    }

    fn process_token(&mut self, kind: TokenKind, text: &str) -> Result<(), Self::Error> {
        self.check_kind(kind)?;
        if !matches_exactly(kind, text) {
            return Err(ValidationError::Inconsistent {
                kind,
                text: text.to_string(),
                message: format!("The value {text:?} is not a valid {kind} token"),
            });
        }
        let scanned = scanned_kind(text);
        if scanned != Some(kind) {
            let message = match scanned {
                Some(other) => format!("The value {text:?} is scanned as {other}, not {kind}"),
                None => format!("The value {text:?} is not a single {kind} token"),
            };
            return Err(ValidationError::Inconsistent {
                kind,
                text: text.to_string(),
                message,
            });
        }
        if kind == TokenKind::Delimiter {
            if let Some(rule) = self.choice_rule() {
                if !grammar::choices(rule).contains(&text) {
                    return Err(ValidationError::Inconsistent {
                        kind,
                        text: text.to_string(),
                        message: format!("The delimiter {text:?} is not a valid {rule}"),
                    });
                }
            }
        }
        log::trace!("validated {kind} {text:?}");
        Ok(())
    }
}
