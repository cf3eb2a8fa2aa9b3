//! Parsing module for bali documents
//!
//!     This module turns source text into a [`Document`]:
//!         1. Normalizing: tabs become four spaces.
//!         2. Scanning: the source is split into tokens, on a producer thread or inline.
//!            See [lexing](crate::bali::lexing).
//!         3. Parsing: a backtracking recursive-descent parser with one function per rule
//!            of the [catalog](crate::bali::grammar) builds the tree bottom-up.
//!         4. Completion: anything but whitespace left after the document is an error.
//!
//! Backtracking
//!
//!     Alternatives are tried in catalog order and the first that matches wins. Every rule
//!     attempt records a save-point in the token buffer. Until the attempt commits, a
//!     failure rewinds to that save-point and tells the caller "no match", which lets
//!     constructs share a prefix (`[1..3]`, `[1: 2]` and `[1, 2]` all open with `[1`).
//!
//!     An attempt commits once it has read a keyword or a structural sub-rule, anything
//!     but a single-token choice (`Element`, `String`, `Primitive`, `LeftBracket`,
//!     `RightBracket`, `Assign`, `Operator`, `Invoke`, `Inverse`) or a `Variable`. After
//!     commit there is no way back: a failure is a syntax error naming the rule, with the
//!     rule's production as the expected construct.
//!
//! Whitespace
//!
//!     Reading a newline or a note skips spaces only. Reading anything else skips spaces
//!     and newlines. This is what makes newlines significant inside multi-line
//!     collections and procedures and insignificant everywhere else.

pub mod error;
pub mod parser;

pub use error::{Diagnostic, ParseError, ParseResult};
pub use parser::Parser;

use crate::bali::ast::Document;
use crate::bali::lexing::{normalize, Scanner, TokenStream, DEFAULT_QUEUE_CAPACITY};
use crate::bali::token::Token;

/// How a parse obtains its tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Scan on a producer thread feeding a bounded queue. When false the parser pulls
    /// tokens from a scanner on the calling thread.
    pub concurrent: bool,
    /// Tokens buffered between the scanner thread and the parser.
    pub queue_capacity: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            concurrent: true,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// Parse a document with the default options.
pub fn parse(source: &str) -> ParseResult<Document> {
    parse_with(source, &ParserOptions::default())
}

/// Parse a document, scanning as `options` say.
pub fn parse_with(source: &str, options: &ParserOptions) -> ParseResult<Document> {
    let normalized = normalize(source);
    log::debug!(
        "parsing {} bytes ({} scanning)",
        normalized.len(),
        if options.concurrent {
            "concurrent"
        } else {
            "inline"
        }
    );
    let result = if options.concurrent {
        let tokens = TokenStream::spawn(normalized.clone(), options.queue_capacity);
        run(&normalized, tokens)
    } else {
        run(&normalized, Scanner::new(&normalized))
    };
    match &result {
        Ok(_) => log::debug!("parse finished"),
        Err(error) => log::debug!("parse failed: {}", error.diagnostic().message),
    }
    result
}

fn run<I: Iterator<Item = Token>>(source: &str, tokens: I) -> ParseResult<Document> {
    Parser::new(source, tokens).parse_document()
}
