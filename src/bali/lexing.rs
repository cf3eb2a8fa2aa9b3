//! Lexing
//!
//!     The scanner turns normalized source text into an ordered stream of tokens. Every
//!     token kind is described by an anchored regular expression, and at each cursor
//!     position the kinds are tried in a fixed priority order: keywords and punctuation,
//!     whitespace, comments, every literal element and string form, identifiers, and last
//!     the short operators. The first kind that matches wins; there is no longest-match
//!     contest between kinds. See [patterns](patterns) for the table and the ordering.
//!
//!     A keyword that would swallow the prefix of a longer word (`and` in `android`) is
//!     rejected, so the word falls through to the identifier pattern.
//!
//!     Scanning is lazy: [Scanner](scanner::Scanner) is an iterator and only does work as
//!     tokens are pulled. [TokenStream](stream::TokenStream) runs that iterator on its own
//!     thread behind a bounded queue so parsing can start before scanning ends.
//!
//!     Multi-line literals (narratives, comments, binary blocks) carry the indentation of
//!     the context they were written in; [indentation](indentation) strips and restores it.

pub mod indentation;
pub mod patterns;
pub mod scanner;
pub mod stream;

pub use scanner::{normalize, Scanner};
pub use stream::{scan, TokenStream, DEFAULT_QUEUE_CAPACITY};
