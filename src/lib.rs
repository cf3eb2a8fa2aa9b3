//! # bali-notation
//!
//! Scanner, parser, tree walker and canonical formatter for Bali document notation.
//!
//! File Layout
//!
//! Everything lives under [`bali`], one module per stage of the pipeline:
//! src/bali
//!   ├── token        Token kinds and positions
//!   ├── lexing       Pattern table, scanner, threaded token stream
//!   ├── grammar      The rule catalog and its alternation-order check
//!   ├── ast          One node type per rule, and the borrowed `Node` view
//!   ├── parsing      Backtracking recursive descent, diagnostics
//!   ├── visiting     The walker and the `Processor` hooks it drives
//!   ├── formats      Canonical text, treeviz outline, JSON/YAML
//!   └── validation   Token consistency checks for trees built outside the parser
//!
//! The round trip every consumer relies on:
//!
//!     let document = bali::parsing::parse(source)?;
//!     let text = bali::formats::format_canonical(&document);
//!     assert_eq!(bali::parsing::parse(&text)?, document);

#![allow(rustdoc::invalid_html_tags)]

pub mod bali;
