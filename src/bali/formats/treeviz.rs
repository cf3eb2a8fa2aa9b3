//! Treeviz outline of a tree
//!
//! One line per node, naming the rule it was parsed from, and one line per token, naming
//! its kind and quoting its text. Nesting is encoded as indentation, two spaces per
//! level. Useful for eyeballing the parser's decisions and for structural snapshots.
//!
//! Example, for `[1, $a]`:
//!
//!     Document
//!       Component
//!         Entity
//!           Collection
//!             List
//!               Values
//!                 InlineValues
//!                   Component
//!                     Entity
//!                       Element
//!                         Number "1"
//!     ...

use std::convert::Infallible;

use crate::bali::ast::{Document, Node};
use crate::bali::token::TokenKind;
use crate::bali::visiting::{visit, Processor};

const INDENT: &str = "  ";

pub fn to_treeviz_str(document: &Document) -> String {
    let mut formatter = TreevizFormatter::default();
    match visit(document, &mut formatter) {
        Ok(()) => formatter.output,
        Err(never) => match never {},
    }
}

#[derive(Debug, Default)]
pub struct TreevizFormatter {
    output: String,
    depth: usize,
}

impl TreevizFormatter {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.output.push_str(INDENT);
        }
        self.output.push_str(text);
        self.output.push('\n');
    }
}

impl Processor for TreevizFormatter {
    type Error = Infallible;

    fn preprocess(
        &mut self,
        node: Node<'_>,
        _index: usize,
        _size: usize,
    ) -> Result<(), Infallible> {
        self.line(node.rule());
        self.depth += 1;
        Ok(())
    }

    fn postprocess(
        &mut self,
        _node: Node<'_>,
        _index: usize,
        _size: usize,
    ) -> Result<(), Infallible> {
        self.depth -= 1;
        Ok(())
    }

    fn process_token(&mut self, kind: TokenKind, text: &str) -> Result<(), Infallible> {
        self.line(&format!("{kind} {text:?}"));
        Ok(())
    }
}
