//! Tree walking
//!
//!     The [`Visitor`] is the only code that knows how to descend through the tree. A
//!     [`Processor`] receives hooks as the walk goes by and decides what to do with
//!     them; the formatter, the outline renderer and the validator are all processors.
//!
//! Hook order
//!
//!     For every node the visitor calls `preprocess`, then walks the node's stored
//!     fields in declaration order, and finally calls `postprocess`:
//!
//!         - Child nodes are walked recursively.
//!         - Token fields (identifiers, operators, literal values, notes, comments) are
//!           handed to `process_token` with their kind.
//!         - Between two consecutive fields the visitor calls `process_slot` with the
//!           1-based slot number, whether or not an optional field next to it is
//!           present. Processors inspect the node to tell.
//!
//!     A repeated field (the lines of a multi-line list, the predicates of an expression)
//!     counts as one field: its items are walked in order, each with its 0-based index
//!     and the item count. A node that is not part of a sequence gets index 0, size 1.
//!
//!     A one-of node (`Entity`, `Subject`, `Values`, ...) gets its own `preprocess` and
//!     `postprocess` around the variant it holds.
//!
//! Visiting never mutates the tree, so any number of processors may walk one shared
//! tree at the same time from different threads.

pub mod processor;
pub mod visitor;

pub use processor::Processor;
pub use visitor::{visit, Visitor};
