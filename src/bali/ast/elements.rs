//! Node definitions, grouped the way the grammar is
//!
//!     - [document]: documents, components and the literal leaves
//!     - [collection]: ranges, catalogs, lists and parameters
//!     - [procedure]: procedures, statement blocks and statements
//!     - [clause]: the main clauses a statement can open with
//!     - [expression]: expressions, subjects and targets

pub mod clause;
pub mod collection;
pub mod document;
pub mod expression;
pub mod procedure;

pub use clause::*;
pub use collection::*;
pub use document::*;
pub use expression::*;
pub use procedure::*;
