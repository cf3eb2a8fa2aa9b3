//! Abstract syntax tree for bali documents
//!
//!     One node type per grammar rule, except the single-token choice rules (`Element`,
//!     `String`, `LeftBracket`, `RightBracket`, `Assign`, `Operator`, `Invoke`, `Inverse`)
//!     which are stored as the chosen token's text on their parent, plus its kind where
//!     the kind carries meaning.
//!
//! Shape
//!
//!     The tree is strict: every node has exactly one parent and nothing points back up.
//!     Nodes are built bottom-up by the parser, after all of their children parsed, and
//!     are never mutated afterwards. Recursive positions are boxed.
//!
//!     The tree keeps the layout choices the author made. An inline list and a multi-line
//!     list are different `Values` variants, and an empty catalog (`[:]`) is a distinct
//!     node from an empty list (`[ ]`), which is what lets the canonical formatter
//!     reproduce a document without re-deciding its layout.
//!
//! Traversal
//!
//!     Nodes do not traverse themselves. [`Node`](node::Node) is a borrowed, copyable view
//!     of any node, and the [visiting](crate::bali::visiting) module owns the walk.

pub mod elements;
pub mod node;

pub use elements::*;
pub use node::Node;
