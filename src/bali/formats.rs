//! Output formats for parsed documents
//!
//! - canonical: the tree back to source, in the single layout used for digests
//! - treeviz: an indented outline of rules and tokens
//! - serialized: JSON and YAML interchange
//!
//! The first two are processors driven by the visitor. The registry exposes all of them
//! by name.

pub mod canonical;
pub mod registry;
pub mod serialized;
pub mod treeviz;

pub use canonical::{format_canonical, CanonicalFormatter};
pub use registry::{Format, FormatError, FormatRegistry};
pub use serialized::{from_json, from_yaml, to_json, to_yaml, SerializationError};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
