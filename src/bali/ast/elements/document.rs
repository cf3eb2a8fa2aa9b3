//! Documents, components and literal leaves
//!
//! A document is an optional leading comment and one root component. A component is an
//! entity with optional parameters attached. Entities are literal elements, strings,
//! collections or procedures.

use super::collection::{Collection, Parameters};
use super::procedure::Procedure;
use crate::bali::token::TokenKind;
use serde::{Deserialize, Serialize};

/// The root of a parsed source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Dedented text of the leading `!> ... <!` comment.
    pub comment: Option<String>,
    pub component: Component,
}

impl Document {
    pub fn new(comment: Option<String>, component: Component) -> Self {
        Self { comment, component }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub entity: Entity,
    pub parameters: Option<Parameters>,
}

impl Component {
    pub fn new(entity: Entity, parameters: Option<Parameters>) -> Self {
        Self { entity, parameters }
    }

    /// A bare component holding one element.
    pub fn element(kind: TokenKind, value: impl Into<String>) -> Self {
        Self::new(Entity::Element(Element::new(kind, value)), None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entity {
    Element(Element),
    Text(Text),
    Collection(Box<Collection>),
    Procedure(Box<Procedure>),
}

/// A literal element token: angle, boolean, duration, moment, number, pattern,
/// percentage, probability, resource, symbol or tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub kind: TokenKind,
    pub value: String,
}

impl Element {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// A string token: binary, bytecode, moniker, narrative, quote or version. This is the
/// grammar's `String` rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub kind: TokenKind,
    pub value: String,
}

impl Text {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Keys of associations and endpoints of ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Primitive {
    Element(Element),
    Text(Text),
}
