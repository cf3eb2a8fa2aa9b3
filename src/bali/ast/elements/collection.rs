//! Collections: ranges, catalogs and lists
//!
//! All three open with `[`, and a range may also open with `(`. Catalogs and lists keep
//! the layout they were written in: multi-line, inline or empty. The empty forms differ
//! on purpose: `[:]` is a catalog with no associations and `[ ]` a list with no values.
//!
//! Parameters reuse the catalog body, wrapped in parentheses, and attach to a component.

use super::document::{Component, Primitive};
use crate::bali::token::TokenKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collection {
    Range(Range),
    Catalog(Catalog),
    List(List),
}

impl Collection {
    /// Number of items: values of a list, associations of a catalog, integers covered by
    /// a range between two integer numbers. Other ranges have no size.
    pub fn size(&self) -> Option<usize> {
        match self {
            Collection::Range(range) => range.size(),
            Collection::Catalog(catalog) => Some(catalog.associations.len()),
            Collection::List(list) => Some(list.values.len()),
        }
    }
}

/// `[first..last]`, each end either inclusive (`[`, `]`) or exclusive (`(`, `)`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub left: String,
    pub first: Primitive,
    pub last: Primitive,
    pub right: String,
}

impl Range {
    pub fn new(
        left: impl Into<String>,
        first: Primitive,
        last: Primitive,
        right: impl Into<String>,
    ) -> Self {
        Self {
            left: left.into(),
            first,
            last,
            right: right.into(),
        }
    }

    pub fn size(&self) -> Option<usize> {
        let first = integer(&self.first)?;
        let last = integer(&self.last)?;
        let low = if self.left == "(" { first + 1 } else { first };
        let high = if self.right == ")" { last - 1 } else { last };
        usize::try_from((high - low + 1).max(0)).ok()
    }
}

fn integer(primitive: &Primitive) -> Option<i128> {
    match primitive {
        Primitive::Element(element) if element.kind == TokenKind::Number => {
            element.value.parse::<i64>().ok().map(i128::from)
        }
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub associations: Associations,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Associations {
    Multiline(MultilineAssociations),
    Inline(InlineAssociations),
    Empty(NoAssociations),
}

impl Associations {
    pub fn len(&self) -> usize {
        match self {
            Associations::Multiline(multiline) => multiline.lines.len(),
            Associations::Inline(inline) => 1 + inline.additional.len(),
            Associations::Empty(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The associations in order, whatever the layout.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Association> + '_> {
        match self {
            Associations::Multiline(multiline) => {
                Box::new(multiline.lines.iter().map(|line| &line.association))
            }
            Associations::Inline(inline) => Box::new(
                std::iter::once(&inline.association)
                    .chain(inline.additional.iter().map(|item| &item.association)),
            ),
            Associations::Empty(_) => Box::new(std::iter::empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultilineAssociations {
    pub lines: Vec<AnnotatedAssociation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedAssociation {
    pub association: Association,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineAssociations {
    pub association: Association,
    pub additional: Vec<AdditionalAssociation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalAssociation {
    pub association: Association,
}

/// `:` inside brackets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoAssociations;

/// `key: value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub key: Primitive,
    pub value: Box<Component>,
}

impl Association {
    pub fn new(key: Primitive, value: Component) -> Self {
        Self {
            key,
            value: Box::new(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub values: Values,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Values {
    Multiline(MultilineValues),
    Inline(InlineValues),
    Empty(NoValues),
}

impl Values {
    pub fn len(&self) -> usize {
        match self {
            Values::Multiline(multiline) => multiline.lines.len(),
            Values::Inline(inline) => 1 + inline.additional.len(),
            Values::Empty(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = &Component> + '_> {
        match self {
            Values::Multiline(multiline) => {
                Box::new(multiline.lines.iter().map(|line| &line.value))
            }
            Values::Inline(inline) => Box::new(
                std::iter::once(inline.value.as_ref())
                    .chain(inline.additional.iter().map(|item| &item.value)),
            ),
            Values::Empty(_) => Box::new(std::iter::empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultilineValues {
    pub lines: Vec<AnnotatedValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedValue {
    pub value: Component,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineValues {
    pub value: Box<Component>,
    pub additional: Vec<AdditionalValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalValue {
    pub value: Component,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoValues;

/// `( associations )` following an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    pub associations: Associations,
}
