//! Expressions
//!
//! An expression is a subject followed by any number of `operator subject` predicates,
//! kept flat in source order. The notation defines no operator precedence, grouping
//! is explicit through parentheses.

use super::document::Component;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    pub subject: Subject,
    pub predicates: Vec<Predicate>,
}

impl Expression {
    pub fn new(subject: Subject, predicates: Vec<Predicate>) -> Self {
        Self {
            subject,
            predicates,
        }
    }

    /// An expression naming a single variable.
    pub fn variable(identifier: impl Into<String>) -> Self {
        Self::new(
            Subject::Target(Target::Variable(Variable::new(identifier))),
            Vec::new(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub operator: String,
    pub subject: Subject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    Component(Box<Component>),
    Target(Target),
    Referent(Referent),
    Precedence(Precedence),
    Inversion(Inversion),
    Magnitude(Magnitude),
    Complement(Complement),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    Function(Function),
    Method(Method),
    Attribute(Attribute),
    Variable(Variable),
}

/// `identifier(arguments)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub identifier: String,
    pub arguments: Option<Arguments>,
}

/// `target.method(arguments)` or `target<-method(arguments)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub target: String,
    pub invoke: String,
    pub method: String,
    pub arguments: Option<Arguments>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arguments {
    pub argument: Box<Expression>,
    pub additional: Vec<AdditionalArgument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalArgument {
    pub argument: Expression,
}

/// `identifier[indices]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub identifier: String,
    pub indices: Indices,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indices {
    pub index: Box<Expression>,
    pub additional: Vec<AdditionalIndex>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalIndex {
    pub index: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub identifier: String,
}

impl Variable {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }
}

/// `@subject`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Referent {
    pub subject: Box<Subject>,
}

/// `(expression)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precedence {
    pub expression: Box<Expression>,
}

/// `-subject` or `*subject`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inversion {
    pub inverse: String,
    pub subject: Box<Subject>,
}

/// `|expression|`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Magnitude {
    pub expression: Box<Expression>,
}

/// `not subject`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complement {
    pub subject: Box<Subject>,
}
