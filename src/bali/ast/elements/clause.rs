//! Main clauses
//!
//! Every clause but a bare expression opens with a keyword. Flow control, repository
//! access and message handling group the clauses by what they act on.

use super::expression::{Attribute, Expression, Target, Variable};
use super::procedure::{MatchHandler, Procedure};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MainClause {
    FlowControl(FlowControl),
    Let(LetClause),
    RepositoryAccess(RepositoryAccess),
    MessageHandling(MessageHandling),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowControl {
    If(IfClause),
    Select(SelectClause),
    While(WhileClause),
    With(WithClause),
    Continue(ContinueClause),
    Break(BreakClause),
    Return(ReturnClause),
    Throw(ThrowClause),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IfClause {
    pub condition: Expression,
    pub procedure: Procedure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectClause {
    pub target: Target,
    pub handlers: Vec<MatchHandler>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhileClause {
    pub condition: Expression,
    pub procedure: Procedure,
}

/// `with each item in sequence do { ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithClause {
    pub item: String,
    pub sequence: Expression,
    pub procedure: Procedure,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinueClause;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakClause;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnClause {
    pub result: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowClause {
    pub exception: Expression,
}

/// `let recipient := expression`, or any other assignment operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetClause {
    pub recipient: Recipient,
    pub assign: String,
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    Attribute(Attribute),
    Variable(Variable),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepositoryAccess {
    Checkout(CheckoutClause),
    Save(SaveClause),
    Discard(DiscardClause),
    Notarize(NotarizeClause),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutClause {
    pub recipient: Recipient,
    pub level: Option<AtLevel>,
    pub name: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtLevel {
    pub level: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveClause {
    pub document: Expression,
    pub recipient: Recipient,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardClause {
    pub document: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotarizeClause {
    pub document: Expression,
    pub name: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageHandling {
    Post(PostClause),
    Retrieve(RetrieveClause),
    Accept(AcceptClause),
    Reject(RejectClause),
    Publish(PublishClause),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostClause {
    pub message: Expression,
    pub bag: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrieveClause {
    pub recipient: Recipient,
    pub bag: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptClause {
    pub message: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectClause {
    pub message: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishClause {
    pub event: Expression,
}
