//! Procedures and statements
//!
//! A procedure is a brace-delimited block of statements, written either one per line
//! (with comment lines allowed between them) or inline separated by `;`.

use super::clause::MainClause;
use super::expression::Expression;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    pub statements: Statements,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statements {
    Multiline(MultilineStatements),
    Inline(InlineStatements),
    Empty(NoStatements),
}

impl Statements {
    /// Number of statements, comment lines excluded.
    pub fn len(&self) -> usize {
        match self {
            Statements::Multiline(multiline) => multiline
                .lines
                .iter()
                .filter(|line| matches!(line, AnnotatedStatement::Statement(_)))
                .count(),
            Statements::Inline(inline) => 1 + inline.additional.len(),
            Statements::Empty(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultilineStatements {
    pub lines: Vec<AnnotatedStatement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotatedStatement {
    Comment(CommentLine),
    Statement(StatementLine),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentLine {
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    pub statement: Statement,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineStatements {
    pub statement: Statement,
    pub additional: Vec<AdditionalStatement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalStatement {
    pub statement: Statement,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoStatements;

/// A main clause with an optional exception handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub main_clause: Box<MainClause>,
    pub on_clause: Option<OnClause>,
}

impl Statement {
    pub fn new(main_clause: MainClause, on_clause: Option<OnClause>) -> Self {
        Self {
            main_clause: Box::new(main_clause),
            on_clause,
        }
    }
}

/// `on $failure matching ... do { ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnClause {
    /// The symbol naming the caught exception.
    pub failure: String,
    pub handlers: Vec<MatchHandler>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchHandler {
    pub template: Expression,
    pub procedure: Procedure,
}
