//! The tree walker

use super::processor::Processor;
use crate::bali::ast::*;
use crate::bali::token::TokenKind;

/// Walks a tree and drives a [`Processor`].
pub struct Visitor<'p, P: Processor> {
    processor: &'p mut P,
}

/// Walk `document` with `processor`.
pub fn visit<P: Processor>(document: &Document, processor: &mut P) -> Result<(), P::Error> {
    Visitor::new(processor).visit_document(document)
}

impl<'p, P: Processor> Visitor<'p, P> {
    pub fn new(processor: &'p mut P) -> Self {
        Self { processor }
    }

    pub fn visit_document(&mut self, document: &Document) -> Result<(), P::Error> {
        self.walk(Node::Document(document), 0, 1)
    }

    /// Walk any node as if it were the root.
    pub fn walk(&mut self, node: Node<'_>, index: usize, size: usize) -> Result<(), P::Error> {
        self.processor.preprocess(node, index, size)?;
        self.fields(node)?;
        self.processor.postprocess(node, index, size)
    }

    fn child<'a>(&mut self, node: impl Into<Node<'a>>) -> Result<(), P::Error> {
        self.walk(node.into(), 0, 1)
    }

    fn optional<'a, T>(&mut self, node: Option<&'a T>) -> Result<(), P::Error>
    where
        &'a T: Into<Node<'a>>,
    {
        match node {
            Some(node) => self.child(node),
            None => Ok(()),
        }
    }

    fn sequence<'a, T>(&mut self, items: &'a [T]) -> Result<(), P::Error>
    where
        &'a T: Into<Node<'a>>,
    {
        let size = items.len();
        for (index, item) in items.iter().enumerate() {
            self.walk(item.into(), index, size)?;
        }
        Ok(())
    }

    fn slot(&mut self, node: Node<'_>, slot: usize) -> Result<(), P::Error> {
        self.processor.process_slot(node, slot)
    }

    fn token(&mut self, kind: TokenKind, text: &str) -> Result<(), P::Error> {
        self.processor.process_token(kind, text)
    }

    fn optional_token(&mut self, kind: TokenKind, text: Option<&String>) -> Result<(), P::Error> {
        match text {
            Some(text) => self.token(kind, text),
            None => Ok(()),
        }
    }

    fn fields(&mut self, node: Node<'_>) -> Result<(), P::Error> {
        match node {
            // Documents and components
            Node::Document(document) => {
                self.optional_token(TokenKind::Comment, document.comment.as_ref())?;
                self.slot(node, 1)?;
                self.child(&document.component)
            }
            Node::Component(component) => {
                self.child(&component.entity)?;
                self.slot(node, 1)?;
                self.optional(component.parameters.as_ref())
            }
            Node::Entity(entity) => match entity {
                Entity::Element(element) => self.child(element),
                Entity::Text(text) => self.child(text),
                Entity::Collection(collection) => self.child(&**collection),
                Entity::Procedure(procedure) => self.child(&**procedure),
            },
            Node::Element(element) => self.token(element.kind, &element.value),
            Node::Text(text) => self.token(text.kind, &text.value),
            Node::Primitive(primitive) => match primitive {
                Primitive::Element(element) => self.child(element),
                Primitive::Text(text) => self.child(text),
            },

            // Collections
            Node::Collection(collection) => match collection {
                Collection::Range(range) => self.child(range),
                Collection::Catalog(catalog) => self.child(catalog),
                Collection::List(list) => self.child(list),
            },
            Node::Range(range) => {
                self.token(TokenKind::Delimiter, &range.left)?;
                self.slot(node, 1)?;
                self.child(&range.first)?;
                self.slot(node, 2)?;
                self.child(&range.last)?;
                self.slot(node, 3)?;
                self.token(TokenKind::Delimiter, &range.right)
            }
            Node::Catalog(catalog) => self.child(&catalog.associations),
            Node::Associations(associations) => match associations {
                Associations::Multiline(multiline) => self.child(multiline),
                Associations::Inline(inline) => self.child(inline),
                Associations::Empty(empty) => self.child(empty),
            },
            Node::MultilineAssociations(multiline) => self.sequence(&multiline.lines),
            Node::AnnotatedAssociation(line) => {
                self.child(&line.association)?;
                self.slot(node, 1)?;
                self.optional_token(TokenKind::Note, line.note.as_ref())
            }
            Node::InlineAssociations(inline) => {
                self.child(&inline.association)?;
                self.slot(node, 1)?;
                self.sequence(&inline.additional)
            }
            Node::AdditionalAssociation(additional) => self.child(&additional.association),
            Node::NoAssociations(_) | Node::NoValues(_) | Node::NoStatements(_) => Ok(()),
            Node::Association(association) => {
                self.child(&association.key)?;
                self.slot(node, 1)?;
                self.child(&*association.value)
            }
            Node::List(list) => self.child(&list.values),
            Node::Values(values) => match values {
                Values::Multiline(multiline) => self.child(multiline),
                Values::Inline(inline) => self.child(inline),
                Values::Empty(empty) => self.child(empty),
            },
            Node::MultilineValues(multiline) => self.sequence(&multiline.lines),
            Node::AnnotatedValue(line) => {
                self.child(&line.value)?;
                self.slot(node, 1)?;
                self.optional_token(TokenKind::Note, line.note.as_ref())
            }
            Node::InlineValues(inline) => {
                self.child(&*inline.value)?;
                self.slot(node, 1)?;
                self.sequence(&inline.additional)
            }
            Node::AdditionalValue(additional) => self.child(&additional.value),
            Node::Parameters(parameters) => self.child(&parameters.associations),

            // Procedures
            Node::Procedure(procedure) => self.child(&procedure.statements),
            Node::Statements(statements) => match statements {
                Statements::Multiline(multiline) => self.child(multiline),
                Statements::Inline(inline) => self.child(inline),
                Statements::Empty(empty) => self.child(empty),
            },
            Node::MultilineStatements(multiline) => self.sequence(&multiline.lines),
            Node::AnnotatedStatement(line) => match line {
                AnnotatedStatement::Comment(comment) => self.child(comment),
                AnnotatedStatement::Statement(statement) => self.child(statement),
            },
            Node::CommentLine(line) => self.token(TokenKind::Comment, &line.comment),
            Node::StatementLine(line) => {
                self.child(&line.statement)?;
                self.slot(node, 1)?;
                self.optional_token(TokenKind::Note, line.note.as_ref())
            }
            Node::InlineStatements(inline) => {
                self.child(&inline.statement)?;
                self.slot(node, 1)?;
                self.sequence(&inline.additional)
            }
            Node::AdditionalStatement(additional) => self.child(&additional.statement),
            Node::Statement(statement) => {
                self.child(&*statement.main_clause)?;
                self.slot(node, 1)?;
                self.optional(statement.on_clause.as_ref())
            }
            Node::OnClause(on_clause) => {
                self.token(TokenKind::Symbol, &on_clause.failure)?;
                self.slot(node, 1)?;
                self.sequence(&on_clause.handlers)
            }
            Node::MatchHandler(handler) => {
                self.child(&handler.template)?;
                self.slot(node, 1)?;
                self.child(&handler.procedure)
            }

            // Clauses
            Node::MainClause(clause) => match clause {
                MainClause::FlowControl(flow) => self.child(flow),
                MainClause::Let(clause) => self.child(clause),
                MainClause::RepositoryAccess(access) => self.child(access),
                MainClause::MessageHandling(handling) => self.child(handling),
                MainClause::Expression(expression) => self.child(expression),
            },
            Node::FlowControl(flow) => match flow {
                FlowControl::If(clause) => self.child(clause),
                FlowControl::Select(clause) => self.child(clause),
                FlowControl::While(clause) => self.child(clause),
                FlowControl::With(clause) => self.child(clause),
                FlowControl::Continue(clause) => self.child(clause),
                FlowControl::Break(clause) => self.child(clause),
                FlowControl::Return(clause) => self.child(clause),
                FlowControl::Throw(clause) => self.child(clause),
            },
            Node::IfClause(clause) => {
                self.child(&clause.condition)?;
                self.slot(node, 1)?;
                self.child(&clause.procedure)
            }
            Node::SelectClause(clause) => {
                self.child(&clause.target)?;
                self.slot(node, 1)?;
                self.sequence(&clause.handlers)
            }
            Node::WhileClause(clause) => {
                self.child(&clause.condition)?;
                self.slot(node, 1)?;
                self.child(&clause.procedure)
            }
            Node::WithClause(clause) => {
                self.token(TokenKind::Identifier, &clause.item)?;
                self.slot(node, 1)?;
                self.child(&clause.sequence)?;
                self.slot(node, 2)?;
                self.child(&clause.procedure)
            }
            Node::ContinueClause(_) | Node::BreakClause(_) => Ok(()),
            Node::ReturnClause(clause) => self.child(&clause.result),
            Node::ThrowClause(clause) => self.child(&clause.exception),
            Node::LetClause(clause) => {
                self.child(&clause.recipient)?;
                self.slot(node, 1)?;
                self.token(TokenKind::Delimiter, &clause.assign)?;
                self.slot(node, 2)?;
                self.child(&clause.expression)
            }
            Node::Recipient(recipient) => match recipient {
                Recipient::Attribute(attribute) => self.child(attribute),
                Recipient::Variable(variable) => self.child(variable),
            },
            Node::RepositoryAccess(access) => match access {
                RepositoryAccess::Checkout(clause) => self.child(clause),
                RepositoryAccess::Save(clause) => self.child(clause),
                RepositoryAccess::Discard(clause) => self.child(clause),
                RepositoryAccess::Notarize(clause) => self.child(clause),
            },
            Node::CheckoutClause(clause) => {
                self.child(&clause.recipient)?;
                self.slot(node, 1)?;
                self.optional(clause.level.as_ref())?;
                self.slot(node, 2)?;
                self.child(&clause.name)
            }
            Node::AtLevel(at_level) => self.child(&at_level.level),
            Node::SaveClause(clause) => {
                self.child(&clause.document)?;
                self.slot(node, 1)?;
                self.child(&clause.recipient)
            }
            Node::DiscardClause(clause) => self.child(&clause.document),
            Node::NotarizeClause(clause) => {
                self.child(&clause.document)?;
                self.slot(node, 1)?;
                self.child(&clause.name)
            }
            Node::MessageHandling(handling) => match handling {
                MessageHandling::Post(clause) => self.child(clause),
                MessageHandling::Retrieve(clause) => self.child(clause),
                MessageHandling::Accept(clause) => self.child(clause),
                MessageHandling::Reject(clause) => self.child(clause),
                MessageHandling::Publish(clause) => self.child(clause),
            },
            Node::PostClause(clause) => {
                self.child(&clause.message)?;
                self.slot(node, 1)?;
                self.child(&clause.bag)
            }
            Node::RetrieveClause(clause) => {
                self.child(&clause.recipient)?;
                self.slot(node, 1)?;
                self.child(&clause.bag)
            }
            Node::AcceptClause(clause) => self.child(&clause.message),
            Node::RejectClause(clause) => self.child(&clause.message),
            Node::PublishClause(clause) => self.child(&clause.event),

            // Expressions
            Node::Expression(expression) => {
                self.child(&expression.subject)?;
                self.slot(node, 1)?;
                self.sequence(&expression.predicates)
            }
            Node::Predicate(predicate) => {
                self.token(TokenKind::Delimiter, &predicate.operator)?;
                self.slot(node, 1)?;
                self.child(&predicate.subject)
            }
            Node::Subject(subject) => match subject {
                Subject::Component(component) => self.child(&**component),
                Subject::Target(target) => self.child(target),
                Subject::Referent(referent) => self.child(referent),
                Subject::Precedence(precedence) => self.child(precedence),
                Subject::Inversion(inversion) => self.child(inversion),
                Subject::Magnitude(magnitude) => self.child(magnitude),
                Subject::Complement(complement) => self.child(complement),
            },
            Node::Target(target) => match target {
                Target::Function(function) => self.child(function),
                Target::Method(method) => self.child(method),
                Target::Attribute(attribute) => self.child(attribute),
                Target::Variable(variable) => self.child(variable),
            },
            Node::Function(function) => {
                self.token(TokenKind::Identifier, &function.identifier)?;
                self.slot(node, 1)?;
                self.optional(function.arguments.as_ref())
            }
            Node::Method(method) => {
                self.token(TokenKind::Identifier, &method.target)?;
                self.slot(node, 1)?;
                self.token(TokenKind::Delimiter, &method.invoke)?;
                self.slot(node, 2)?;
                self.token(TokenKind::Identifier, &method.method)?;
                self.slot(node, 3)?;
                self.optional(method.arguments.as_ref())
            }
            Node::Arguments(arguments) => {
                self.child(&*arguments.argument)?;
                self.slot(node, 1)?;
                self.sequence(&arguments.additional)
            }
            Node::AdditionalArgument(additional) => self.child(&additional.argument),
            Node::Attribute(attribute) => {
                self.token(TokenKind::Identifier, &attribute.identifier)?;
                self.slot(node, 1)?;
                self.child(&attribute.indices)
            }
            Node::Indices(indices) => {
                self.child(&*indices.index)?;
                self.slot(node, 1)?;
                self.sequence(&indices.additional)
            }
            Node::AdditionalIndex(additional) => self.child(&additional.index),
            Node::Variable(variable) => self.token(TokenKind::Identifier, &variable.identifier),
            Node::Referent(referent) => self.child(&*referent.subject),
            Node::Precedence(precedence) => self.child(&*precedence.expression),
            Node::Inversion(inversion) => {
                self.token(TokenKind::Delimiter, &inversion.inverse)?;
                self.slot(node, 1)?;
                self.child(&*inversion.subject)
            }
            Node::Magnitude(magnitude) => self.child(&*magnitude.expression),
            Node::Complement(complement) => self.child(&*complement.subject),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bali::parsing::parse;
    use std::convert::Infallible;

    /// Records every hook as one line.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Processor for Recorder {
        type Error = Infallible;

        fn preprocess(
            &mut self,
            node: Node<'_>,
            index: usize,
            size: usize,
        ) -> Result<(), Infallible> {
            self.events.push(format!("pre {} {index}/{size}", node.rule()));
            Ok(())
        }

        fn process_slot(&mut self, node: Node<'_>, slot: usize) -> Result<(), Infallible> {
            self.events.push(format!("slot {} {slot}", node.rule()));
            Ok(())
        }

        fn postprocess(
            &mut self,
            node: Node<'_>,
            index: usize,
            size: usize,
        ) -> Result<(), Infallible> {
            self.events.push(format!("post {} {index}/{size}", node.rule()));
            Ok(())
        }

        fn process_token(&mut self, kind: TokenKind, text: &str) -> Result<(), Infallible> {
            self.events.push(format!("token {kind} {text}"));
            Ok(())
        }
    }

    #[test]
    fn hooks_wrap_fields_and_slots() {
        let document = parse("[1, 2]").unwrap();
        let mut recorder = Recorder::default();
        visit(&document, &mut recorder).unwrap();
        let expected = [
            "pre Document 0/1",
            "slot Document 1",
            "pre Component 0/1",
            "pre Entity 0/1",
            "pre Collection 0/1",
            "pre List 0/1",
            "pre Values 0/1",
            "pre InlineValues 0/1",
            "pre Component 0/1",
            "pre Entity 0/1",
            "pre Element 0/1",
            "token Number 1",
            "post Element 0/1",
            "post Entity 0/1",
            "slot Component 1",
            "post Component 0/1",
            "slot InlineValues 1",
            "pre AdditionalValue 0/1",
            "pre Component 0/1",
            "pre Entity 0/1",
            "pre Element 0/1",
            "token Number 2",
            "post Element 0/1",
            "post Entity 0/1",
            "slot Component 1",
            "post Component 0/1",
            "post AdditionalValue 0/1",
            "post InlineValues 0/1",
            "post Values 0/1",
            "post List 0/1",
            "post Collection 0/1",
            "post Entity 0/1",
            "slot Component 1",
            "post Component 0/1",
            "post Document 0/1",
        ];
        assert_eq!(recorder.events, expected);
    }

    #[test]
    fn sequences_carry_index_and_size() {
        let document = parse("[\n    1\n    2\n    3\n]").unwrap();
        let mut recorder = Recorder::default();
        visit(&document, &mut recorder).unwrap();
        let lines: Vec<&String> = recorder
            .events
            .iter()
            .filter(|event| event.starts_with("pre AnnotatedValue"))
            .collect();
        assert_eq!(
            lines,
            [
                "pre AnnotatedValue 0/3",
                "pre AnnotatedValue 1/3",
                "pre AnnotatedValue 2/3",
            ]
        );
    }

    /// Stops at the first token.
    struct FailFast;

    impl Processor for FailFast {
        type Error = String;

        fn process_token(&mut self, _kind: TokenKind, text: &str) -> Result<(), String> {
            Err(text.to_string())
        }
    }

    #[test]
    fn processor_errors_stop_the_walk() {
        let document = parse("[$a: 1, $b: 2]").unwrap();
        assert_eq!(visit(&document, &mut FailFast), Err("$a".to_string()));
    }
}
