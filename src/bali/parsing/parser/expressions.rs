//! Expressions, subjects and targets

use once_cell::sync::Lazy;

use super::Parser;
use crate::bali::ast::{
    AdditionalArgument, AdditionalIndex, Arguments, Attribute, Complement, Expression, Function,
    Indices, Inversion, Magnitude, Method, Precedence, Predicate, Referent, Subject, Target,
    Variable,
};
use crate::bali::grammar;
use crate::bali::parsing::ParseResult;
use crate::bali::token::{Token, TokenKind};

static OPERATORS: Lazy<Vec<&str>> = Lazy::new(|| grammar::choices("Operator"));
static INVOKES: Lazy<Vec<&str>> = Lazy::new(|| grammar::choices("Invoke"));
static INVERSES: Lazy<Vec<&str>> = Lazy::new(|| grammar::choices("Inverse"));

impl<I: Iterator<Item = Token>> Parser<'_, I> {
    pub(crate) fn expression(&mut self) -> ParseResult<Option<Expression>> {
        let Some(subject) = self.subject()? else {
            return Ok(None);
        };
        let predicates = self.repeat(Self::predicate)?;
        Ok(Some(Expression::new(subject, predicates)))
    }

    fn predicate(&mut self) -> ParseResult<Option<Predicate>> {
        let attempt = self.begin("Predicate");
        let Some(operator) = self.expect_one_of(&OPERATORS)? else {
            return self.abandon(attempt);
        };
        let Some(subject) = self.subject()? else {
            return self.abandon(attempt);
        };
        Ok(Some(Predicate { operator, subject }))
    }

    fn subject(&mut self) -> ParseResult<Option<Subject>> {
        if let Some(component) = self.component()? {
            return Ok(Some(Subject::Component(Box::new(component))));
        }
        if let Some(target) = self.target()? {
            return Ok(Some(Subject::Target(target)));
        }
        if let Some(referent) = self.referent()? {
            return Ok(Some(Subject::Referent(referent)));
        }
        if let Some(precedence) = self.precedence()? {
            return Ok(Some(Subject::Precedence(precedence)));
        }
        if let Some(inversion) = self.inversion()? {
            return Ok(Some(Subject::Inversion(inversion)));
        }
        if let Some(magnitude) = self.magnitude()? {
            return Ok(Some(Subject::Magnitude(magnitude)));
        }
        Ok(self.complement()?.map(Subject::Complement))
    }

    pub(crate) fn target(&mut self) -> ParseResult<Option<Target>> {
        if let Some(function) = self.function()? {
            return Ok(Some(Target::Function(function)));
        }
        if let Some(method) = self.method()? {
            return Ok(Some(Target::Method(method)));
        }
        if let Some(attribute) = self.attribute()? {
            return Ok(Some(Target::Attribute(attribute)));
        }
        Ok(self.variable()?.map(Target::Variable))
    }

    fn function(&mut self) -> ParseResult<Option<Function>> {
        let mut attempt = self.begin("Function");
        let Some(identifier) = self.expect_kind(TokenKind::Identifier)? else {
            return self.abandon(attempt);
        };
        if !self.expect_delimiter("(")? {
            return self.abandon(attempt);
        }
        let arguments = self.arguments()?;
        if arguments.is_some() {
            self.commit(&mut attempt);
        }
        if !self.expect_delimiter(")")? {
            return self.abandon(attempt);
        }
        Ok(Some(Function {
            identifier: identifier.text,
            arguments,
        }))
    }

    fn method(&mut self) -> ParseResult<Option<Method>> {
        let mut attempt = self.begin("Method");
        let Some(target) = self.expect_kind(TokenKind::Identifier)? else {
            return self.abandon(attempt);
        };
        let Some(invoke) = self.expect_one_of(&INVOKES)? else {
            return self.abandon(attempt);
        };
        let Some(method) = self.expect_kind(TokenKind::Identifier)? else {
            return self.abandon(attempt);
        };
        if !self.expect_delimiter("(")? {
            return self.abandon(attempt);
        }
        let arguments = self.arguments()?;
        if arguments.is_some() {
            self.commit(&mut attempt);
        }
        if !self.expect_delimiter(")")? {
            return self.abandon(attempt);
        }
        Ok(Some(Method {
            target: target.text,
            invoke,
            method: method.text,
            arguments,
        }))
    }

    fn arguments(&mut self) -> ParseResult<Option<Arguments>> {
        let Some(argument) = self.expression()? else {
            return Ok(None);
        };
        let additional = self.repeat(Self::additional_argument)?;
        Ok(Some(Arguments {
            argument: Box::new(argument),
            additional,
        }))
    }

    fn additional_argument(&mut self) -> ParseResult<Option<AdditionalArgument>> {
        let attempt = self.begin("AdditionalArgument");
        if !self.expect_delimiter(",")? {
            return self.abandon(attempt);
        }
        let Some(argument) = self.expression()? else {
            return self.abandon(attempt);
        };
        Ok(Some(AdditionalArgument { argument }))
    }

    pub(crate) fn attribute(&mut self) -> ParseResult<Option<Attribute>> {
        let mut attempt = self.begin("Attribute");
        let Some(identifier) = self.expect_kind(TokenKind::Identifier)? else {
            return self.abandon(attempt);
        };
        if !self.expect_delimiter("[")? {
            return self.abandon(attempt);
        }
        let Some(indices) = self.indices()? else {
            return self.abandon(attempt);
        };
        self.commit(&mut attempt);
        if !self.expect_delimiter("]")? {
            return self.abandon(attempt);
        }
        Ok(Some(Attribute {
            identifier: identifier.text,
            indices,
        }))
    }

    fn indices(&mut self) -> ParseResult<Option<Indices>> {
        let Some(index) = self.expression()? else {
            return Ok(None);
        };
        let additional = self.repeat(Self::additional_index)?;
        Ok(Some(Indices {
            index: Box::new(index),
            additional,
        }))
    }

    fn additional_index(&mut self) -> ParseResult<Option<AdditionalIndex>> {
        let attempt = self.begin("AdditionalIndex");
        if !self.expect_delimiter(",")? {
            return self.abandon(attempt);
        }
        let Some(index) = self.expression()? else {
            return self.abandon(attempt);
        };
        Ok(Some(AdditionalIndex { index }))
    }

    pub(crate) fn variable(&mut self) -> ParseResult<Option<Variable>> {
        Ok(self
            .expect_kind(TokenKind::Identifier)?
            .map(|token| Variable::new(token.text)))
    }

    fn referent(&mut self) -> ParseResult<Option<Referent>> {
        let attempt = self.begin("Referent");
        if !self.expect_delimiter("@")? {
            return self.abandon(attempt);
        }
        let Some(subject) = self.subject()? else {
            return self.abandon(attempt);
        };
        Ok(Some(Referent {
            subject: Box::new(subject),
        }))
    }

    fn precedence(&mut self) -> ParseResult<Option<Precedence>> {
        let mut attempt = self.begin("Precedence");
        if !self.expect_delimiter("(")? {
            return self.abandon(attempt);
        }
        let Some(expression) = self.expression()? else {
            return self.abandon(attempt);
        };
        self.commit(&mut attempt);
        if !self.expect_delimiter(")")? {
            return self.abandon(attempt);
        }
        Ok(Some(Precedence {
            expression: Box::new(expression),
        }))
    }

    fn inversion(&mut self) -> ParseResult<Option<Inversion>> {
        let attempt = self.begin("Inversion");
        let Some(inverse) = self.expect_one_of(&INVERSES)? else {
            return self.abandon(attempt);
        };
        let Some(subject) = self.subject()? else {
            return self.abandon(attempt);
        };
        Ok(Some(Inversion {
            inverse,
            subject: Box::new(subject),
        }))
    }

    fn magnitude(&mut self) -> ParseResult<Option<Magnitude>> {
        let mut attempt = self.begin("Magnitude");
        if !self.expect_delimiter("|")? {
            return self.abandon(attempt);
        }
        let Some(expression) = self.expression()? else {
            return self.abandon(attempt);
        };
        self.commit(&mut attempt);
        if !self.expect_delimiter("|")? {
            return self.abandon(attempt);
        }
        Ok(Some(Magnitude {
            expression: Box::new(expression),
        }))
    }

    fn complement(&mut self) -> ParseResult<Option<Complement>> {
        let mut attempt = self.begin("Complement");
        if !self.keyword(&mut attempt, "not")? {
            return self.abandon(attempt);
        }
        let Some(subject) = self.subject()? else {
            return self.abandon(attempt);
        };
        Ok(Some(Complement {
            subject: Box::new(subject),
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::bali::ast::{Entity, Expression, MainClause, Statements, Subject, Target};
    use crate::bali::parsing::{parse, ParseError};

    fn expression(text: &str) -> Expression {
        let source = format!("{{ {text} }}");
        let document = parse(&source).unwrap_or_else(|e| panic!("{e}"));
        let Entity::Procedure(procedure) = document.component.entity else {
            panic!("expected a procedure");
        };
        let Statements::Inline(inline) = procedure.statements else {
            panic!("expected an inline statement");
        };
        match *inline.statement.main_clause {
            MainClause::Expression(expression) => expression,
            other => panic!("expected an expression, got {other:?}"),
        }
    }

    #[test]
    fn predicates_stay_flat_in_source_order() {
        let parsed = expression("a + b * c");
        let operators: Vec<_> = parsed
            .predicates
            .iter()
            .map(|p| p.operator.as_str())
            .collect();
        assert_eq!(operators, vec!["+", "*"]);
    }

    #[test]
    fn identifier_prefixed_targets() {
        let targets: Vec<Target> = ["f(1, 2)", "bag<-pop()", "list.size()", "x[3]", "x"]
            .into_iter()
            .map(|text| match expression(text).subject {
                Subject::Target(target) => target,
                other => panic!("expected a target, got {other:?}"),
            })
            .collect();
        assert!(matches!(targets[0], Target::Function(_)));
        assert!(matches!(&targets[1], Target::Method(m) if m.invoke == "<-"));
        assert!(matches!(&targets[2], Target::Method(m) if m.invoke == "."));
        assert!(matches!(targets[3], Target::Attribute(_)));
        assert!(matches!(targets[4], Target::Variable(_)));
    }

    #[test]
    fn prefixed_subjects() {
        assert!(matches!(expression("@x").subject, Subject::Referent(_)));
        assert!(matches!(expression("(x)").subject, Subject::Precedence(_)));
        assert!(matches!(expression("- x").subject, Subject::Inversion(_)));
        assert!(matches!(expression("|x|").subject, Subject::Magnitude(_)));
        assert!(matches!(expression("not x").subject, Subject::Complement(_)));
        assert!(matches!(expression("(1..3)").subject, Subject::Component(_)));
    }

    #[test]
    fn choice_tables_follow_the_rule_catalog() {
        assert_eq!(super::OPERATORS.len(), 16);
        assert_eq!(*super::INVOKES, vec![".", "<-"]);
        assert_eq!(*super::INVERSES, vec!["-", "*"]);
    }

    #[test]
    fn call_with_arguments_commits() {
        let error = parse("{ f(1 2) }").unwrap_err();
        assert!(matches!(*error, ParseError::Syntax(_)));
        assert_eq!(error.diagnostic().rule, Some("Function"));
    }
}
