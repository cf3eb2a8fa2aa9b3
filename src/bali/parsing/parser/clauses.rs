//! Main clauses
//!
//! Every clause but a bare expression opens with its keyword, so each of them commits as
//! soon as the keyword is read.

use once_cell::sync::Lazy;

use super::{Attempt, Parser};
use crate::bali::ast::{
    AcceptClause, AtLevel, BreakClause, CheckoutClause, ContinueClause, DiscardClause, Expression,
    FlowControl, IfClause, LetClause, MainClause, MessageHandling, NotarizeClause, PostClause,
    PublishClause, Recipient, RejectClause, RepositoryAccess, RetrieveClause, ReturnClause,
    SaveClause, SelectClause, ThrowClause, WhileClause, WithClause,
};
use crate::bali::grammar;
use crate::bali::parsing::ParseResult;
use crate::bali::token::{Token, TokenKind};

static ASSIGNMENTS: Lazy<Vec<&str>> = Lazy::new(|| grammar::choices("Assign"));

impl<I: Iterator<Item = Token>> Parser<'_, I> {
    pub(crate) fn main_clause(&mut self) -> ParseResult<Option<MainClause>> {
        if let Some(flow) = self.flow_control()? {
            return Ok(Some(MainClause::FlowControl(flow)));
        }
        if let Some(clause) = self.let_clause()? {
            return Ok(Some(MainClause::Let(clause)));
        }
        if let Some(access) = self.repository_access()? {
            return Ok(Some(MainClause::RepositoryAccess(access)));
        }
        if let Some(handling) = self.message_handling()? {
            return Ok(Some(MainClause::MessageHandling(handling)));
        }
        Ok(self.expression()?.map(MainClause::Expression))
    }

    /// Read an expression after a keyword, failing the attempt when it is missing.
    fn operand(&mut self, attempt: Attempt) -> ParseResult<Option<Expression>> {
        match self.expression()? {
            Some(expression) => Ok(Some(expression)),
            None => self.abandon(attempt),
        }
    }

    fn flow_control(&mut self) -> ParseResult<Option<FlowControl>> {
        if let Some(clause) = self.if_clause()? {
            return Ok(Some(FlowControl::If(clause)));
        }
        if let Some(clause) = self.select_clause()? {
            return Ok(Some(FlowControl::Select(clause)));
        }
        if let Some(clause) = self.while_clause()? {
            return Ok(Some(FlowControl::While(clause)));
        }
        if let Some(clause) = self.with_clause()? {
            return Ok(Some(FlowControl::With(clause)));
        }
        if let Some(clause) = self.continue_clause()? {
            return Ok(Some(FlowControl::Continue(clause)));
        }
        if let Some(clause) = self.break_clause()? {
            return Ok(Some(FlowControl::Break(clause)));
        }
        if let Some(clause) = self.return_clause()? {
            return Ok(Some(FlowControl::Return(clause)));
        }
        Ok(self.throw_clause()?.map(FlowControl::Throw))
    }

    fn if_clause(&mut self) -> ParseResult<Option<IfClause>> {
        let mut attempt = self.begin("IfClause");
        if !self.keyword(&mut attempt, "if")? {
            return self.abandon(attempt);
        }
        let Some(condition) = self.operand(attempt)? else {
            return Ok(None);
        };
        if !self.expect_delimiter("do")? {
            return self.abandon(attempt);
        }
        let Some(procedure) = self.procedure()? else {
            return self.abandon(attempt);
        };
        Ok(Some(IfClause {
            condition,
            procedure,
        }))
    }

    fn select_clause(&mut self) -> ParseResult<Option<SelectClause>> {
        let mut attempt = self.begin("SelectClause");
        if !self.keyword(&mut attempt, "select")? {
            return self.abandon(attempt);
        }
        let Some(target) = self.target()? else {
            return self.abandon(attempt);
        };
        let handlers = self.repeat(Self::match_handler)?;
        if handlers.is_empty() {
            return self.abandon(attempt);
        }
        Ok(Some(SelectClause { target, handlers }))
    }

    fn while_clause(&mut self) -> ParseResult<Option<WhileClause>> {
        let mut attempt = self.begin("WhileClause");
        if !self.keyword(&mut attempt, "while")? {
            return self.abandon(attempt);
        }
        let Some(condition) = self.operand(attempt)? else {
            return Ok(None);
        };
        if !self.expect_delimiter("do")? {
            return self.abandon(attempt);
        }
        let Some(procedure) = self.procedure()? else {
            return self.abandon(attempt);
        };
        Ok(Some(WhileClause {
            condition,
            procedure,
        }))
    }

    fn with_clause(&mut self) -> ParseResult<Option<WithClause>> {
        let mut attempt = self.begin("WithClause");
        if !self.keyword(&mut attempt, "with")? || !self.expect_delimiter("each")? {
            return self.abandon(attempt);
        }
        let Some(item) = self.expect_kind(TokenKind::Identifier)? else {
            return self.abandon(attempt);
        };
        if !self.expect_delimiter("in")? {
            return self.abandon(attempt);
        }
        let Some(sequence) = self.operand(attempt)? else {
            return Ok(None);
        };
        if !self.expect_delimiter("do")? {
            return self.abandon(attempt);
        }
        let Some(procedure) = self.procedure()? else {
            return self.abandon(attempt);
        };
        Ok(Some(WithClause {
            item: item.text,
            sequence,
            procedure,
        }))
    }

    fn continue_clause(&mut self) -> ParseResult<Option<ContinueClause>> {
        let mut attempt = self.begin("ContinueClause");
        if !self.keyword(&mut attempt, "continue")? || !self.expect_delimiter("loop")? {
            return self.abandon(attempt);
        }
        Ok(Some(ContinueClause))
    }

    fn break_clause(&mut self) -> ParseResult<Option<BreakClause>> {
        let mut attempt = self.begin("BreakClause");
        if !self.keyword(&mut attempt, "break")? || !self.expect_delimiter("loop")? {
            return self.abandon(attempt);
        }
        Ok(Some(BreakClause))
    }

    fn return_clause(&mut self) -> ParseResult<Option<ReturnClause>> {
        let mut attempt = self.begin("ReturnClause");
        if !self.keyword(&mut attempt, "return")? {
            return self.abandon(attempt);
        }
        Ok(self.operand(attempt)?.map(|result| ReturnClause { result }))
    }

    fn throw_clause(&mut self) -> ParseResult<Option<ThrowClause>> {
        let mut attempt = self.begin("ThrowClause");
        if !self.keyword(&mut attempt, "throw")? {
            return self.abandon(attempt);
        }
        Ok(self
            .operand(attempt)?
            .map(|exception| ThrowClause { exception }))
    }

    fn let_clause(&mut self) -> ParseResult<Option<LetClause>> {
        let mut attempt = self.begin("LetClause");
        if !self.keyword(&mut attempt, "let")? {
            return self.abandon(attempt);
        }
        let Some(recipient) = self.recipient()? else {
            return self.abandon(attempt);
        };
        let Some(assign) = self.expect_one_of(&ASSIGNMENTS)? else {
            return self.abandon(attempt);
        };
        let Some(expression) = self.operand(attempt)? else {
            return Ok(None);
        };
        Ok(Some(LetClause {
            recipient,
            assign,
            expression,
        }))
    }

    pub(crate) fn recipient(&mut self) -> ParseResult<Option<Recipient>> {
        if let Some(attribute) = self.attribute()? {
            return Ok(Some(Recipient::Attribute(attribute)));
        }
        Ok(self.variable()?.map(Recipient::Variable))
    }

    fn repository_access(&mut self) -> ParseResult<Option<RepositoryAccess>> {
        if let Some(clause) = self.checkout_clause()? {
            return Ok(Some(RepositoryAccess::Checkout(clause)));
        }
        if let Some(clause) = self.save_clause()? {
            return Ok(Some(RepositoryAccess::Save(clause)));
        }
        if let Some(clause) = self.discard_clause()? {
            return Ok(Some(RepositoryAccess::Discard(clause)));
        }
        Ok(self.notarize_clause()?.map(RepositoryAccess::Notarize))
    }

    fn checkout_clause(&mut self) -> ParseResult<Option<CheckoutClause>> {
        let mut attempt = self.begin("CheckoutClause");
        if !self.keyword(&mut attempt, "checkout")? {
            return self.abandon(attempt);
        }
        let Some(recipient) = self.recipient()? else {
            return self.abandon(attempt);
        };
        let level = self.at_level()?;
        if !self.expect_delimiter("from")? {
            return self.abandon(attempt);
        }
        let Some(name) = self.operand(attempt)? else {
            return Ok(None);
        };
        Ok(Some(CheckoutClause {
            recipient,
            level,
            name,
        }))
    }

    fn at_level(&mut self) -> ParseResult<Option<AtLevel>> {
        let mut attempt = self.begin("AtLevel");
        if !self.keyword(&mut attempt, "at")? || !self.expect_delimiter("level")? {
            return self.abandon(attempt);
        }
        Ok(self.operand(attempt)?.map(|level| AtLevel { level }))
    }

    fn save_clause(&mut self) -> ParseResult<Option<SaveClause>> {
        let mut attempt = self.begin("SaveClause");
        if !self.keyword(&mut attempt, "save")? {
            return self.abandon(attempt);
        }
        let Some(document) = self.operand(attempt)? else {
            return Ok(None);
        };
        if !self.expect_delimiter("as")? {
            return self.abandon(attempt);
        }
        let Some(recipient) = self.recipient()? else {
            return self.abandon(attempt);
        };
        Ok(Some(SaveClause {
            document,
            recipient,
        }))
    }

    fn discard_clause(&mut self) -> ParseResult<Option<DiscardClause>> {
        let mut attempt = self.begin("DiscardClause");
        if !self.keyword(&mut attempt, "discard")? {
            return self.abandon(attempt);
        }
        Ok(self
            .operand(attempt)?
            .map(|document| DiscardClause { document }))
    }

    fn notarize_clause(&mut self) -> ParseResult<Option<NotarizeClause>> {
        let mut attempt = self.begin("NotarizeClause");
        if !self.keyword(&mut attempt, "notarize")? {
            return self.abandon(attempt);
        }
        let Some(document) = self.operand(attempt)? else {
            return Ok(None);
        };
        if !self.expect_delimiter("as")? {
            return self.abandon(attempt);
        }
        let Some(name) = self.operand(attempt)? else {
            return Ok(None);
        };
        Ok(Some(NotarizeClause { document, name }))
    }

    fn message_handling(&mut self) -> ParseResult<Option<MessageHandling>> {
        if let Some(clause) = self.post_clause()? {
            return Ok(Some(MessageHandling::Post(clause)));
        }
        if let Some(clause) = self.retrieve_clause()? {
            return Ok(Some(MessageHandling::Retrieve(clause)));
        }
        if let Some(clause) = self.accept_clause()? {
            return Ok(Some(MessageHandling::Accept(clause)));
        }
        if let Some(clause) = self.reject_clause()? {
            return Ok(Some(MessageHandling::Reject(clause)));
        }
        Ok(self.publish_clause()?.map(MessageHandling::Publish))
    }

    fn post_clause(&mut self) -> ParseResult<Option<PostClause>> {
        let mut attempt = self.begin("PostClause");
        if !self.keyword(&mut attempt, "post")? {
            return self.abandon(attempt);
        }
        let Some(message) = self.operand(attempt)? else {
            return Ok(None);
        };
        if !self.expect_delimiter("to")? {
            return self.abandon(attempt);
        }
        let Some(bag) = self.operand(attempt)? else {
            return Ok(None);
        };
        Ok(Some(PostClause { message, bag }))
    }

    fn retrieve_clause(&mut self) -> ParseResult<Option<RetrieveClause>> {
        let mut attempt = self.begin("RetrieveClause");
        if !self.keyword(&mut attempt, "retrieve")? {
            return self.abandon(attempt);
        }
        let Some(recipient) = self.recipient()? else {
            return self.abandon(attempt);
        };
        if !self.expect_delimiter("from")? {
            return self.abandon(attempt);
        }
        let Some(bag) = self.operand(attempt)? else {
            return Ok(None);
        };
        Ok(Some(RetrieveClause { recipient, bag }))
    }

    fn accept_clause(&mut self) -> ParseResult<Option<AcceptClause>> {
        let mut attempt = self.begin("AcceptClause");
        if !self.keyword(&mut attempt, "accept")? {
            return self.abandon(attempt);
        }
        Ok(self
            .operand(attempt)?
            .map(|message| AcceptClause { message }))
    }

    fn reject_clause(&mut self) -> ParseResult<Option<RejectClause>> {
        let mut attempt = self.begin("RejectClause");
        if !self.keyword(&mut attempt, "reject")? {
            return self.abandon(attempt);
        }
        Ok(self
            .operand(attempt)?
            .map(|message| RejectClause { message }))
    }

    fn publish_clause(&mut self) -> ParseResult<Option<PublishClause>> {
        let mut attempt = self.begin("PublishClause");
        if !self.keyword(&mut attempt, "publish")? {
            return self.abandon(attempt);
        }
        Ok(self.operand(attempt)?.map(|event| PublishClause { event }))
    }
}
