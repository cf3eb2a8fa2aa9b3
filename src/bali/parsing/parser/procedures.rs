//! Procedures, statement blocks and statements

use super::Parser;
use crate::bali::ast::{
    AdditionalStatement, AnnotatedStatement, CommentLine, InlineStatements, MatchHandler,
    MultilineStatements, NoStatements, OnClause, Procedure, Statement, StatementLine, Statements,
};
use crate::bali::lexing::indentation::dedent;
use crate::bali::parsing::ParseResult;
use crate::bali::token::{Token, TokenKind};

impl<I: Iterator<Item = Token>> Parser<'_, I> {
    pub(crate) fn procedure(&mut self) -> ParseResult<Option<Procedure>> {
        let mut attempt = self.begin("Procedure");
        if !self.expect_delimiter("{")? {
            return self.abandon(attempt);
        }
        // `Statements` always matches.
        self.commit(&mut attempt);
        let statements = self.statements()?;
        if !self.expect_delimiter("}")? {
            return self.abandon(attempt);
        }
        Ok(Some(Procedure { statements }))
    }

    fn statements(&mut self) -> ParseResult<Statements> {
        if let Some(multiline) = self.multiline_statements()? {
            return Ok(Statements::Multiline(multiline));
        }
        if let Some(inline) = self.inline_statements()? {
            return Ok(Statements::Inline(inline));
        }
        Ok(Statements::Empty(NoStatements))
    }

    fn multiline_statements(&mut self) -> ParseResult<Option<MultilineStatements>> {
        let mut attempt = self.begin("MultilineStatements");
        if self.expect_kind(TokenKind::Newline)?.is_none() {
            return self.abandon(attempt);
        }
        let Some(first) = self.annotated_statement()? else {
            return self.abandon(attempt);
        };
        self.commit(&mut attempt);
        let mut lines = vec![first];
        lines.extend(self.repeat(Self::annotated_statement)?);
        Ok(Some(MultilineStatements { lines }))
    }

    fn annotated_statement(&mut self) -> ParseResult<Option<AnnotatedStatement>> {
        if let Some(comment) = self.comment_line()? {
            return Ok(Some(AnnotatedStatement::Comment(comment)));
        }
        Ok(self.statement_line()?.map(AnnotatedStatement::Statement))
    }

    fn comment_line(&mut self) -> ParseResult<Option<CommentLine>> {
        let attempt = self.begin("CommentLine");
        let Some(comment) = self.expect_kind(TokenKind::Comment)? else {
            return self.abandon(attempt);
        };
        if self.expect_kind(TokenKind::Newline)?.is_none() {
            return self.abandon(attempt);
        }
        Ok(Some(CommentLine {
            comment: dedent(&comment.text),
        }))
    }

    fn statement_line(&mut self) -> ParseResult<Option<StatementLine>> {
        let mut attempt = self.begin("StatementLine");
        self.skip_layout();
        let Some(statement) = self.within_line(Self::statement)? else {
            return self.abandon(attempt);
        };
        self.commit(&mut attempt);
        let note = self.expect_kind(TokenKind::Note)?.map(|token| token.text);
        if self.expect_kind(TokenKind::Newline)?.is_none() {
            return self.abandon(attempt);
        }
        Ok(Some(StatementLine { statement, note }))
    }

    fn inline_statements(&mut self) -> ParseResult<Option<InlineStatements>> {
        let Some(statement) = self.statement()? else {
            return Ok(None);
        };
        let additional = self.repeat(Self::additional_statement)?;
        Ok(Some(InlineStatements {
            statement,
            additional,
        }))
    }

    fn additional_statement(&mut self) -> ParseResult<Option<AdditionalStatement>> {
        let attempt = self.begin("AdditionalStatement");
        if !self.expect_delimiter(";")? {
            return self.abandon(attempt);
        }
        let Some(statement) = self.statement()? else {
            return self.abandon(attempt);
        };
        Ok(Some(AdditionalStatement { statement }))
    }

    fn statement(&mut self) -> ParseResult<Option<Statement>> {
        let Some(main_clause) = self.main_clause()? else {
            return Ok(None);
        };
        let on_clause = self.on_clause()?;
        Ok(Some(Statement::new(main_clause, on_clause)))
    }

    fn on_clause(&mut self) -> ParseResult<Option<OnClause>> {
        let mut attempt = self.begin("OnClause");
        if !self.keyword(&mut attempt, "on")? {
            return self.abandon(attempt);
        }
        let Some(failure) = self.expect_kind(TokenKind::Symbol)? else {
            return self.abandon(attempt);
        };
        let handlers = self.repeat(Self::match_handler)?;
        if handlers.is_empty() {
            return self.abandon(attempt);
        }
        Ok(Some(OnClause {
            failure: failure.text,
            handlers,
        }))
    }

    pub(crate) fn match_handler(&mut self) -> ParseResult<Option<MatchHandler>> {
        let mut attempt = self.begin("MatchHandler");
        if !self.keyword(&mut attempt, "matching")? {
            return self.abandon(attempt);
        }
        let Some(template) = self.expression()? else {
            return self.abandon(attempt);
        };
        if !self.expect_delimiter("do")? {
            return self.abandon(attempt);
        }
        let Some(procedure) = self.procedure()? else {
            return self.abandon(attempt);
        };
        Ok(Some(MatchHandler {
            template,
            procedure,
        }))
    }
}
