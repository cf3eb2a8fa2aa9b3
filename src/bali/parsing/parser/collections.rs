//! Ranges, catalogs, lists and parameters

use once_cell::sync::Lazy;

use super::{Attempt, Parser};
use crate::bali::ast::{
    AdditionalAssociation, AdditionalValue, AnnotatedAssociation, AnnotatedValue, Association,
    Associations, Catalog, Collection, InlineAssociations, InlineValues, List,
    MultilineAssociations, MultilineValues, NoAssociations, NoValues, Parameters, Range, Values,
};
use crate::bali::grammar;
use crate::bali::parsing::ParseResult;
use crate::bali::token::{Token, TokenKind};

static LEFT_BRACKETS: Lazy<Vec<&str>> = Lazy::new(|| grammar::choices("LeftBracket"));
static RIGHT_BRACKETS: Lazy<Vec<&str>> = Lazy::new(|| grammar::choices("RightBracket"));

impl<I: Iterator<Item = Token>> Parser<'_, I> {
    pub(crate) fn collection(&mut self) -> ParseResult<Option<Collection>> {
        if let Some(range) = self.range()? {
            return Ok(Some(Collection::Range(range)));
        }
        if let Some(catalog) = self.catalog()? {
            return Ok(Some(Collection::Catalog(catalog)));
        }
        Ok(self.list()?.map(Collection::List))
    }

    /// Nothing in a range commits, so a failed range always rewinds.
    fn range(&mut self) -> ParseResult<Option<Range>> {
        let attempt = self.begin("Range");
        let Some(left) = self.expect_one_of(&LEFT_BRACKETS)? else {
            return self.abandon(attempt);
        };
        let Some(first) = self.primitive()? else {
            return self.abandon(attempt);
        };
        if !self.expect_delimiter("..")? {
            return self.abandon(attempt);
        }
        let Some(last) = self.primitive()? else {
            return self.abandon(attempt);
        };
        let Some(right) = self.expect_one_of(&RIGHT_BRACKETS)? else {
            return self.abandon(attempt);
        };
        Ok(Some(Range::new(left, first, last, right)))
    }

    fn catalog(&mut self) -> ParseResult<Option<Catalog>> {
        let mut attempt = self.begin("Catalog");
        if !self.expect_delimiter("[")? {
            return self.abandon(attempt);
        }
        let Some(associations) = self.associations(&mut attempt)? else {
            return self.abandon(attempt);
        };
        if !self.expect_delimiter("]")? {
            return self.abandon(attempt);
        }
        Ok(Some(Catalog { associations }))
    }

    /// The associations of a catalog or parameter list. The `owner` attempt commits as
    /// soon as the first association has been read.
    fn associations(&mut self, owner: &mut Attempt) -> ParseResult<Option<Associations>> {
        if let Some(multiline) = self.multiline_associations(owner)? {
            return Ok(Some(Associations::Multiline(multiline)));
        }
        if let Some(inline) = self.inline_associations(owner)? {
            return Ok(Some(Associations::Inline(inline)));
        }
        let Some(empty) = self.no_associations()? else {
            return Ok(None);
        };
        self.commit(owner);
        Ok(Some(Associations::Empty(empty)))
    }

    fn multiline_associations(
        &mut self,
        owner: &mut Attempt,
    ) -> ParseResult<Option<MultilineAssociations>> {
        let mut attempt = self.begin("MultilineAssociations");
        if self.expect_kind(TokenKind::Newline)?.is_none() {
            return self.abandon(attempt);
        }
        let Some(first) = self.annotated_association()? else {
            return self.abandon(attempt);
        };
        self.commit(&mut attempt);
        self.commit(owner);
        let mut lines = vec![first];
        lines.extend(self.repeat(Self::annotated_association)?);
        Ok(Some(MultilineAssociations { lines }))
    }

    fn annotated_association(&mut self) -> ParseResult<Option<AnnotatedAssociation>> {
        let mut attempt = self.begin("AnnotatedAssociation");
        let Some(association) = self.association()? else {
            return self.abandon(attempt);
        };
        self.commit(&mut attempt);
        let note = self.expect_kind(TokenKind::Note)?.map(|token| token.text);
        if self.expect_kind(TokenKind::Newline)?.is_none() {
            return self.abandon(attempt);
        }
        Ok(Some(AnnotatedAssociation { association, note }))
    }

    fn inline_associations(
        &mut self,
        owner: &mut Attempt,
    ) -> ParseResult<Option<InlineAssociations>> {
        let Some(association) = self.association()? else {
            return Ok(None);
        };
        self.commit(owner);
        let additional = self.repeat(Self::additional_association)?;
        Ok(Some(InlineAssociations {
            association,
            additional,
        }))
    }

    fn additional_association(&mut self) -> ParseResult<Option<AdditionalAssociation>> {
        let attempt = self.begin("AdditionalAssociation");
        if !self.expect_delimiter(",")? {
            return self.abandon(attempt);
        }
        let Some(association) = self.association()? else {
            return self.abandon(attempt);
        };
        Ok(Some(AdditionalAssociation { association }))
    }

    fn no_associations(&mut self) -> ParseResult<Option<NoAssociations>> {
        Ok(self.expect_delimiter(":")?.then_some(NoAssociations))
    }

    fn association(&mut self) -> ParseResult<Option<Association>> {
        let attempt = self.begin("Association");
        let Some(key) = self.primitive()? else {
            return self.abandon(attempt);
        };
        if !self.expect_delimiter(":")? {
            return self.abandon(attempt);
        }
        let Some(value) = self.component()? else {
            return self.abandon(attempt);
        };
        Ok(Some(Association::new(key, value)))
    }

    fn list(&mut self) -> ParseResult<Option<List>> {
        let mut attempt = self.begin("List");
        if !self.expect_delimiter("[")? {
            return self.abandon(attempt);
        }
        // `Values` always matches.
        self.commit(&mut attempt);
        let values = self.values()?;
        if !self.expect_delimiter("]")? {
            return self.abandon(attempt);
        }
        Ok(Some(List { values }))
    }

    /// Always matches: an empty list has `NoValues`.
    fn values(&mut self) -> ParseResult<Values> {
        if let Some(multiline) = self.multiline_values()? {
            return Ok(Values::Multiline(multiline));
        }
        if let Some(inline) = self.inline_values()? {
            return Ok(Values::Inline(inline));
        }
        Ok(Values::Empty(NoValues))
    }

    fn multiline_values(&mut self) -> ParseResult<Option<MultilineValues>> {
        let mut attempt = self.begin("MultilineValues");
        if self.expect_kind(TokenKind::Newline)?.is_none() {
            return self.abandon(attempt);
        }
        let Some(first) = self.annotated_value()? else {
            return self.abandon(attempt);
        };
        self.commit(&mut attempt);
        let mut lines = vec![first];
        lines.extend(self.repeat(Self::annotated_value)?);
        Ok(Some(MultilineValues { lines }))
    }

    fn annotated_value(&mut self) -> ParseResult<Option<AnnotatedValue>> {
        let mut attempt = self.begin("AnnotatedValue");
        let Some(value) = self.component()? else {
            return self.abandon(attempt);
        };
        self.commit(&mut attempt);
        let note = self.expect_kind(TokenKind::Note)?.map(|token| token.text);
        if self.expect_kind(TokenKind::Newline)?.is_none() {
            return self.abandon(attempt);
        }
        Ok(Some(AnnotatedValue { value, note }))
    }

    fn inline_values(&mut self) -> ParseResult<Option<InlineValues>> {
        let Some(value) = self.component()? else {
            return Ok(None);
        };
        let additional = self.repeat(Self::additional_value)?;
        Ok(Some(InlineValues {
            value: Box::new(value),
            additional,
        }))
    }

    fn additional_value(&mut self) -> ParseResult<Option<AdditionalValue>> {
        let attempt = self.begin("AdditionalValue");
        if !self.expect_delimiter(",")? {
            return self.abandon(attempt);
        }
        let Some(value) = self.component()? else {
            return self.abandon(attempt);
        };
        Ok(Some(AdditionalValue { value }))
    }

    pub(crate) fn parameters(&mut self) -> ParseResult<Option<Parameters>> {
        let mut attempt = self.begin("Parameters");
        if !self.expect_delimiter("(")? {
            return self.abandon(attempt);
        }
        let Some(associations) = self.associations(&mut attempt)? else {
            return self.abandon(attempt);
        };
        if !self.expect_delimiter(")")? {
            return self.abandon(attempt);
        }
        Ok(Some(Parameters { associations }))
    }
}
