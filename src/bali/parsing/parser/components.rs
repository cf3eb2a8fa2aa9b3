//! Documents, components, entities and literal leaves

use super::Parser;
use crate::bali::ast::{Component, Document, Element, Entity, Primitive, Text};
use crate::bali::lexing::indentation::dedent;
use crate::bali::parsing::ParseResult;
use crate::bali::token::{Token, TokenKind};

impl<I: Iterator<Item = Token>> Parser<'_, I> {
    /// The root rule. Nothing can rewind past it, so it takes no save-point.
    pub(crate) fn document(&mut self) -> ParseResult<Option<Document>> {
        let comment = self
            .expect_kind(TokenKind::Comment)?
            .map(|token| dedent(&token.text));
        Ok(self
            .component()?
            .map(|component| Document::new(comment, component)))
    }

    pub(crate) fn component(&mut self) -> ParseResult<Option<Component>> {
        let Some(entity) = self.entity()? else {
            return Ok(None);
        };
        let parameters = self.parameters()?;
        Ok(Some(Component::new(entity, parameters)))
    }

    fn entity(&mut self) -> ParseResult<Option<Entity>> {
        if let Some(element) = self.element()? {
            return Ok(Some(Entity::Element(element)));
        }
        if let Some(text) = self.text()? {
            return Ok(Some(Entity::Text(text)));
        }
        if let Some(collection) = self.collection()? {
            return Ok(Some(Entity::Collection(Box::new(collection))));
        }
        if let Some(procedure) = self.procedure()? {
            return Ok(Some(Entity::Procedure(Box::new(procedure))));
        }
        Ok(None)
    }

    fn element(&mut self) -> ParseResult<Option<Element>> {
        Ok(self
            .expect_any_kind(TokenKind::ELEMENTS)?
            .map(|token| Element::new(token.kind, dedent(&token.text))))
    }

    /// The `String` rule.
    fn text(&mut self) -> ParseResult<Option<Text>> {
        Ok(self
            .expect_any_kind(TokenKind::STRINGS)?
            .map(|token| Text::new(token.kind, dedent(&token.text))))
    }

    pub(crate) fn primitive(&mut self) -> ParseResult<Option<Primitive>> {
        if let Some(element) = self.element()? {
            return Ok(Some(Primitive::Element(element)));
        }
        Ok(self.text()?.map(Primitive::Text))
    }
}
