//! The processor interface
//!
//! Every hook has an empty default, so a processor only overrides the hooks it cares
//! about.

use crate::bali::ast::Node;
use crate::bali::token::TokenKind;

/// Receives the hooks of a [`Visitor`](super::Visitor) walk.
///
/// # Example
///
/// ```ignore
/// struct CountTokens(usize);
///
/// impl Processor for CountTokens {
///     type Error = std::convert::Infallible;
///
///     fn process_token(&mut self, _kind: TokenKind, _text: &str) -> Result<(), Self::Error> {
///         self.0 += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Processor {
    /// Returned by a hook to stop the walk. Processors that cannot fail use
    /// [`Infallible`](std::convert::Infallible).
    type Error;

    fn preprocess(
        &mut self,
        _node: Node<'_>,
        _index: usize,
        _size: usize,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn process_slot(&mut self, _node: Node<'_>, _slot: usize) -> Result<(), Self::Error> {
        Ok(())
    }

    fn postprocess(
        &mut self,
        _node: Node<'_>,
        _index: usize,
        _size: usize,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn process_token(&mut self, _kind: TokenKind, _text: &str) -> Result<(), Self::Error> {
        Ok(())
    }
}
