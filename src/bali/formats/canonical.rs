//! Canonical source text
//!
//!     The canonical formatter turns a tree back into source. Each tree has exactly one
//!     canonical rendering, which is the byte sequence that gets digested and signed, so
//!     the layout here must never depend on anything but the tree:
//!
//!         - single spaces between keywords and operands
//!         - `, ` between inline items and `; ` between inline statements
//!         - multi-line containers put each item on its own line, four spaces deeper than
//!           the container, and close on a line of their own at the container's depth
//!         - a note follows its item after two spaces
//!         - no trailing newline
//!
//!     Multi-line literals are stored dedented and get the current depth's indentation
//!     re-applied when written.

use std::convert::Infallible;

use crate::bali::ast::*;
use crate::bali::lexing::indentation::{indent, INDENTATION};
use crate::bali::token::TokenKind;
use crate::bali::visiting::{visit, Processor};

/// Render `document` in canonical form.
pub fn format_canonical(document: &Document) -> String {
    let mut formatter = CanonicalFormatter::default();
    match visit(document, &mut formatter) {
        Ok(()) => formatter.finish(),
        Err(never) => match never {},
    }
}

/// The processor behind [`format_canonical`].
#[derive(Debug, Default)]
pub struct CanonicalFormatter {
    buffer: String,
    depth: usize,
}

impl CanonicalFormatter {
    pub fn finish(self) -> String {
        self.buffer
    }

    fn write(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn new_line(&mut self) {
        self.buffer.push('\n');
        for _ in 0..self.depth {
            self.buffer.push_str(INDENTATION);
        }
    }

    fn open_lines(&mut self) {
        self.depth += 1;
    }

    fn close_lines(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.new_line();
    }
}

/// An inversion whose operand starts with a digit must keep a space, or `- 5` would
/// come back as the number `-5`.
fn needs_separation(inversion: &Inversion) -> bool {
    let Subject::Component(component) = inversion.subject.as_ref() else {
        return false;
    };
    match &component.entity {
        Entity::Element(element) => element.value.starts_with(|c: char| c.is_ascii_digit()),
        _ => false,
    }
}

impl Processor for CanonicalFormatter {
    type Error = Infallible;

    fn preprocess(
        &mut self,
        node: Node<'_>,
        _index: usize,
        _size: usize,
    ) -> Result<(), Infallible> {
        match node {
            Node::Catalog(_) | Node::List(_) => self.write("["),
            Node::Parameters(_) => self.write("("),
            Node::Procedure(_) => self.write("{"),
            Node::NoAssociations(_) => self.write(":"),
            Node::NoValues(_) | Node::NoStatements(_) | Node::InlineStatements(_) => {
                self.write(" ")
            }
            Node::MultilineAssociations(_)
            | Node::MultilineValues(_)
            | Node::MultilineStatements(_) => self.open_lines(),
            Node::AnnotatedAssociation(_)
            | Node::AnnotatedValue(_)
            | Node::AnnotatedStatement(_) => self.new_line(),
            Node::AdditionalAssociation(_)
            | Node::AdditionalValue(_)
            | Node::AdditionalArgument(_)
            | Node::AdditionalIndex(_) => self.write(", "),
            Node::AdditionalStatement(_) => self.write("; "),
            Node::OnClause(_) => self.write("on "),
            Node::MatchHandler(_) => self.write(" matching "),
            Node::IfClause(_) => self.write("if "),
            Node::SelectClause(_) => self.write("select "),
            Node::WhileClause(_) => self.write("while "),
            Node::WithClause(_) => self.write("with each "),
            Node::ContinueClause(_) => self.write("continue loop"),
            Node::BreakClause(_) => self.write("break loop"),
            Node::ReturnClause(_) => self.write("return "),
            Node::ThrowClause(_) => self.write("throw "),
            Node::LetClause(_) => self.write("let "),
            Node::CheckoutClause(_) => self.write("checkout "),
            Node::AtLevel(_) => self.write("at level "),
            Node::SaveClause(_) => self.write("save "),
            Node::DiscardClause(_) => self.write("discard "),
            Node::NotarizeClause(_) => self.write("notarize "),
            Node::PostClause(_) => self.write("post "),
            Node::RetrieveClause(_) => self.write("retrieve "),
            Node::AcceptClause(_) => self.write("accept "),
            Node::RejectClause(_) => self.write("reject "),
            Node::PublishClause(_) => self.write("publish "),
            Node::Predicate(_) => self.write(" "),
            Node::Referent(_) => self.write("@"),
            Node::Precedence(_) => self.write("("),
            Node::Magnitude(_) => self.write("|"),
            Node::Complement(_) => self.write("not "),
            _ => {}
        }
        Ok(())
    }

    fn process_slot(&mut self, node: Node<'_>, slot: usize) -> Result<(), Infallible> {
        match (node, slot) {
            (Node::Document(document), 1) if document.comment.is_some() => self.write("\n"),
            (Node::Range(_), 2) => self.write(".."),
            (Node::Association(_), 1) => self.write(": "),
            (Node::AnnotatedAssociation(line), 1) if line.note.is_some() => self.write("  "),
            (Node::AnnotatedValue(line), 1) if line.note.is_some() => self.write("  "),
            (Node::StatementLine(line), 1) if line.note.is_some() => self.write("  "),
            (Node::Statement(statement), 1) if statement.on_clause.is_some() => self.write(" "),
            (Node::MatchHandler(_), 1) => self.write(" do "),
            (Node::IfClause(_), 1) | (Node::WhileClause(_), 1) => self.write(" do "),
            (Node::WithClause(_), 1) => self.write(" in "),
            (Node::WithClause(_), 2) => self.write(" do "),
            (Node::LetClause(_), _) => self.write(" "),
            (Node::CheckoutClause(clause), 1) if clause.level.is_some() => self.write(" "),
            (Node::CheckoutClause(_), 2) => self.write(" from "),
            (Node::SaveClause(_), 1) | (Node::NotarizeClause(_), 1) => self.write(" as "),
            (Node::PostClause(_), 1) => self.write(" to "),
            (Node::RetrieveClause(_), 1) => self.write(" from "),
            (Node::Predicate(_), 1) => self.write(" "),
            (Node::Inversion(inversion), 1) if needs_separation(inversion) => self.write(" "),
            (Node::Function(_), 1) | (Node::Method(_), 3) => self.write("("),
            (Node::Attribute(_), 1) => self.write("["),
            _ => {}
        }
        Ok(())
    }

    fn postprocess(
        &mut self,
        node: Node<'_>,
        _index: usize,
        _size: usize,
    ) -> Result<(), Infallible> {
        match node {
            Node::Catalog(_) | Node::List(_) | Node::Attribute(_) => self.write("]"),
            Node::Parameters(_) | Node::Precedence(_) | Node::Function(_) | Node::Method(_) => {
                self.write(")")
            }
            Node::Procedure(_) => self.write("}"),
            Node::InlineStatements(_) => self.write(" "),
            Node::Magnitude(_) => self.write("|"),
            Node::MultilineAssociations(_)
            | Node::MultilineValues(_)
            | Node::MultilineStatements(_) => self.close_lines(),
            _ => {}
        }
        Ok(())
    }

    fn process_token(&mut self, _kind: TokenKind, text: &str) -> Result<(), Infallible> {
        let text = indent(text, self.depth);
        self.write(&text);
        Ok(())
    }
}
