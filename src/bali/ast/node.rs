//! Borrowed view of any node
//!
//! [`Node`] wraps a reference to one node of the tree and names the grammar rule it was
//! parsed from. Processors receive nodes through this view so a single hook can serve
//! every node type.

use super::elements::*;

/// Macro to generate the node view with its rule names and conversions
macro_rules! node_kinds {
    ($($variant:ident => $rule:literal);* $(;)?) => {
        /// A reference to a node, tagged with its type.
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum Node<'a> {
            $($variant(&'a $variant),)*
        }

        impl<'a> Node<'a> {
            /// The grammar rule this node was parsed from.
            pub fn rule(&self) -> &'static str {
                match self {
                    $(Node::$variant(_) => $rule,)*
                }
            }
        }

        $(
            impl<'a> From<&'a $variant> for Node<'a> {
                fn from(node: &'a $variant) -> Self {
                    Node::$variant(node)
                }
            }
        )*
    };
}

node_kinds! {
    Document => "Document";
    Component => "Component";
    Entity => "Entity";
    Element => "Element";
    Text => "String";
    Primitive => "Primitive";
    Collection => "Collection";
    Range => "Range";
    Catalog => "Catalog";
    Associations => "Associations";
    MultilineAssociations => "MultilineAssociations";
    AnnotatedAssociation => "AnnotatedAssociation";
    InlineAssociations => "InlineAssociations";
    AdditionalAssociation => "AdditionalAssociation";
    NoAssociations => "NoAssociations";
    Association => "Association";
    List => "List";
    Values => "Values";
    MultilineValues => "MultilineValues";
    AnnotatedValue => "AnnotatedValue";
    InlineValues => "InlineValues";
    AdditionalValue => "AdditionalValue";
    NoValues => "NoValues";
    Parameters => "Parameters";
    Procedure => "Procedure";
    Statements => "Statements";
    MultilineStatements => "MultilineStatements";
    AnnotatedStatement => "AnnotatedStatement";
    CommentLine => "CommentLine";
    StatementLine => "StatementLine";
    InlineStatements => "InlineStatements";
    AdditionalStatement => "AdditionalStatement";
    NoStatements => "NoStatements";
    Statement => "Statement";
    OnClause => "OnClause";
    MatchHandler => "MatchHandler";
    MainClause => "MainClause";
    FlowControl => "FlowControl";
    IfClause => "IfClause";
    SelectClause => "SelectClause";
    WhileClause => "WhileClause";
    WithClause => "WithClause";
    ContinueClause => "ContinueClause";
    BreakClause => "BreakClause";
    ReturnClause => "ReturnClause";
    ThrowClause => "ThrowClause";
    LetClause => "LetClause";
    Recipient => "Recipient";
    RepositoryAccess => "RepositoryAccess";
    CheckoutClause => "CheckoutClause";
    AtLevel => "AtLevel";
    SaveClause => "SaveClause";
    DiscardClause => "DiscardClause";
    NotarizeClause => "NotarizeClause";
    MessageHandling => "MessageHandling";
    PostClause => "PostClause";
    RetrieveClause => "RetrieveClause";
    AcceptClause => "AcceptClause";
    RejectClause => "RejectClause";
    PublishClause => "PublishClause";
    Expression => "Expression";
    Predicate => "Predicate";
    Subject => "Subject";
    Target => "Target";
    Function => "Function";
    Method => "Method";
    Arguments => "Arguments";
    AdditionalArgument => "AdditionalArgument";
    Attribute => "Attribute";
    Indices => "Indices";
    AdditionalIndex => "AdditionalIndex";
    Variable => "Variable";
    Referent => "Referent";
    Precedence => "Precedence";
    Inversion => "Inversion";
    Magnitude => "Magnitude";
    Complement => "Complement";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bali::grammar;
    use crate::bali::token::TokenKind;

    #[test]
    fn rule_names_come_from_the_catalog() {
        let element = Element::new(TokenKind::Number, "1");
        let text = Text::new(TokenKind::Quote, "\"a\"");
        let nodes = [
            Node::from(&element),
            Node::from(&text),
            Node::from(&NoValues),
            Node::from(&BreakClause),
        ];
        for node in nodes {
            assert!(
                grammar::production(node.rule()).is_some(),
                "{} is not a catalog rule",
                node.rule()
            );
        }
        assert_eq!(Node::from(&text).rule(), "String");
    }
}
