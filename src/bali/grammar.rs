//! Rule Catalog
//!
//! The notation's grammar, one production per rule, in the order the rules are
//! introduced. The parser does not interpret these strings; they are used to name the
//! expected construct in syntax errors and to check that every one-of rule lists its
//! alternatives in an order a first-match parser can honour.
//!
//! # Production Syntax
//!
//! - Capitalized words are rules, lower-case words are token kinds
//! - Quoted text is a delimiter token with exactly that text
//! - `?`, `*` and `+` follow an item to make it optional or repeated
//! - `|` separates the alternatives of a one-of rule
//! - An empty production matches nothing and always succeeds
//!
//! # Alternation Order
//!
//! The parser tries alternatives in catalog order and takes the first that matches. Two
//! orderings can never be right:
//!
//! 1. an alternative that is exactly one token, placed before a later alternative that
//!    can begin with that same token (the later one would never be reached with its
//!    longer match)
//! 2. an alternative that can match nothing, placed anywhere but last
//!
//! [`alternation_conflicts`] reports both. Overlap between multi-token alternatives is
//! fine because the parser rewinds when a speculative attempt fails.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Every rule of the notation with its production text.
pub const RULES: &[(&str, &str)] = &[
    // Documents and components
    ("Document", "comment? Component"),
    ("Component", "Entity Parameters?"),
    ("Entity", "Element | String | Collection | Procedure"),
    (
        "Element",
        "angle | boolean | duration | moment | number | pattern | percentage | probability | resource | symbol | tag",
    ),
    ("String", "binary | bytecode | moniker | narrative | quote | version"),
    ("Primitive", "Element | String"),
    // Collections
    ("Collection", "Range | Catalog | List"),
    ("Range", "LeftBracket Primitive \"..\" Primitive RightBracket"),
    ("LeftBracket", "\"[\" | \"(\""),
    ("RightBracket", "\"]\" | \")\""),
    ("Catalog", "\"[\" Associations \"]\""),
    (
        "Associations",
        "MultilineAssociations | InlineAssociations | NoAssociations",
    ),
    ("MultilineAssociations", "newline AnnotatedAssociation+"),
    ("AnnotatedAssociation", "Association note? newline"),
    ("InlineAssociations", "Association AdditionalAssociation*"),
    ("AdditionalAssociation", "\",\" Association"),
    ("NoAssociations", "\":\""),
    ("Association", "Primitive \":\" Component"),
    ("List", "\"[\" Values \"]\""),
    ("Values", "MultilineValues | InlineValues | NoValues"),
    ("MultilineValues", "newline AnnotatedValue+"),
    ("AnnotatedValue", "Component note? newline"),
    ("InlineValues", "Component AdditionalValue*"),
    ("AdditionalValue", "\",\" Component"),
    ("NoValues", ""),
    ("Parameters", "\"(\" Associations \")\""),
    // Procedures
    ("Procedure", "\"{\" Statements \"}\""),
    (
        "Statements",
        "MultilineStatements | InlineStatements | NoStatements",
    ),
    ("MultilineStatements", "newline AnnotatedStatement+"),
    ("AnnotatedStatement", "CommentLine | StatementLine"),
    ("CommentLine", "comment newline"),
    ("StatementLine", "Statement note? newline"),
    ("InlineStatements", "Statement AdditionalStatement*"),
    ("AdditionalStatement", "\";\" Statement"),
    ("NoStatements", ""),
    ("Statement", "MainClause OnClause?"),
    ("OnClause", "\"on\" symbol MatchHandler+"),
    ("MatchHandler", "\"matching\" Expression \"do\" Procedure"),
    (
        "MainClause",
        "FlowControl | LetClause | RepositoryAccess | MessageHandling | Expression",
    ),
    // Clauses
    (
        "FlowControl",
        "IfClause | SelectClause | WhileClause | WithClause | ContinueClause | BreakClause | ReturnClause | ThrowClause",
    ),
    ("IfClause", "\"if\" Expression \"do\" Procedure"),
    ("SelectClause", "\"select\" Target MatchHandler+"),
    ("WhileClause", "\"while\" Expression \"do\" Procedure"),
    (
        "WithClause",
        "\"with\" \"each\" identifier \"in\" Expression \"do\" Procedure",
    ),
    ("ContinueClause", "\"continue\" \"loop\""),
    ("BreakClause", "\"break\" \"loop\""),
    ("ReturnClause", "\"return\" Expression"),
    ("ThrowClause", "\"throw\" Expression"),
    ("LetClause", "\"let\" Recipient Assign Expression"),
    (
        "Assign",
        "\":=\" | \"?=\" | \"+=\" | \"-=\" | \"*=\" | \"/=\"",
    ),
    ("Recipient", "Attribute | Variable"),
    (
        "RepositoryAccess",
        "CheckoutClause | SaveClause | DiscardClause | NotarizeClause",
    ),
    (
        "CheckoutClause",
        "\"checkout\" Recipient AtLevel? \"from\" Expression",
    ),
    ("AtLevel", "\"at\" \"level\" Expression"),
    ("SaveClause", "\"save\" Expression \"as\" Recipient"),
    ("DiscardClause", "\"discard\" Expression"),
    ("NotarizeClause", "\"notarize\" Expression \"as\" Expression"),
    (
        "MessageHandling",
        "PostClause | RetrieveClause | AcceptClause | RejectClause | PublishClause",
    ),
    ("PostClause", "\"post\" Expression \"to\" Expression"),
    ("RetrieveClause", "\"retrieve\" Recipient \"from\" Expression"),
    ("AcceptClause", "\"accept\" Expression"),
    ("RejectClause", "\"reject\" Expression"),
    ("PublishClause", "\"publish\" Expression"),
    // Expressions
    ("Expression", "Subject Predicate*"),
    ("Predicate", "Operator Subject"),
    (
        "Operator",
        "\"and\" | \"san\" | \"ior\" | \"xor\" | \"is\" | \"matches\" | \"<\" | \"=\" | \">\" | \"&\" | \"+\" | \"-\" | \"*\" | \"//\" | \"/\" | \"^\"",
    ),
    (
        "Subject",
        "Component | Target | Referent | Precedence | Inversion | Magnitude | Complement",
    ),
    ("Target", "Function | Method | Attribute | Variable"),
    ("Function", "identifier \"(\" Arguments? \")\""),
    (
        "Method",
        "identifier Invoke identifier \"(\" Arguments? \")\"",
    ),
    ("Invoke", "\".\" | \"<-\""),
    ("Arguments", "Expression AdditionalArgument*"),
    ("AdditionalArgument", "\",\" Expression"),
    ("Attribute", "identifier \"[\" Indices \"]\""),
    ("Indices", "Expression AdditionalIndex*"),
    ("AdditionalIndex", "\",\" Expression"),
    ("Variable", "identifier"),
    ("Referent", "\"@\" Subject"),
    ("Precedence", "\"(\" Expression \")\""),
    ("Inversion", "Inverse Subject"),
    ("Inverse", "\"-\" | \"*\""),
    ("Magnitude", "\"|\" Expression \"|\""),
    ("Complement", "\"not\" Subject"),
];

/// The production text of a rule.
pub fn production(rule: &str) -> Option<&'static str> {
    RULES
        .iter()
        .find(|(name, _)| *name == rule)
        .map(|(_, production)| *production)
}

/// The delimiters a single-token choice rule (`Operator`, `Assign`, ...) accepts, in
/// declaration order. Empty for every other rule.
pub fn choices(rule: &str) -> Vec<&'static str> {
    let Some(production) = production(rule) else {
        return Vec::new();
    };
    let mut literals = Vec::new();
    for alternative in alternatives(production) {
        match alternative.as_slice() {
            [Item {
                symbol: Symbol::Literal(text),
                quantifier: Quantifier::One,
            }] => literals.push(*text),
            _ => return Vec::new(),
        }
    }
    literals
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symbol<'a> {
    Rule(&'a str),
    Kind(&'a str),
    Literal(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quantifier {
    One,
    Optional,
    Many,
    AtLeastOne,
}

#[derive(Debug, Clone, Copy)]
struct Item<'a> {
    symbol: Symbol<'a>,
    quantifier: Quantifier,
}

impl Item<'_> {
    fn may_be_absent(&self) -> bool {
        matches!(self.quantifier, Quantifier::Optional | Quantifier::Many)
    }
}

type Alternative<'a> = Vec<Item<'a>>;

fn parse_item(word: &str) -> Item<'_> {
    let (body, quantifier) = match word.chars().last() {
        Some('?') => (&word[..word.len() - 1], Quantifier::Optional),
        Some('*') => (&word[..word.len() - 1], Quantifier::Many),
        Some('+') => (&word[..word.len() - 1], Quantifier::AtLeastOne),
        _ => (word, Quantifier::One),
    };
    let symbol = if let Some(literal) = body.strip_prefix('"').and_then(|b| b.strip_suffix('"')) {
        Symbol::Literal(literal)
    } else if body.starts_with(|c: char| c.is_ascii_uppercase()) {
        Symbol::Rule(body)
    } else {
        Symbol::Kind(body)
    };
    Item { symbol, quantifier }
}

/// Split a production into its alternatives. A quoted item ends with `"` unless it is
/// quantified, so `"?="` is never mistaken for an optional `"?=`.
fn alternatives(production: &str) -> Vec<Alternative<'_>> {
    let mut result = vec![Vec::new()];
    for word in production.split_whitespace() {
        if word == "|" {
            result.push(Vec::new());
        } else if let Some(current) = result.last_mut() {
            current.push(parse_item(word));
        }
    }
    result
}

/// FIRST sets and nullability for every rule of a catalog, computed to a fixed point.
struct Analysis<'a> {
    rules: BTreeMap<&'a str, Vec<Alternative<'a>>>,
    first: BTreeMap<&'a str, BTreeSet<String>>,
    nullable: BTreeSet<&'a str>,
}

fn terminal(symbol: Symbol<'_>) -> Option<String> {
    match symbol {
        Symbol::Kind(kind) => Some(kind.to_string()),
        Symbol::Literal(text) => Some(format!("\"{text}\"")),
        Symbol::Rule(_) => None,
    }
}

impl<'a> Analysis<'a> {
    fn new(catalog: &[(&'a str, &'a str)]) -> Self {
        let rules: BTreeMap<_, _> = catalog
            .iter()
            .map(|&(name, production)| (name, alternatives(production)))
            .collect();
        let mut analysis = Self {
            first: rules.keys().map(|name| (*name, BTreeSet::new())).collect(),
            nullable: BTreeSet::new(),
            rules,
        };
        loop {
            let mut changed = false;
            let names: Vec<&'a str> = analysis.rules.keys().copied().collect();
            for name in names {
                let alternatives = analysis.rules[name].clone();
                for alternative in &alternatives {
                    let first = analysis.first_of(alternative);
                    let entry = analysis.first.entry(name).or_default();
                    let before = entry.len();
                    entry.extend(first);
                    changed |= entry.len() != before;
                    if analysis.alternative_nullable(alternative) && analysis.nullable.insert(name)
                    {
                        changed = true;
                    }
                }
            }
            if !changed {
                return analysis;
            }
        }
    }

    fn symbol_nullable(&self, symbol: Symbol<'_>) -> bool {
        match symbol {
            Symbol::Rule(name) => self.nullable.contains(name),
            _ => false,
        }
    }

    fn alternative_nullable(&self, alternative: &[Item<'_>]) -> bool {
        alternative
            .iter()
            .all(|item| item.may_be_absent() || self.symbol_nullable(item.symbol))
    }

    fn symbol_first(&self, symbol: Symbol<'_>) -> BTreeSet<String> {
        match symbol {
            Symbol::Rule(name) => self.first.get(name).cloned().unwrap_or_default(),
            other => terminal(other).into_iter().collect(),
        }
    }

    fn first_of(&self, alternative: &[Item<'_>]) -> BTreeSet<String> {
        let mut first = BTreeSet::new();
        for item in alternative {
            first.extend(self.symbol_first(item.symbol));
            if !(item.may_be_absent() || self.symbol_nullable(item.symbol)) {
                break;
            }
        }
        first
    }

    /// Whether an alternative always consumes exactly one token.
    fn single_token(&self, alternative: &[Item<'_>], depth: usize) -> bool {
        let [item] = alternative else {
            return false;
        };
        if item.quantifier != Quantifier::One {
            return false;
        }
        match item.symbol {
            Symbol::Rule(name) if depth < self.rules.len() => self
                .rules
                .get(name)
                .is_some_and(|alts| alts.iter().all(|alt| self.single_token(alt, depth + 1))),
            Symbol::Rule(_) => false,
            _ => true,
        }
    }
}

/// An ordering problem in a one-of rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// A one-token alternative shadows a later alternative starting with the same token.
    Shadowed {
        rule: String,
        earlier: usize,
        later: usize,
        tokens: Vec<String>,
    },
    /// An alternative that matches nothing is followed by further alternatives.
    EmptyNotLast { rule: String, alternative: usize },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::Shadowed {
                rule,
                earlier,
                later,
                tokens,
            } => write!(
                f,
                "{rule}: alternative {} shadows alternative {} on {}",
                earlier + 1,
                later + 1,
                tokens.join(", ")
            ),
            Conflict::EmptyNotLast { rule, alternative } => write!(
                f,
                "{rule}: alternative {} can match nothing but is not last",
                alternative + 1
            ),
        }
    }
}

/// Check a catalog for alternatives a first-match parser would never reach.
pub fn conflicts_in(catalog: &[(&str, &str)]) -> Vec<Conflict> {
    let analysis = Analysis::new(catalog);
    let mut conflicts = Vec::new();
    for (name, _) in catalog {
        let alternatives = &analysis.rules[name];
        if alternatives.len() < 2 {
            continue;
        }
        for (i, earlier) in alternatives.iter().enumerate() {
            if i + 1 < alternatives.len() && analysis.alternative_nullable(earlier) {
                conflicts.push(Conflict::EmptyNotLast {
                    rule: name.to_string(),
                    alternative: i,
                });
            }
            if !analysis.single_token(earlier, 0) {
                continue;
            }
            let earlier_first = analysis.first_of(earlier);
            for (j, later) in alternatives.iter().enumerate().skip(i + 1) {
                let overlap: Vec<String> = earlier_first
                    .intersection(&analysis.first_of(later))
                    .cloned()
                    .collect();
                if !overlap.is_empty() {
                    conflicts.push(Conflict::Shadowed {
                        rule: name.to_string(),
                        earlier: i,
                        later: j,
                        tokens: overlap,
                    });
                }
            }
        }
    }
    conflicts
}

/// Check the notation's own catalog.
pub fn alternation_conflicts() -> Vec<Conflict> {
    conflicts_in(RULES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_no_ordering_conflicts() {
        let conflicts = alternation_conflicts();
        assert!(conflicts.is_empty(), "{conflicts:?}");
    }

    #[test]
    fn catalog_names_are_unique() {
        let names: BTreeSet<_> = RULES.iter().map(|(name, _)| *name).collect();
        assert_eq!(names.len(), RULES.len());
    }

    #[test]
    fn every_referenced_rule_is_defined() {
        for (name, production) in RULES {
            for alternative in alternatives(production) {
                for item in alternative {
                    if let Symbol::Rule(rule) = item.symbol {
                        assert!(production_exists(rule), "{name} refers to {rule}");
                    }
                }
            }
        }
    }

    fn production_exists(rule: &str) -> bool {
        super::production(rule).is_some()
    }

    #[test]
    fn quoted_items_keep_their_quantifier_characters() {
        let items = alternatives("\"?=\" | \"*\" | Parameters? Item* Other+");
        assert_eq!(items.len(), 3);
        assert_eq!(items[0][0].symbol, Symbol::Literal("?="));
        assert_eq!(items[1][0].symbol, Symbol::Literal("*"));
        assert_eq!(items[2][0].quantifier, Quantifier::Optional);
        assert_eq!(items[2][1].quantifier, Quantifier::Many);
        assert_eq!(items[2][2].quantifier, Quantifier::AtLeastOne);
    }

    #[test]
    fn first_sets_follow_nullable_prefixes() {
        let analysis = Analysis::new(RULES);
        let document = &analysis.first["Document"];
        assert!(document.contains("comment"));
        assert!(document.contains("\"[\""));
        assert!(document.contains("number"));
        assert!(analysis.nullable.contains("Values"));
        assert!(!analysis.nullable.contains("Associations"));
    }

    #[test]
    fn shadowing_single_token_is_reported() {
        let catalog = [
            ("Target", "Variable | Function"),
            ("Variable", "identifier"),
            ("Function", "identifier \"(\" \")\""),
        ];
        assert_eq!(
            conflicts_in(&catalog),
            vec![Conflict::Shadowed {
                rule: "Target".to_string(),
                earlier: 0,
                later: 1,
                tokens: vec!["identifier".to_string()],
            }]
        );
    }

    #[test]
    fn empty_alternative_must_be_last() {
        let catalog = [
            ("Values", "NoValues | InlineValues"),
            ("NoValues", ""),
            ("InlineValues", "number"),
        ];
        let conflicts = conflicts_in(&catalog);
        assert_eq!(
            conflicts,
            vec![Conflict::EmptyNotLast {
                rule: "Values".to_string(),
                alternative: 0,
            }]
        );
        assert_eq!(
            conflicts[0].to_string(),
            "Values: alternative 1 can match nothing but is not last"
        );
    }

    #[test]
    fn choice_rules_list_their_delimiters() {
        assert_eq!(choices("Invoke"), vec![".", "<-"]);
        assert_eq!(choices("LeftBracket"), vec!["[", "("]);
        assert_eq!(choices("Assign").len(), 6);
        assert!(choices("Values").is_empty());
        assert!(choices("Element").is_empty());
        assert!(choices("Nonexistent").is_empty());
    }
}
