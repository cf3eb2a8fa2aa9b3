//! Boundary scenarios and parser decisions that callers rely on

use std::sync::Arc;
use std::thread;

use bali_notation::bali::ast::{
    Collection, Document, Entity, FlowControl, MainClause, Statements, Subject, Target,
};
use bali_notation::bali::formats::format_canonical;
use bali_notation::bali::lexing::scan;
use bali_notation::bali::parsing::{parse, parse_with, ParseError, ParserOptions};
use bali_notation::bali::token::TokenKind;
use bali_notation::bali::validation::validate;
use rstest::rstest;

fn collection(document: &Document) -> &Collection {
    match &document.component.entity {
        Entity::Collection(collection) => &**collection,
        other => panic!("expected a collection, got {other:?}"),
    }
}

#[rstest]
#[case::empty_list("[ ]", Some(0))]
#[case::empty_catalog("[:]", Some(0))]
#[case::inclusive_range("[1..1]", Some(1))]
#[case::exclusive_range("(1..1)", Some(0))]
#[case::half_open_range("[1..5)", Some(4))]
#[case::backwards_range("[5..1]", Some(0))]
#[case::symbolic_range("[$a..$z]", None)]
#[case::catalog("[$a: 1, $b: 2, $c: 3]", Some(3))]
fn collection_sizes(#[case] source: &str, #[case] size: Option<usize>) {
    let document = parse(source).unwrap();
    assert_eq!(collection(&document).size(), size);
}

#[test]
fn empty_list_and_empty_catalog_differ() {
    let list = parse("[ ]").unwrap();
    let catalog = parse("[:]").unwrap();
    assert!(matches!(collection(&list), Collection::List(_)));
    assert!(matches!(collection(&catalog), Collection::Catalog(_)));
}

#[test]
fn empty_procedure() {
    let document = parse("{ }").unwrap();
    let Entity::Procedure(procedure) = &document.component.entity else {
        panic!("expected a procedure");
    };
    assert!(procedure.statements.is_empty());
    assert_eq!(format_canonical(&document), "{ }");
}

#[test]
fn narrative_indentation_is_stripped_and_restored() {
    let source = "[\n    \">\n        line one\n        line two\n    <\"\n]";
    let document = parse(source).unwrap();
    let Collection::List(list) = collection(&document) else {
        panic!("expected a list");
    };
    let values: Vec<_> = list.values.iter().collect();
    let Entity::Text(text) = &values[0].entity else {
        panic!("expected a string");
    };
    assert_eq!(text.kind, TokenKind::Narrative);
    assert_eq!(text.value, "\">\n    line one\n    line two\n<\"");
    assert_eq!(format_canonical(&document), source);
}

#[test]
fn keyword_prefixed_identifiers_scan_whole() {
    let tokens: Vec<_> = scan("android").collect();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].text, "android");
}

fn returned(source: &str) -> Subject {
    let document = parse(source).unwrap_or_else(|e| panic!("{e}"));
    let Entity::Procedure(procedure) = document.component.entity else {
        panic!("expected a procedure");
    };
    let Statements::Inline(inline) = procedure.statements else {
        panic!("expected an inline statement");
    };
    match *inline.statement.main_clause {
        MainClause::FlowControl(FlowControl::Return(clause)) => clause.result.subject,
        other => panic!("expected a return clause, got {other:?}"),
    }
}

#[test]
fn earliest_alternative_wins_on_a_shared_prefix() {
    assert!(matches!(
        returned("{ return f(x) }"),
        Subject::Target(Target::Function(_))
    ));
    assert!(matches!(
        returned("{ return f }"),
        Subject::Target(Target::Variable(_))
    ));
}

#[test]
fn failed_alternatives_leave_the_stream_untouched() {
    // A range, then a catalog, read `[1` before the list succeeds with the same tokens.
    let document = parse("[1, 2]").unwrap();
    let Collection::List(list) = collection(&document) else {
        panic!("expected a list");
    };
    assert_eq!(list.values.len(), 2);
    // A function reads `f` and fails on the missing `(`, the attribute retries from `f`.
    assert!(matches!(
        returned("{ return f[1] }"),
        Subject::Target(Target::Attribute(_))
    ));
}

#[rstest]
#[case::unclosed_if("{ if x do }", "IfClause")]
#[case::unfinished_association("[$a: 1, $b]", "Catalog")]
#[case::select_without_handler("{ select x }", "SelectClause")]
#[case::with_without_each("{ with item in items do { } }", "WithClause")]
fn failures_after_commit_are_syntax_errors(#[case] source: &str, #[case] rule: &str) {
    let error = parse(source).unwrap_err();
    assert!(matches!(*error, ParseError::Syntax(_)), "{error}");
    assert_eq!(error.diagnostic().rule, Some(rule));
}

#[test]
fn scanning_modes_agree() {
    let source = "{\n    let x := [1, 2, 3]\n    with each n in x do {\n        post n to bag\n    }\n}";
    let inline = ParserOptions {
        concurrent: false,
        ..ParserOptions::default()
    };
    let rendezvous = ParserOptions {
        concurrent: true,
        queue_capacity: 0,
    };
    let expected = parse(source).unwrap();
    assert_eq!(parse_with(source, &inline).unwrap(), expected);
    assert_eq!(parse_with(source, &rendezvous).unwrap(), expected);
}

#[test]
fn one_tree_many_readers() {
    let document = Arc::new(parse("[\n    $a: { return x }\n    $b: [1..3)\n]").unwrap());
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let document = Arc::clone(&document);
            thread::spawn(move || {
                validate(&document).map(|()| format_canonical(&document))
            })
        })
        .collect();
    for reader in readers {
        let formatted = reader.join().unwrap().unwrap();
        assert_eq!(formatted, "[\n    $a: { return x }\n    $b: [1..3)\n]");
    }
}
