//! Canonical round trips
//!
//! Every source here is already in canonical form, so formatting its tree must give the
//! same bytes back. Loose sources are checked for idempotence instead: formatting once
//! settles the layout and a second pass changes nothing.

use bali_notation::bali::ast::{
    AnnotatedStatement, Component, Document, Entity, Expression, MainClause, MultilineStatements,
    Procedure, Statement, StatementLine, Statements, Subject,
};
use bali_notation::bali::formats::format_canonical;
use bali_notation::bali::parsing::parse;
use bali_notation::bali::validation::validate;
use proptest::prelude::*;
use rstest::rstest;

fn canonical(source: &str) -> String {
    let document = parse(source).unwrap_or_else(|e| panic!("{source:?} failed to parse:\n{e}"));
    format_canonical(&document)
}

#[rstest]
// Elements
#[case::angle("~pi")]
#[case::angle_number("~1.5")]
#[case::boolean("true")]
#[case::duration("~P1Y2M3DT4H5M6.5S")]
#[case::moment("<2024-01-02T03:04:05>")]
#[case::number("-1.5E10")]
#[case::imaginary("3i")]
#[case::pattern("\"^[a-z]+$\"?")]
#[case::pattern_none("none")]
#[case::percentage("12.5%")]
#[case::probability(".25")]
#[case::resource("<https://bali-nebula.net/>")]
#[case::symbol("$name-2")]
#[case::tag("#ABC123")]
// Strings
#[case::binary("'AbC+/=='")]
#[case::bytecode("'[0a1b 2c3d]'")]
#[case::moniker("/bali/types/Document/v1")]
#[case::narrative("\">\n    line one\n    line two\n<\"")]
#[case::quote("\"hello \\\"world\\\"\"")]
#[case::version("v1.2.3")]
// Collections
#[case::empty_list("[ ]")]
#[case::empty_catalog("[:]")]
#[case::inline_list("[1, 2, 3]")]
#[case::inline_catalog("[$a: 1, $b: \"two\"]")]
#[case::inclusive_range("[1..3]")]
#[case::mixed_range("(0..1]")]
#[case::multiline_list("[\n    1\n    2  ! two\n]")]
#[case::nested_catalog("[\n    $a: 1  ! one\n    $b: [\n        true\n        [$c: v2]\n    ]\n]")]
#[case::parameters("[1, 2]($type: /bali/types/List/v1)")]
#[case::multiline_binary("[\n    '\n        AbCd\n        EfGh\n    '\n]")]
#[case::document_comment("!>\nDocument comment\n<!\n[1, 2]")]
// Procedures
#[case::empty_procedure("{ }")]
#[case::inline_statements("{ let x := 1; let y += x }")]
#[case::multiline_statements(
    "{\n    let total := 0\n    with each item in items do {\n        let total += item\n    }\n}"
)]
#[case::comment_line("{\n    !>\n    A comment\n    <!\n    return none\n}")]
#[case::noted_statement("{\n    if ready do {\n        post message to bag  ! deliver\n    }\n    return ready\n}")]
// Clauses
#[case::if_clause("{ if x > 1 do { return true } }")]
#[case::select_clause(
    "{ select color matching \"red\" do { return 1 } matching \"blue\" do { return 2 } }"
)]
#[case::while_clause("{ while count < 10 do { let count += 1 } }")]
#[case::with_clause("{ with each item in items do { post item to bag } }")]
#[case::loop_control("{ continue loop; break loop }")]
#[case::throw_clause("{ throw [$exception: $failed] }")]
#[case::let_into_attribute("{ let x[1] *= 2; let y ?= 5 }")]
#[case::checkout_at_level("{ checkout document at level 2 from /acme/documents/v1 }")]
#[case::checkout("{ checkout document from name }")]
#[case::save_clause("{ save document as citation }")]
#[case::discard_clause("{ discard document }")]
#[case::notarize_clause("{ notarize document as /acme/contracts/v2 }")]
#[case::retrieve_clause("{ retrieve message from bag }")]
#[case::message_clauses("{ accept message; reject message; publish event }")]
#[case::on_clause("{ let x := f() on $failure matching $timeout do { return none } }")]
// Expressions
#[case::calls("{ return f(1, 2) + list.size() - bag<-pop() }")]
#[case::attribute_and_referent("{ return x[1, 2] & @y }")]
#[case::prefixed_subjects("{ return -x * (a + b) / |c| }")]
#[case::complement("{ return not done and ready }")]
#[case::operators("{ return a matches b xor c is d san e ior f ^ g // h = i }")]
#[case::inverted_number("{ return - 5 }")]
#[case::line_after_a_variable("{\n    x\n    -y\n}")]
#[case::list_after_a_variable("{\n    x\n    [1, 2]\n}")]
#[case::precedence_after_a_variable("{\n    f\n    (y)\n}")]
fn canonical_sources_round_trip(#[case] source: &str) {
    assert_eq!(canonical(source), source);
}

#[rstest]
#[case("[1,2 ,  3]")]
#[case("[$a:1,$b : [ ]]")]
#[case("{let x:=1;return x}")]
#[case("{\n  if x do {return x}\n\n}")]
#[case("[\n        1\n  2\n]")]
#[case("{ return f( a , b ) }")]
#[case("{\n    return f(a,\n        b)\n}")]
#[case("{\n    let x := [\n        1\n    ] + [\n        2\n    ]\n}")]
fn formatting_is_idempotent(#[case] source: &str) {
    let once = canonical(source);
    assert_eq!(canonical(&once), once);
    assert_eq!(parse(&once).ok(), parse(source).ok());
}

#[rstest]
#[case("{\n    x\n    -y\n}")]
#[case("{\n    x\n    [1, 2]\n}")]
#[case("{\n    f\n    (y)\n}")]
#[case("{\n    return a\n    * b\n}")]
fn block_lines_do_not_continue_the_line_above(#[case] source: &str) {
    let document = parse(source).unwrap_or_else(|e| panic!("{e}"));
    let Entity::Procedure(procedure) = &document.component.entity else {
        panic!("expected a procedure");
    };
    let Statements::Multiline(block) = &procedure.statements else {
        panic!("expected multi-line statements");
    };
    assert_eq!(block.lines.len(), 2);
    assert_eq!(parse(&canonical(source)).ok(), Some(document));
}

fn expression_line(expression: Expression) -> AnnotatedStatement {
    AnnotatedStatement::Statement(StatementLine {
        statement: Statement::new(MainClause::Expression(expression), None),
        note: None,
    })
}

#[test]
fn built_statement_lines_survive_formatting() {
    let list = parse("[1, 2]").unwrap().component;
    let list = Expression::new(Subject::Component(Box::new(list)), Vec::new());
    let lines = vec![
        expression_line(Expression::variable("x")),
        expression_line(list),
    ];
    let procedure = Procedure {
        statements: Statements::Multiline(MultilineStatements { lines }),
    };
    let entity = Entity::Procedure(Box::new(procedure));
    let document = Document::new(None, Component::new(entity, None));
    assert_eq!(validate(&document), Ok(()));

    let text = format_canonical(&document);
    assert_eq!(text, "{\n    x\n    [1, 2]\n}");
    assert_eq!(parse(&text).ok(), Some(document));
}

fn element() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..10_000).prop_map(|n| n.to_string()),
        "\\$[a-z][a-z0-9]{0,6}",
        "#[0-9A-Z]{1,6}",
        "\"[a-z ]{0,10}\"",
        prop::bool::ANY.prop_map(|b| b.to_string()),
    ]
}

proptest! {
    #[test]
    fn inline_lists_round_trip(values in prop::collection::vec(element(), 1..8)) {
        let source = format!("[{}]", values.join(", "));
        prop_assert_eq!(canonical(&source), source);
    }

    #[test]
    fn multiline_lists_round_trip(values in prop::collection::vec(element(), 1..8)) {
        let lines: Vec<String> = values.iter().map(|v| format!("\n    {v}")).collect();
        let source = format!("[{}\n]", lines.concat());
        prop_assert_eq!(canonical(&source), source);
    }
}
