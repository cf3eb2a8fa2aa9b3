//! The validator against scanner output and against trees from elsewhere

use bali_notation::bali::formats::{format_canonical, from_json, from_yaml, to_json, to_yaml};
use bali_notation::bali::lexing::patterns::matches_exactly;
use bali_notation::bali::lexing::scan;
use bali_notation::bali::parsing::parse;
use bali_notation::bali::token::TokenKind;
use bali_notation::bali::validation::{validate, ValidationError};
use proptest::prelude::*;

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,8}".prop_filter("must scan as one identifier", |text| {
        let tokens: Vec<_> = scan(text).collect();
        tokens.len() == 1 && tokens[0].kind == TokenKind::Identifier
    })
}

fn element() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..1000).prop_map(|n| n.to_string()),
        (1u32..100).prop_map(|n| format!("{n}%")),
        (1u32..100).prop_map(|n| format!(".{n}")),
        (1u32..100).prop_map(|n| format!("~{n}")),
        "\\$[a-z][a-z0-9]{0,4}",
        "#[0-9A-Z]{1,4}",
        "/[a-z]{1,5}/v[1-9]",
        "v[1-9]\\.[0-9]",
        "\"[a-z ]{0,8}\"",
    ]
}

fn source() -> impl Strategy<Value = String> {
    (identifier(), identifier(), element(), element()).prop_flat_map(|(a, b, x, y)| {
        prop_oneof![
            Just(format!("[{x}, {y}]")),
            Just(format!("[$key: {x}, $other: [{y}]]")),
            Just(format!("{{ let {a} := {x} }}")),
            Just(format!("{{ let {a}[{x}] += {b} }}")),
            Just(format!("{{ return {a}({x}, {b}) & {y} }}")),
            Just(format!("{{\n    if {a} > {x} do {{\n        post {b} to {a}  ! note\n    }}\n}}")),
            Just(format!("{{ with each {a} in {b} do {{ publish -{a} * |{y}| }} }}")),
        ]
    })
}

proptest! {
    #[test]
    fn scanner_tokens_satisfy_their_patterns(source in source()) {
        for token in scan(&source) {
            prop_assert!(
                matches_exactly(token.kind, &token.text),
                "{} {:?} does not match its own pattern", token.kind, token.text
            );
        }
    }

    #[test]
    fn parsed_trees_validate(source in source()) {
        let document = parse(&source).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(validate(&document), Ok(()));
        let reparsed = parse(&format_canonical(&document))
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(reparsed, document);
    }
}

#[test]
fn interchange_preserves_valid_trees() {
    let document = parse("{\n    checkout doc at level 2 from /acme/doc/v1\n    notarize doc as /acme/doc/v2\n}").unwrap();
    let via_json = from_json(&to_json(&document).unwrap()).unwrap();
    let via_yaml = from_yaml(&to_yaml(&document).unwrap()).unwrap();
    assert_eq!(validate(&via_json), Ok(()));
    assert_eq!(validate(&via_yaml), Ok(()));
    assert_eq!(format_canonical(&via_yaml), format_canonical(&document));
}

#[test]
fn tampered_values_are_caught() {
    let document = parse("[$count: 12]").unwrap();
    let json = to_json(&document).unwrap().replace("\"12\"", "\"12abc\"");
    let tampered = from_json(&json).unwrap();
    assert!(matches!(
        validate(&tampered),
        Err(ValidationError::Inconsistent { kind: TokenKind::Number, .. })
    ));
}

#[test]
fn tampered_kinds_are_caught() {
    let document = parse("[$count: 12]").unwrap();
    let json = to_json(&document).unwrap().replace("\"Number\"", "\"Quote\"");
    let tampered = from_json(&json).unwrap();
    assert_eq!(
        validate(&tampered),
        Err(ValidationError::UnexpectedKind {
            rule: "Element",
            kind: TokenKind::Quote,
        })
    );
}
