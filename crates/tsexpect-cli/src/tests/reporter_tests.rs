use super::*;
use crate::driver::{explain, props, run_fixture};
use crate::fixture::parse_fixture;

const FIXTURE: &str = r#"{
    "assertions": [
        { "actual": { "literal": 1 }, "check": "toExtend", "expected": "number" },
        {
            "name": "wide vs literal",
            "actual": { "object": { "a": "number" } },
            "check": "toBeIdenticalTo",
            "expected": { "object": { "a": { "literal": 1 } } }
        },
        { "actual": "string", "not": true, "check": "toBeString" }
    ]
}"#;

#[test]
fn test_render_check_text() {
    let report = run_fixture(&parse_fixture(FIXTURE).unwrap(), false).unwrap();
    let text = Reporter::new(OutputFormat::Text, false).render_check(&report).unwrap();

    assert!(text.starts_with("✓ #0 toExtend\n✗ wide vs literal\n"));
    assert!(text.contains("    toBeIdenticalTo: "));
    assert!(text.contains("      at a: expected literal number: 1, actual number\n"));
    assert!(text.contains("✗ #2 not.toBeString\n    toBeString: expected `string` not to hold\n"));
    assert!(text.ends_with("\n1 passed, 2 failed\n"));
}

#[test]
fn test_render_check_json() {
    let report = run_fixture(&parse_fixture(FIXTURE).unwrap(), true).unwrap();
    let text = Reporter::new(OutputFormat::Json, true).render_check(&report).unwrap();
    assert!(!text.contains('\u{1b}'));

    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["passed"], 1);
    assert_eq!(json["failed"], 1);
    assert_eq!(json["skipped"], 1);
    assert_eq!(json["outcomes"][1]["passed"], false);
    assert_eq!(
        json["outcomes"][1]["mismatch"]["a"],
        "Expected: literal number: 1, Actual: number"
    );
}

#[test]
fn test_render_empty_report() {
    let report = run_fixture(&parse_fixture("{}").unwrap(), false).unwrap();
    let text = Reporter::new(OutputFormat::Text, false).render_check(&report).unwrap();
    assert_eq!(text, "0 passed\n");
}

#[test]
fn test_render_props() {
    let fixture = parse_fixture("{}").unwrap();
    let map = props(&fixture, r#"{ "object": { "a": "number", "b c": "string" } }"#).unwrap();

    let text = Reporter::new(OutputFormat::Text, false).render_props(&map).unwrap();
    assert!(text.contains(".a: number\n"));
    assert!(text.contains(".b\\ c: string\n"));

    let json = Reporter::new(OutputFormat::Json, false).render_props(&map).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[".a"], serde_json::json!(["number"]));
}

#[test]
fn test_render_explain() {
    let fixture = parse_fixture("{}").unwrap();
    let explanation = explain(&fixture, r#"{ "literal": 1 }"#, "number").unwrap();
    let text = Reporter::new(OutputFormat::Text, false).render_explain(&explanation).unwrap();
    assert!(text.contains("expected:  number\n"));
    assert!(text.contains("extends:   yes\nidentical: no\n"));
    assert!(text.ends_with("diff:      Expected: number, Actual: literal number: 1\n"));

    let same = explain(&fixture, "string", "string").unwrap();
    let text = Reporter::new(OutputFormat::Text, false).render_explain(&same).unwrap();
    assert!(!text.contains("diff:"));

    let json = Reporter::new(OutputFormat::Json, false).render_explain(&explanation).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["extends"], true);
    assert_eq!(value["identical"], false);
}
