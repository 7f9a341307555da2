use super::*;
use crate::fixture::parse_fixture;

const FIXTURE: &str = r#"{
    "types": {
        "Node": { "object": { "value": "number", "next": { "union": ["Node", "null"] } } },
        "Greet": {
            "function": {
                "params": [{ "type": "string", "name": "name" }],
                "returns": { "promise": "string" }
            }
        }
    },
    "assertions": [
        { "actual": "Node", "check": "toBeObject" },
        { "actual": "Node", "path": [{ "property": "next" }], "check": "toBeNullable" },
        { "actual": "Greet", "path": ["returns", "resolves"], "check": "toBeString" },
        { "actual": "Greet", "check": "toBeCallableWith", "args": [{ "literal": "bob" }] },
        {
            "name": "nested diff",
            "actual": { "object": { "a": "number", "b": { "object": { "c": "string" } } } },
            "check": "toBeIdenticalTo",
            "expected": { "object": { "a": "number", "b": { "object": { "c": "number" } } } }
        },
        { "actual": "number", "not": true, "check": "toBeString" }
    ]
}"#;

#[test]
fn test_run_fixture_counts_outcomes() {
    let fixture = parse_fixture(FIXTURE).unwrap();
    let report = run_fixture(&fixture, false).unwrap();

    assert_eq!(report.passed, 5);
    assert_eq!(report.failed, 1);
    assert_eq!(report.skipped, 0);
    assert!(!report.success());

    let failed = &report.outcomes[4];
    assert!(!failed.passed);
    assert_eq!(failed.label(), "nested diff");
    assert!(failed.message.as_deref().unwrap().starts_with("toBeIdenticalTo: "));
    assert_eq!(
        failed.mismatch.as_ref().unwrap().differences(),
        vec![("b.c".to_string(), "number", "string")]
    );

    assert_eq!(report.outcomes[0].label(), "#0 toBeObject");
    assert_eq!(report.outcomes[5].label(), "#5 not.toBeString");
    assert!(report.outcomes[5].passed);
}

#[test]
fn test_fail_fast_skips_the_rest() {
    let fixture = parse_fixture(FIXTURE).unwrap();
    let report = run_fixture(&fixture, true).unwrap();
    assert_eq!(report.outcomes.len(), 5);
    assert_eq!(report.failed, 1);
    assert_eq!(report.skipped, 1);
}

#[test]
fn test_report_serializes_to_json() {
    let fixture = parse_fixture(FIXTURE).unwrap();
    let report = run_fixture(&fixture, false).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["passed"], 5);
    assert_eq!(json["outcomes"][0]["check"], "toBeObject");
    assert!(json["outcomes"][0].get("message").is_none());
    assert!(json["outcomes"][0].get("mismatch").is_none());
    assert_eq!(json["outcomes"][4]["name"], "nested diff");
    assert_eq!(json["outcomes"][4]["mismatch"]["a"], "number");
    assert_eq!(
        json["outcomes"][4]["mismatch"]["b"]["c"],
        "Expected: number, Actual: string"
    );
}

#[test]
fn test_missing_fields_are_fixture_errors() {
    let fixture = parse_fixture(r#"{ "assertions": [{ "actual": "number", "check": "toExtend" }] }"#)
        .unwrap();
    let err = run_fixture(&fixture, false).unwrap_err();
    assert!(matches!(
        err,
        FixtureError::MissingField {
            index: 0,
            check: "toExtend",
            field: "expected"
        }
    ));
    assert_eq!(err.to_string(), "assertion 0 (`toExtend`) needs a `expected` field");

    let fixture =
        parse_fixture(r#"{ "assertions": [{ "actual": "number", "check": "toHaveProperty" }] }"#)
            .unwrap();
    assert!(matches!(
        run_fixture(&fixture, false),
        Err(FixtureError::MissingField { field: "key", .. })
    ));

    let fixture = parse_fixture(r#"{ "assertions": [{ "actual": "Missing", "check": "toBeAny" }] }"#)
        .unwrap();
    assert!(matches!(
        run_fixture(&fixture, false),
        Err(FixtureError::UnknownType { .. })
    ));
}

#[test]
fn test_navigation_steps() {
    let fixture = parse_fixture(
        r#"{ "assertions": [
            {
                "actual": { "union": ["string", { "literal": 1 }, "null"] },
                "path": [{ "exclude": "null" }, { "extract": "number" }],
                "check": "toBeIdenticalTo",
                "expected": { "literal": 1 }
            },
            {
                "actual": { "constructor": { "params": ["string"], "instance": { "object": { "id": "number" } } } },
                "path": ["instance", { "property": "id" }],
                "check": "toBeNumber"
            },
            {
                "actual": { "tuple": ["number", "string"] },
                "path": ["items"],
                "check": "toExtend",
                "expected": { "union": ["number", "string"] }
            },
            {
                "actual": "string",
                "path": ["returns"],
                "check": "toBeNever"
            },
            {
                "actual": { "object": { "a": "number" } },
                "not": true,
                "check": "toHaveProperty",
                "key": "b"
            }
        ] }"#,
    )
    .unwrap();
    let report = run_fixture(&fixture, false).unwrap();
    assert!(report.success(), "{report:#?}");
    assert_eq!(report.passed, 5);
}

#[test]
fn test_named_aliases_inside_unions() {
    let fixture = parse_fixture(
        r#"{
            "types": {
                "Wrapper": { "union": ["Nothing", "MaybeNull", "number"] },
                "MaybeNull": "null",
                "Nothing": "never"
            },
            "assertions": [
                { "actual": "MaybeNull", "check": "toBeNullable" },
                { "actual": "Wrapper", "check": "toBeNullable" },
                { "actual": "Wrapper", "check": "toBeIdenticalTo", "expected": { "union": ["null", "number"] } },
                { "actual": { "union": ["Nothing", "string"] }, "check": "toBeString" }
            ]
        }"#,
    )
    .unwrap();
    let report = run_fixture(&fixture, false).unwrap();
    assert!(report.success(), "{report:#?}");
    assert_eq!(report.passed, 4);
}

#[test]
fn test_props_query() {
    let fixture = parse_fixture(FIXTURE).unwrap();
    let node = props(&fixture, "Node").unwrap();
    assert!(node.contains_key(".value"));
    assert!(node.contains_key(".next"));

    let literal = props(&fixture, r#"{ "object": { "x": { "literal": 1 } } }"#).unwrap();
    assert!(literal.get(".x").unwrap().contains("literal number: 1"));

    assert!(props(&fixture, "Nope").is_err());
}

#[test]
fn test_explain_query() {
    let fixture = parse_fixture(FIXTURE).unwrap();
    let explanation = explain(&fixture, r#"{ "literal": 1 }"#, "number").unwrap();
    assert!(explanation.extends);
    assert!(!explanation.identical);
    assert_eq!(explanation.expected, "number");
    assert_eq!(
        explanation.mismatch,
        MismatchInfo::Leaf {
            expected: "number".to_string(),
            actual: "literal number: 1".to_string(),
        }
    );

    let same = explain(&fixture, "Node", "Node").unwrap();
    assert!(same.identical);
    assert!(same.mismatch.is_same());
}
