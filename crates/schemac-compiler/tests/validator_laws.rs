//! Integration test: algebraic laws of the generated validators,
//! exercised over a fixed population of heterogeneous values.

use schemac_compiler::{Compiler, FailureKind, SchemaPointer, Validator};
use serde_json::{json, Value};

fn compile(schema: Value) -> Validator {
    Compiler::new()
        .compile("law", &schema)
        .expect("schema should compile")
}

/// A population covering every primitive plus nested shapes.
fn population() -> Vec<Value> {
    vec![
        json!(null),
        json!(true),
        json!(false),
        json!(0),
        json!(42),
        json!(-7),
        json!(3.25),
        json!(""),
        json!("text"),
        json!([]),
        json!([1, "two", null]),
        json!({}),
        json!({"a": 1, "b": {"c": [true]}}),
    ]
}

#[test]
fn test_validation_is_deterministic() {
    let validator = compile(json!({
        "type": ["object", "array", "string"],
        "minLength": 2,
        "items": {"type": "integer"},
        "properties": {"a": {"minimum": 0}}
    }));
    for value in population() {
        let first = validator.validate(&value);
        let second = validator.validate(&value);
        assert_eq!(
            first.is_ok(),
            second.is_ok(),
            "outcome changed between runs for {value}"
        );
        if let (Err(a), Err(b)) = (first, second) {
            assert_eq!(a, b, "failure record changed between runs for {value}");
        }
    }
}

#[test]
fn test_empty_schema_accepts_everything() {
    let validator = compile(json!({}));
    for value in population() {
        assert!(
            validator.validate(&value).is_ok(),
            "empty schema rejected {value}"
        );
    }
}

#[test]
fn test_boolean_schemas() {
    let accept = compile(json!(true));
    let reject = compile(json!(false));
    for value in population() {
        assert!(accept.validate(&value).is_ok(), "true schema rejected {value}");
        let failure = reject
            .validate(&value)
            .expect_err("false schema accepted a value");
        assert_eq!(failure.kind, FailureKind::TypeMismatch);
    }
}

#[test]
fn test_type_only_schemas_match_primitives() {
    let expectations: &[(&str, fn(&Value) -> bool)] = &[
        ("null", Value::is_null),
        ("boolean", Value::is_boolean),
        ("string", Value::is_string),
        ("number", Value::is_number),
        ("array", Value::is_array),
        ("object", Value::is_object),
        ("integer", |v| v.as_i64().is_some() || v.as_u64().is_some()),
    ];
    for (name, admits) in expectations {
        let validator = compile(json!({"type": name}));
        for value in population() {
            assert_eq!(
                validator.validate(&value).is_ok(),
                admits(&value),
                "type {name} vs {value}"
            );
        }
    }
}

#[test]
fn test_pointer_round_trip() {
    let pointers = [
        SchemaPointer::root(),
        SchemaPointer::root().join("properties").join("a b"),
        SchemaPointer::root().join("patternProperties").join("^S_"),
        SchemaPointer::root().join("a/b").join("c~d").join_index(7),
    ];
    for pointer in pointers {
        let round_tripped =
            SchemaPointer::parse(&pointer.to_uri()).expect("rendered pointer should parse");
        assert_eq!(round_tripped, pointer);
    }
}

#[test]
fn test_enum_law_uses_structural_equality() {
    let candidates = json!([1, "two", [3], {"four": 4}, null]);
    let validator = compile(json!({"enum": candidates}));
    let hits = vec![
        json!(1),
        json!(1.0),
        json!("two"),
        json!([3]),
        json!([3.0]),
        json!({"four": 4.0}),
        json!(null),
    ];
    for value in hits {
        assert!(validator.validate(&value).is_ok(), "enum rejected {value}");
    }
    let misses = vec![json!(2), json!("Two"), json!([3, 3]), json!({}), json!(1.5)];
    for value in misses {
        let failure = validator
            .validate(&value)
            .expect_err("enum accepted a non-member");
        assert_eq!(failure.kind, FailureKind::EnumMismatch);
        assert_eq!(failure.schema_pointer, "/enum");
    }
}

#[test]
fn test_const_follows_the_same_equality() {
    let validator = compile(json!({"const": {"n": 1}}));
    assert!(validator.validate(&json!({"n": 1.0})).is_ok());
    let failure = validator
        .validate(&json!({"n": 2}))
        .expect_err("const accepted a different value");
    assert_eq!(failure.kind, FailureKind::ConstMismatch);
}

#[test]
fn test_not_law_inverts_every_outcome() {
    let subschemas = [
        json!({"type": "string"}),
        json!({"minimum": 10}),
        json!({"required": ["a"]}),
        json!(true),
        json!(false),
    ];
    for subschema in subschemas {
        let plain = compile(subschema.clone());
        let negated = compile(json!({"not": subschema.clone()}));
        for value in population() {
            assert_eq!(
                negated.validate(&value).is_ok(),
                plain.validate(&value).is_err(),
                "not law broken for schema {subschema} and value {value}"
            );
        }
    }
}

#[test]
fn test_not_failure_carries_the_original_value() {
    let validator = compile(json!({"not": {"type": "integer"}}));
    let failure = validator
        .validate(&json!(5))
        .expect_err("not should reject a matching value");
    assert_eq!(failure.kind, FailureKind::CombinatorMismatch);
    assert_eq!(failure.schema_pointer, "/not");
    assert_eq!(failure.error_value, json!(5));
}

#[test]
fn test_all_of_propagates_the_branch_failure() {
    let validator = compile(json!({
        "allOf": [{"minimum": 0}, {"maximum": 10}]
    }));
    assert!(validator.validate(&json!(5)).is_ok());
    // allOf is not a catch site: the branch's own pointer surfaces.
    let failure = validator
        .validate(&json!(20))
        .expect_err("second branch should reject 20");
    assert_eq!(failure.kind, FailureKind::RangeViolation);
    assert_eq!(failure.schema_pointer, "/allOf/1/maximum");
    let failure = validator
        .validate(&json!(-1))
        .expect_err("first branch should reject -1");
    assert_eq!(failure.schema_pointer, "/allOf/0/minimum");
}

#[test]
fn test_any_of_law() {
    let branches = vec![
        json!({"type": "string"}),
        json!({"type": "integer", "minimum": 0}),
    ];
    let combined = compile(json!({"anyOf": branches.clone()}));
    let singles: Vec<Validator> = branches.into_iter().map(compile).collect();
    for value in population() {
        let expected = singles.iter().any(|s| s.validate(&value).is_ok());
        assert_eq!(
            combined.validate(&value).is_ok(),
            expected,
            "anyOf law broken for {value}"
        );
    }
}

#[test]
fn test_any_of_failure_collects_branch_failures() {
    let validator = compile(json!({
        "anyOf": [{"type": "string"}, {"type": "integer"}]
    }));
    let failure = validator
        .validate(&json!(true))
        .expect_err("no branch should match");
    assert_eq!(failure.kind, FailureKind::CombinatorMismatch);
    assert_eq!(failure.schema_pointer, "/anyOf");
    assert_eq!(failure.failures.len(), 2);
    assert_eq!(failure.failures[0].schema_pointer, "/anyOf/0/type");
    assert_eq!(failure.failures[1].schema_pointer, "/anyOf/1/type");
}

#[test]
fn test_one_of_counts_matches() {
    let validator = compile(json!({
        "oneOf": [
            {"type": "integer", "minimum": 0},
            {"type": "integer", "maximum": 10}
        ]
    }));
    // 20 matches only the first branch, -5 only the second.
    assert!(validator.validate(&json!(20)).is_ok());
    assert!(validator.validate(&json!(-5)).is_ok());

    // 5 matches both.
    let failure = validator
        .validate(&json!(5))
        .expect_err("double match should fail oneOf");
    assert_eq!(failure.kind, FailureKind::CombinatorMismatch);
    assert_eq!(failure.matches, vec!["/oneOf/0", "/oneOf/1"]);

    // A string matches neither.
    let failure = validator
        .validate(&json!("five"))
        .expect_err("no match should fail oneOf");
    assert_eq!(failure.failures.len(), 2);
}

#[test]
fn test_ref_trace_lists_crossings_innermost_first() {
    let validator = compile(json!({
        "$ref": "#/definitions/outer",
        "definitions": {
            "outer": {"$ref": "#/definitions/inner"},
            "inner": {"type": "integer"}
        }
    }));
    assert!(validator.validate(&json!(3)).is_ok());
    let failure = validator
        .validate(&json!("three"))
        .expect_err("inner type should reject a string");
    assert_eq!(failure.schema_pointer, "/definitions/inner/type");
    assert_eq!(
        failure.ref_trace,
        vec!["/definitions/outer/$ref", "/$ref"],
        "trace must run innermost to outermost"
    );
}
