//! Integration test: the failure records produced for representative
//! schema/value pairs, down to the exact schema pointer, offending
//! value, and instance pointer.

use schemac_compiler::{Compiler, FailureKind, Mismatch};
use serde_json::{json, Value};

fn validate(schema: Value, value: Value) -> Result<(), Mismatch> {
    let validator = Compiler::new()
        .compile("scenario", &schema)
        .expect("schema should compile");
    validator.validate(&value)
}

fn expect_failure(schema: Value, value: Value) -> Mismatch {
    validate(schema, value).expect_err("validation should fail")
}

#[test]
fn test_type_mismatch_at_root() {
    let failure = expect_failure(json!({"type": "object"}), json!("Not an object"));
    assert_eq!(failure.kind, FailureKind::TypeMismatch);
    assert_eq!(failure.schema_pointer, "/type");
    assert_eq!(failure.error_value, json!("Not an object"));
    assert_eq!(failure.json_pointer, "/");
}

#[test]
fn test_property_type_mismatch() {
    let failure = expect_failure(
        json!({
            "type": "object",
            "properties": {"number": {"type": "number"}}
        }),
        json!({"number": "1600", "street_name": "Pennsylvania"}),
    );
    assert_eq!(failure.kind, FailureKind::TypeMismatch);
    assert_eq!(failure.schema_pointer, "/properties/number/type");
    assert_eq!(failure.error_value, json!("1600"));
    assert_eq!(failure.json_pointer, "/number");
}

#[test]
fn test_required_reports_the_missing_entry() {
    let value = json!({"name": "W", "address": "H"});
    let failure = expect_failure(
        json!({"type": "object", "required": ["name", "email"]}),
        value.clone(),
    );
    assert_eq!(failure.kind, FailureKind::RequiredMissing);
    assert_eq!(failure.schema_pointer, "/required/1");
    assert_eq!(failure.error_value, value);
    assert_eq!(failure.json_pointer, "/");
}

#[test]
fn test_property_names_pattern() {
    let failure = expect_failure(
        json!({
            "type": "object",
            "propertyNames": {"pattern": "^[A-Za-z_][A-Za-z0-9_]*$"}
        }),
        json!({"001 invalid": "value"}),
    );
    assert_eq!(failure.kind, FailureKind::PropertyNameMismatch);
    assert_eq!(failure.schema_pointer, "/propertyNames/pattern");
    assert_eq!(failure.error_value, json!("001 invalid"));
    assert_eq!(failure.json_pointer, "/001 invalid");
}

#[test]
fn test_property_count_bounds() {
    let failure = expect_failure(
        json!({"type": "object", "minProperties": 2, "maxProperties": 3}),
        json!({"a": 0, "b": 1, "c": 2, "d": 3}),
    );
    assert_eq!(failure.kind, FailureKind::LengthViolation);
    assert_eq!(failure.schema_pointer, "/maxProperties");
    assert_eq!(failure.json_pointer, "/");

    let failure = expect_failure(
        json!({"type": "object", "minProperties": 2, "maxProperties": 3}),
        json!({"a": 0}),
    );
    assert_eq!(failure.schema_pointer, "/minProperties");
}

#[test]
fn test_pattern_properties_pointer_is_fragment_escaped() {
    let failure = expect_failure(
        json!({
            "type": "object",
            "patternProperties": {
                "^S_": {"type": "string"},
                "^I_": {"type": "integer"}
            },
            "additionalProperties": false
        }),
        json!({"S_0": 42}),
    );
    assert_eq!(failure.kind, FailureKind::TypeMismatch);
    assert_eq!(failure.schema_pointer, "/patternProperties/%5ES_/type");
    assert_eq!(failure.error_value, json!(42));
    assert_eq!(failure.json_pointer, "/S_0");
}

#[test]
fn test_pattern_properties_accepts_matching_members() {
    let schema = json!({
        "type": "object",
        "patternProperties": {
            "^S_": {"type": "string"},
            "^I_": {"type": "integer"}
        },
        "additionalProperties": false
    });
    assert!(validate(schema.clone(), json!({"S_0": "s", "I_1": 7})).is_ok());
    let failure = expect_failure(schema, json!({"keyword": "value"}));
    assert_eq!(failure.kind, FailureKind::AdditionalRejected);
    assert_eq!(failure.schema_pointer, "/additionalProperties");
    assert_eq!(failure.json_pointer, "/keyword");
}

#[test]
fn test_nested_array_instance_pointer() {
    let failure = expect_failure(
        json!({
            "type": "object",
            "properties": {
                "tags": {"type": "array", "items": {"type": "string"}}
            }
        }),
        json!({"tags": ["ok", 5]}),
    );
    assert_eq!(failure.schema_pointer, "/properties/tags/items/type");
    assert_eq!(failure.error_value, json!(5));
    assert_eq!(failure.json_pointer, "/tags/1");
}
