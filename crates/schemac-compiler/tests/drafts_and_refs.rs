//! Integration test: draft-specific keyword handling, recursive
//! references, and the configuration surface (entrypoint, authority,
//! formats, decoder, precache).

use schemac_compiler::{
    compile, CompileError, CompileOptions, Compiler, DecoderFn, Draft, FailureKind, FormatCheckFn,
    FormatOverride,
};
use serde_json::{json, Value};

fn compile_with(schema: Value, options: CompileOptions) -> schemac_compiler::Validator {
    compile("test", &schema, options).expect("schema should compile")
}

fn compile_default(schema: Value) -> schemac_compiler::Validator {
    compile_with(schema, CompileOptions::new())
}

// ---- draft gating ----

#[test]
fn test_draft4_boolean_exclusive_minimum() {
    let validator = compile_with(
        json!({"minimum": 3, "exclusiveMinimum": true}),
        CompileOptions::new().draft(Draft::V4),
    );
    assert!(validator.validate(&json!(4)).is_ok());
    let failure = validator
        .validate(&json!(3))
        .expect_err("bound is exclusive in draft 4");
    assert_eq!(failure.kind, FailureKind::RangeViolation);
    assert_eq!(failure.schema_pointer, "/minimum");
}

#[test]
fn test_draft4_rejects_numeric_exclusive() {
    let err = compile(
        "test",
        &json!({"minimum": 3, "exclusiveMinimum": 3}),
        CompileOptions::new().draft(Draft::V4),
    )
    .expect_err("draft 4 exclusiveMinimum must be boolean");
    assert!(matches!(err, CompileError::MalformedSchema { .. }));
}

#[test]
fn test_modern_numeric_exclusive_bounds() {
    let validator = compile_default(json!({"exclusiveMinimum": 3, "exclusiveMaximum": 10}));
    assert!(validator.validate(&json!(4)).is_ok());
    assert!(validator.validate(&json!(9.5)).is_ok());
    let failure = validator.validate(&json!(3)).unwrap_err();
    assert_eq!(failure.schema_pointer, "/exclusiveMinimum");
    let failure = validator.validate(&json!(10)).unwrap_err();
    assert_eq!(failure.schema_pointer, "/exclusiveMaximum");
}

#[test]
fn test_const_requires_draft6() {
    let err = compile(
        "test",
        &json!({"const": 1}),
        CompileOptions::new().draft(Draft::V4),
    )
    .expect_err("const arrived in draft 6");
    assert!(matches!(err, CompileError::UnsupportedKeyword { .. }));
}

#[test]
fn test_dependencies_split_across_drafts() {
    // The combined keyword is gone in 2019-09.
    let err = compile(
        "test",
        &json!({"dependencies": {"a": ["b"]}}),
        CompileOptions::new().draft(Draft::V2020),
    )
    .expect_err("dependencies was retired in 2019-09");
    assert!(matches!(err, CompileError::UnsupportedKeyword { .. }));

    // The split keywords do not exist before 2019-09.
    let err = compile(
        "test",
        &json!({"dependentRequired": {"a": ["b"]}}),
        CompileOptions::new().draft(Draft::V7),
    )
    .expect_err("dependentRequired arrived in 2019-09");
    assert!(matches!(err, CompileError::UnsupportedKeyword { .. }));
}

#[test]
fn test_legacy_dependencies_behavior() {
    let validator = compile_with(
        json!({
            "dependencies": {
                "credit_card": ["billing_address"],
                "shipping": {"required": ["address"]}
            }
        }),
        CompileOptions::new().draft(Draft::V7),
    );
    assert!(validator.validate(&json!({"name": "x"})).is_ok());
    assert!(validator
        .validate(&json!({"credit_card": 1, "billing_address": "a"}))
        .is_ok());

    let failure = validator
        .validate(&json!({"credit_card": 1}))
        .expect_err("key dependency unsatisfied");
    assert_eq!(failure.kind, FailureKind::DependencyUnsatisfied);
    assert_eq!(failure.schema_pointer, "/dependencies/credit_card/0");

    let failure = validator
        .validate(&json!({"shipping": true}))
        .expect_err("schema dependency unsatisfied");
    assert_eq!(failure.schema_pointer, "/dependencies/shipping/required/0");
}

#[test]
fn test_dependent_required_and_schemas() {
    let validator = compile_default(json!({
        "dependentRequired": {"a": ["b"]},
        "dependentSchemas": {"c": {"minProperties": 2}}
    }));
    assert!(validator.validate(&json!({"a": 1, "b": 2})).is_ok());
    assert!(validator.validate(&json!({"c": 1, "d": 2})).is_ok());
    let failure = validator.validate(&json!({"a": 1})).unwrap_err();
    assert_eq!(failure.schema_pointer, "/dependentRequired/a/0");
    let failure = validator.validate(&json!({"c": 1})).unwrap_err();
    assert_eq!(failure.schema_pointer, "/dependentSchemas/c/minProperties");
}

// ---- array keywords across drafts ----

#[test]
fn test_legacy_positional_items_with_additional_items() {
    let validator = compile_with(
        json!({
            "items": [{"type": "string"}, {"type": "integer"}],
            "additionalItems": false
        }),
        CompileOptions::new().draft(Draft::V7),
    );
    assert!(validator.validate(&json!(["a", 1])).is_ok());
    assert!(validator.validate(&json!(["a"])).is_ok());
    let failure = validator
        .validate(&json!(["a", 1, true]))
        .expect_err("third item exceeds the prefix");
    assert_eq!(failure.kind, FailureKind::AdditionalRejected);
    assert_eq!(failure.schema_pointer, "/additionalItems");
    assert_eq!(failure.json_pointer, "/2");
}

#[test]
fn test_2020_prefix_items_with_rest_schema() {
    let validator = compile_default(json!({
        "prefixItems": [{"type": "string"}],
        "items": {"type": "integer"}
    }));
    assert!(validator.validate(&json!(["a", 1, 2])).is_ok());
    let failure = validator.validate(&json!(["a", 1, "b"])).unwrap_err();
    assert_eq!(failure.schema_pointer, "/items/type");
    assert_eq!(failure.json_pointer, "/2");
}

#[test]
fn test_2020_rejects_positional_items() {
    let err = compile(
        "test",
        &json!({"items": [{"type": "string"}]}),
        CompileOptions::new(),
    )
    .expect_err("positional items is spelled prefixItems in 2020-12");
    assert!(matches!(err, CompileError::UnsupportedKeyword { .. }));
}

#[test]
fn test_prefix_items_requires_2020() {
    let err = compile(
        "test",
        &json!({"prefixItems": [{"type": "string"}]}),
        CompileOptions::new().draft(Draft::V2019),
    )
    .expect_err("prefixItems arrived in 2020-12");
    assert!(matches!(err, CompileError::UnsupportedKeyword { .. }));
}

#[test]
fn test_contains_with_count_bounds() {
    let validator = compile_default(json!({
        "contains": {"type": "integer", "minimum": 5},
        "minContains": 2,
        "maxContains": 3
    }));
    assert!(validator.validate(&json!([5, 6, "x"])).is_ok());
    assert!(validator.validate(&json!([5, 6, 7])).is_ok());

    let failure = validator.validate(&json!([5, "x"])).unwrap_err();
    assert_eq!(failure.kind, FailureKind::ContainsUnsatisfied);
    assert_eq!(failure.schema_pointer, "/minContains");

    let failure = validator.validate(&json!([5, 6, 7, 8])).unwrap_err();
    assert_eq!(failure.schema_pointer, "/maxContains");
}

#[test]
fn test_contains_defaults_to_at_least_one() {
    let validator = compile_with(
        json!({"contains": {"const": "needle"}}),
        CompileOptions::new().draft(Draft::V6),
    );
    assert!(validator.validate(&json!(["hay", "needle"])).is_ok());
    let failure = validator.validate(&json!(["hay"])).unwrap_err();
    assert_eq!(failure.schema_pointer, "/contains");
}

#[test]
fn test_unique_items_uses_structural_equality() {
    let validator = compile_default(json!({"uniqueItems": true}));
    assert!(validator.validate(&json!([1, 2, "1"])).is_ok());
    assert!(validator.validate(&json!([{"a": 1}, {"a": 2}])).is_ok());

    let failure = validator
        .validate(&json!([1, 2, 1.0]))
        .expect_err("1 and 1.0 are duplicates");
    assert_eq!(failure.kind, FailureKind::UniqueViolation);
    assert_eq!(failure.json_pointer, "/2");

    let failure = validator
        .validate(&json!([{"a": 1, "b": 2}, {"b": 2.0, "a": 1}]))
        .expect_err("objects compare by key set");
    assert_eq!(failure.json_pointer, "/1");
}

#[test]
fn test_item_size_bounds() {
    let validator = compile_default(json!({"minItems": 1, "maxItems": 2}));
    assert!(validator.validate(&json!([1])).is_ok());
    let failure = validator.validate(&json!([])).unwrap_err();
    assert_eq!(failure.schema_pointer, "/minItems");
    let failure = validator.validate(&json!([1, 2, 3])).unwrap_err();
    assert_eq!(failure.schema_pointer, "/maxItems");
}

// ---- conditionals and unevaluated members ----

#[test]
fn test_if_then_else() {
    let validator = compile_default(json!({
        "if": {"properties": {"kind": {"const": "card"}}, "required": ["kind"]},
        "then": {"required": ["number"]},
        "else": {"required": ["iban"]}
    }));
    assert!(validator
        .validate(&json!({"kind": "card", "number": "4111"}))
        .is_ok());
    assert!(validator
        .validate(&json!({"kind": "bank", "iban": "DE89"}))
        .is_ok());
    let failure = validator
        .validate(&json!({"kind": "card"}))
        .expect_err("then branch should require number");
    assert_eq!(failure.schema_pointer, "/then/required/0");
    let failure = validator
        .validate(&json!({"kind": "bank"}))
        .expect_err("else branch should require iban");
    assert_eq!(failure.schema_pointer, "/else/required/0");
}

#[test]
fn test_unevaluated_properties_sees_all_of_branches() {
    let validator = compile_default(json!({
        "allOf": [
            {"properties": {"name": {"type": "string"}}},
            {"properties": {"age": {"type": "integer"}}}
        ],
        "properties": {"id": {"type": "string"}},
        "unevaluatedProperties": false
    }));
    assert!(validator
        .validate(&json!({"id": "x", "name": "n", "age": 3}))
        .is_ok());
    let failure = validator
        .validate(&json!({"id": "x", "extra": true}))
        .expect_err("extra is unevaluated");
    assert_eq!(failure.kind, FailureKind::UnevaluatedRejected);
    assert_eq!(failure.schema_pointer, "/unevaluatedProperties");
    assert_eq!(failure.json_pointer, "/extra");
}

#[test]
fn test_unevaluated_properties_through_ref() {
    let validator = compile_default(json!({
        "$ref": "#/$defs/base",
        "unevaluatedProperties": false,
        "$defs": {
            "base": {"properties": {"name": {"type": "string"}}}
        }
    }));
    assert!(validator.validate(&json!({"name": "n"})).is_ok());
    assert!(validator.validate(&json!({"other": 1})).is_err());
}

#[test]
fn test_unevaluated_items_after_prefix() {
    let validator = compile_default(json!({
        "prefixItems": [{"type": "string"}],
        "unevaluatedItems": false
    }));
    assert!(validator.validate(&json!(["a"])).is_ok());
    let failure = validator.validate(&json!(["a", "b"])).unwrap_err();
    assert_eq!(failure.kind, FailureKind::UnevaluatedRejected);
    assert_eq!(failure.json_pointer, "/1");
}

#[test]
fn test_unevaluated_requires_2019() {
    let err = compile(
        "test",
        &json!({"unevaluatedProperties": false}),
        CompileOptions::new().draft(Draft::V7),
    )
    .expect_err("unevaluatedProperties arrived in 2019-09");
    assert!(matches!(err, CompileError::UnsupportedKeyword { .. }));
}

// ---- numeric edge cases ----

#[test]
fn test_multiple_of_integers() {
    let validator = compile_default(json!({"multipleOf": 3}));
    assert!(validator.validate(&json!(9)).is_ok());
    assert!(validator.validate(&json!(-9)).is_ok());
    assert!(validator.validate(&json!(0)).is_ok());
    let failure = validator.validate(&json!(10)).unwrap_err();
    assert_eq!(failure.kind, FailureKind::RangeViolation);
    assert_eq!(failure.schema_pointer, "/multipleOf");
}

#[test]
fn test_float_multiple_of_is_unsupported() {
    let err = compile("test", &json!({"multipleOf": 0.5}), CompileOptions::new())
        .expect_err("float multipleOf is a documented non-goal");
    assert!(matches!(err, CompileError::UnsupportedKeyword { .. }));
}

#[test]
fn test_integer_type_excludes_fractional_floats() {
    let validator = compile_default(json!({"type": "integer"}));
    assert!(validator.validate(&json!(3)).is_ok());
    assert!(validator.validate(&json!(3.5)).is_err());
}

// ---- references ----

#[test]
fn test_recursive_schema_compiles_and_validates() {
    let validator = compile_default(json!({
        "type": "object",
        "properties": {
            "value": {"type": "integer"},
            "next": {"$ref": "#"}
        },
        "required": ["value"]
    }));
    assert!(validator
        .validate(&json!({"value": 1, "next": {"value": 2, "next": {"value": 3}}}))
        .is_ok());
    let failure = validator
        .validate(&json!({"value": 1, "next": {"value": "two"}}))
        .expect_err("nested value must be an integer");
    assert_eq!(failure.json_pointer, "/next/value");
    assert_eq!(failure.schema_pointer, "/properties/value/type");
    assert_eq!(failure.ref_trace, vec!["/properties/next/$ref"]);
}

#[test]
fn test_unresolved_ref_fails_compilation() {
    let err = compile(
        "test",
        &json!({"$ref": "#/definitions/missing"}),
        CompileOptions::new(),
    )
    .expect_err("target does not exist");
    match err {
        CompileError::UnresolvedReference {
            reference,
            location,
        } => {
            assert_eq!(reference, "#/definitions/missing");
            assert_eq!(location, "/$ref");
        }
        other => panic!("expected UnresolvedReference, got {other}"),
    }
}

#[test]
fn test_remote_ref_is_rejected() {
    let err = compile(
        "test",
        &json!({"$ref": "https://example.com/schema.json"}),
        CompileOptions::new(),
    )
    .expect_err("remote resolution is unsupported");
    assert!(matches!(err, CompileError::UnresolvedReference { .. }));
}

// ---- configuration surface ----

#[test]
fn test_entrypoint_and_authority() {
    let schema = json!({
        "$defs": {
            "item": {"type": "string", "title": "Item"}
        }
    });
    let validator = compile_with(
        schema,
        CompileOptions::new()
            .entrypoint("#/$defs/item")
            .authority("item"),
    );
    assert_eq!(validator.authority(), "item");
    assert!(validator.validate(&json!("ok")).is_ok());
    let failure = validator.validate(&json!(1)).unwrap_err();
    assert_eq!(failure.schema_pointer, "/$defs/item/type");
    assert_eq!(validator.title(), Some(&json!("Item")));
}

#[test]
fn test_bad_entrypoint_is_rejected() {
    let err = compile(
        "test",
        &json!({"type": "object"}),
        CompileOptions::new().entrypoint("#/nope"),
    )
    .expect_err("entrypoint resolves to nothing");
    assert!(matches!(err, CompileError::InvalidOption(_)));
}

#[test]
fn test_metadata_accessors() {
    let validator = compile_default(json!({
        "$id": "https://example.com/thing.json",
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "Thing",
        "description": "A thing.",
        "default": {"a": 1},
        "examples": [{"a": 2}],
        "type": "object"
    }));
    assert_eq!(validator.id(), Some(&json!("https://example.com/thing.json")));
    assert_eq!(
        validator.schema_uri(),
        Some(&json!("https://json-schema.org/draft/2020-12/schema"))
    );
    assert_eq!(validator.title(), Some(&json!("Thing")));
    assert_eq!(validator.description(), Some(&json!("A thing.")));
    assert_eq!(validator.default_value(), Some(&json!({"a": 1})));
    assert_eq!(validator.examples(), Some(&json!([{"a": 2}])));
    assert_eq!(validator.name(), "test");

    let bare = compile_default(json!({"type": "object"}));
    assert_eq!(bare.id(), None);
    assert_eq!(bare.default_value(), None);
}

#[test]
fn test_format_defaults_and_overrides() {
    let schema = json!({"type": "string", "format": "date-time"});

    let default = compile_default(schema.clone());
    assert!(default.validate(&json!("2026-08-02T10:00:00+02:00")).is_ok());
    let failure = default.validate(&json!("not a date")).unwrap_err();
    assert_eq!(failure.kind, FailureKind::FormatMismatch);
    assert_eq!(failure.schema_pointer, "/format");

    let utc = compile_with(
        schema.clone(),
        CompileOptions::new().format_named("date-time", FormatOverride::Utc),
    );
    assert!(utc.validate(&json!("2026-08-02T10:00:00Z")).is_ok());
    assert!(utc.validate(&json!("2026-08-02T10:00:00+02:00")).is_err());

    let disabled = compile_with(
        schema.clone(),
        CompileOptions::new().format_named("date-time", FormatOverride::Disabled),
    );
    assert!(disabled.validate(&json!("not a date")).is_ok());

    let custom = compile_with(
        schema,
        CompileOptions::new().format_named(
            "date-time",
            FormatOverride::Custom(FormatCheckFn::new(|s| s == "sentinel")),
        ),
    );
    assert!(custom.validate(&json!("sentinel")).is_ok());
    assert!(custom.validate(&json!("2026-08-02T10:00:00Z")).is_err());
}

#[test]
fn test_format_override_by_pointer() {
    let schema = json!({
        "type": "object",
        "properties": {
            "a": {"type": "string", "format": "ipv4"},
            "b": {"type": "string", "format": "ipv4"}
        }
    });
    let validator = compile_with(
        schema,
        CompileOptions::new().format_at("/properties/a", FormatOverride::Disabled),
    );
    // Only /properties/a is disabled; /properties/b keeps the default.
    assert!(validator.validate(&json!({"a": "not an ip"})).is_ok());
    assert!(validator.validate(&json!({"b": "not an ip"})).is_err());
    assert!(validator.validate(&json!({"b": "127.0.0.1"})).is_ok());
}

#[test]
fn test_unknown_format_is_annotation_only() {
    let validator = compile_default(json!({"type": "string", "format": "no-such-format"}));
    assert!(validator.validate(&json!("anything")).is_ok());
}

#[test]
fn test_custom_decoder() {
    // A decoder that strips a line-comment header before JSON decoding.
    let decoder = DecoderFn::new(|text| {
        let body: String = text
            .lines()
            .filter(|line| !line.trim_start().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        serde_json::from_str(&body).map_err(|e| e.to_string())
    });
    let mut compiler = Compiler::with_options(CompileOptions::new().decoder(decoder));
    let validator = compiler
        .compile_text("test", "// schema\n{\"type\": \"integer\"}")
        .expect("decoder should strip the comment");
    assert!(validator.validate(&json!(1)).is_ok());
    assert!(validator.validate(&json!("x")).is_err());
}

#[test]
fn test_precache_and_compile_file() {
    let dir = std::env::temp_dir().join("schemac-compile-file-test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("point.schema.json");
    std::fs::write(
        &path,
        r#"{"type": "object", "required": ["x", "y"], "additionalProperties": {"type": "number"}}"#,
    )
    .unwrap();

    let mut compiler = Compiler::new();
    assert!(!compiler.precache(&path).unwrap(), "first load reads the file");
    assert!(compiler.precache(&path).unwrap(), "second load hits the cache");
    assert_eq!(compiler.cache().resources().count(), 1);

    let validator = compiler.compile_file("point", &path).unwrap();
    assert!(validator.validate(&json!({"x": 1, "y": 2.5})).is_ok());
    assert!(validator.validate(&json!({"x": 1})).is_err());
}

#[test]
fn test_malformed_schema_text() {
    let mut compiler = Compiler::new();
    let err = compiler
        .compile_text("test", "{not json")
        .expect_err("text is not JSON");
    assert!(matches!(err, CompileError::MalformedJson { .. }));
}

#[test]
fn test_malformed_keyword_values_fail_compilation() {
    let cases = [
        json!({"minLength": "3"}),
        json!({"required": "name"}),
        json!({"properties": []}),
        json!({"enum": []}),
        json!({"type": "widget"}),
        json!({"uniqueItems": "yes"}),
        json!({"minimum": "0"}),
    ];
    for schema in cases {
        let err = compile("test", &schema, CompileOptions::new())
            .expect_err("keyword value has the wrong type");
        assert!(
            matches!(err, CompileError::MalformedSchema { .. }),
            "expected MalformedSchema for {schema}, got {err}"
        );
    }
}
