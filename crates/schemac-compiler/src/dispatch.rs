//! # Type Dispatch — Admissible Primitives for a Schema Node
//!
//! Derives the admissible set from the `type` keyword: a string names one
//! primitive, a sequence names a set, absence admits every primitive
//! (narrowed only by which filters bind to which types). The returned
//! order is canonical so integer-typed values always prefer the integer
//! arm over the number arm.

use serde_json::{Map, Value};

use schemac_core::{CompileError, SchemaPointer};

use crate::node::Primitive;

/// The admissible primitive set for a schema node, in canonical order.
pub(crate) fn admissible_types(
    schema: &Map<String, Value>,
    ptr: &SchemaPointer,
) -> Result<Vec<Primitive>, CompileError> {
    let Some(declared) = schema.get("type") else {
        return Ok(Primitive::ALL.to_vec());
    };
    let type_ptr = || ptr.join("type").to_fragment();

    let mut admitted = Vec::new();
    match declared {
        Value::String(name) => {
            admitted.push(parse_name(name, &type_ptr())?);
        }
        Value::Array(names) => {
            if names.is_empty() {
                return Err(CompileError::MalformedSchema {
                    location: type_ptr(),
                    reason: "type list must not be empty".to_string(),
                });
            }
            for name in names {
                let Value::String(name) = name else {
                    return Err(CompileError::MalformedSchema {
                        location: type_ptr(),
                        reason: format!("type list entries must be strings, got {name}"),
                    });
                };
                admitted.push(parse_name(name, &type_ptr())?);
            }
        }
        other => {
            return Err(CompileError::MalformedSchema {
                location: type_ptr(),
                reason: format!("type must be a string or a list of strings, got {other}"),
            })
        }
    }

    // Canonical order, deduplicated.
    Ok(Primitive::ALL
        .into_iter()
        .filter(|p| admitted.contains(p))
        .collect())
}

fn parse_name(name: &str, location: &str) -> Result<Primitive, CompileError> {
    Primitive::from_name(name).ok_or_else(|| CompileError::MalformedSchema {
        location: location.to_string(),
        reason: format!("unknown type name {name:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!("test fixture must be an object"),
        }
    }

    #[test]
    fn test_absent_type_admits_everything() {
        let types = admissible_types(&map(json!({})), &SchemaPointer::root()).unwrap();
        assert_eq!(types.len(), 7);
    }

    #[test]
    fn test_single_type() {
        let types =
            admissible_types(&map(json!({"type": "object"})), &SchemaPointer::root()).unwrap();
        assert_eq!(types, vec![Primitive::Object]);
    }

    #[test]
    fn test_type_list_in_canonical_order() {
        let types = admissible_types(
            &map(json!({"type": ["number", "integer", "null"]})),
            &SchemaPointer::root(),
        )
        .unwrap();
        assert_eq!(
            types,
            vec![Primitive::Null, Primitive::Integer, Primitive::Number]
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err =
            admissible_types(&map(json!({"type": "float"})), &SchemaPointer::root()).unwrap_err();
        assert!(matches!(err, CompileError::MalformedSchema { .. }));
    }

    #[test]
    fn test_non_string_type_rejected() {
        let err = admissible_types(&map(json!({"type": 3})), &SchemaPointer::root()).unwrap_err();
        assert!(matches!(err, CompileError::MalformedSchema { .. }));
        let err = admissible_types(&map(json!({"type": []})), &SchemaPointer::root()).unwrap_err();
        assert!(matches!(err, CompileError::MalformedSchema { .. }));
    }
}
