//! # Object Member Schemas — `properties`, `patternProperties`, `additionalProperties`
//!
//! During the object fold each key is offered to its named property
//! schema and to every pattern whose regex matches the key.
//! `additionalProperties` governs keys matched by neither; `false`
//! rejects such a key outright.
//!
//! Pattern sources become pointer segments of their subschemas, so a
//! mismatch inside `patternProperties` renders with the escaped pattern
//! (`/patternProperties/%5ES_/type`).

use serde_json::{Map, Value};

use schemac_core::{CompileError, SchemaPointer};

use crate::artifact::Artifact;
use crate::context::Compilation;
use crate::ecma;
use crate::node::AdditionalMembers;

pub(crate) fn parse(
    comp: &mut Compilation<'_>,
    art: &mut Artifact,
    schema: &Map<String, Value>,
) -> Result<(), CompileError> {
    let ptr = art.ptr.clone();

    if let Some(value) = schema.get("properties") {
        let Some(members) = value.as_object() else {
            return Err(CompileError::MalformedSchema {
                location: ptr.join("properties").to_fragment(),
                reason: format!("properties must be an object, got {value}"),
            });
        };
        let properties_ptr = ptr.join("properties");
        for key in members.keys() {
            let id = comp.subschema(&properties_ptr.join(key), &ptr);
            art.object_fold().properties.push((key.clone(), id));
        }
    }

    if let Some(value) = schema.get("patternProperties") {
        let Some(members) = value.as_object() else {
            return Err(CompileError::MalformedSchema {
                location: ptr.join("patternProperties").to_fragment(),
                reason: format!("patternProperties must be an object, got {value}"),
            });
        };
        let patterns_ptr = ptr.join("patternProperties");
        for source in members.keys() {
            let subschema_ptr = patterns_ptr.join(source);
            let pattern = ecma::compile_pattern(source, &subschema_ptr.to_fragment())?;
            let id = comp.subschema(&subschema_ptr, &ptr);
            art.object_fold().patterns.push((pattern, id));
        }
    }

    if let Some(value) = schema.get("additionalProperties") {
        parse_additional(comp, art, value, &ptr)?;
    }
    Ok(())
}

fn parse_additional(
    comp: &mut Compilation<'_>,
    art: &mut Artifact,
    value: &Value,
    ptr: &SchemaPointer,
) -> Result<(), CompileError> {
    let additional_ptr = ptr.join("additionalProperties");
    match value {
        Value::Bool(true) => Ok(()),
        Value::Bool(false) => {
            art.object_fold().additional = Some(AdditionalMembers::Deny {
                pointer: additional_ptr.to_fragment(),
            });
            Ok(())
        }
        Value::Object(_) => {
            let id = comp.subschema(&additional_ptr, ptr);
            art.object_fold().additional = Some(AdditionalMembers::Schema(id));
            Ok(())
        }
        other => Err(CompileError::MalformedSchema {
            location: additional_ptr.to_fragment(),
            reason: format!("additionalProperties must be a schema or boolean, got {other}"),
        }),
    }
}
