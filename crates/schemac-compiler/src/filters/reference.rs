//! # `$ref` — Cross-Subtree Calls Through the Registry
//!
//! A reference resolves to the validator identifier of its target via the
//! registry and compiles into a call. The target need not be compiled
//! yet: the registry hands out the identifier immediately and schedules
//! the subtree, so self-referential schemas cost nothing special. At
//! validation time a mismatch crossing the reference is annotated with
//! the referring pointer and rethrown.
//!
//! Only intra-document references resolve. A reference that is not a URI
//! fragment or rooted pointer into the current document fails compilation
//! (remote resolution is unsupported).

use serde_json::{Map, Value};

use schemac_core::{CompileError, SchemaPointer};

use crate::context::Compilation;
use crate::node::Check;

pub(crate) fn parse(
    comp: &mut Compilation<'_>,
    ptr: &SchemaPointer,
    schema: &Map<String, Value>,
    out: &mut Vec<Check>,
) -> Result<(), CompileError> {
    let Some(reference) = schema.get("$ref") else {
        return Ok(());
    };
    let ref_ptr = ptr.join("$ref");
    let Some(reference) = reference.as_str() else {
        return Err(CompileError::MalformedSchema {
            location: ref_ptr.to_fragment(),
            reason: format!("$ref must be a string, got {reference}"),
        });
    };

    let target = SchemaPointer::parse(reference).map_err(|_| {
        // Anything that is not a fragment or rooted pointer would need
        // remote resolution.
        CompileError::UnresolvedReference {
            reference: reference.to_string(),
            location: ref_ptr.to_fragment(),
        }
    })?;

    let id = comp.subschema(&target, &ref_ptr);
    out.push(Check::Ref {
        target: id,
        pointer: ref_ptr.to_fragment(),
    });
    Ok(())
}
