//! # `unevaluatedItems` / `unevaluatedProperties`
//!
//! Applied after every other filter of the arm: members not evaluated by
//! this node's own member filters, nor by any successful in-place
//! applicator (`$ref`, `allOf`, the matching `anyOf`/`oneOf` branches,
//! the taken `if` branch), are validated against the subschema — or
//! rejected outright when it is `false`. Arrived in 2019-09.

use serde_json::{Map, Value};

use schemac_core::{CompileError, SchemaPointer};

use crate::artifact::Artifact;
use crate::context::Compilation;
use crate::filters::unsupported_in_draft;
use crate::node::{Primitive, UnevaluatedCheck};

pub(crate) fn parse(
    comp: &mut Compilation<'_>,
    art: &mut Artifact,
    schema: &Map<String, Value>,
) -> Result<(), CompileError> {
    let keyword = match art.primitive {
        Primitive::Array => "unevaluatedItems",
        Primitive::Object => "unevaluatedProperties",
        _ => return Ok(()),
    };
    let Some(value) = schema.get(keyword) else {
        return Ok(());
    };
    let ptr = art.ptr.clone();
    if !comp.draft.has_dependent_keywords() {
        return Err(unsupported_in_draft(
            keyword,
            &ptr,
            format!(
                "{keyword} requires draft 2019-09 or newer, selected draft is {}",
                comp.draft.as_str()
            ),
        ));
    }

    let check = compile_check(comp, value, &ptr, keyword)?;
    let Some(check) = check else {
        return Ok(());
    };
    match art.primitive {
        Primitive::Array => art.array_fold().unevaluated = Some(check),
        Primitive::Object => art.object_fold().unevaluated = Some(check),
        _ => {}
    }
    Ok(())
}

fn compile_check(
    comp: &mut Compilation<'_>,
    value: &Value,
    ptr: &SchemaPointer,
    keyword: &str,
) -> Result<Option<UnevaluatedCheck>, CompileError> {
    let keyword_ptr = ptr.join(keyword);
    match value {
        Value::Bool(true) => Ok(None),
        Value::Bool(false) => Ok(Some(UnevaluatedCheck::Deny {
            pointer: keyword_ptr.to_fragment(),
        })),
        Value::Object(_) => {
            let target = comp.subschema(&keyword_ptr, ptr);
            Ok(Some(UnevaluatedCheck::Schema { target }))
        }
        other => Err(CompileError::MalformedSchema {
            location: keyword_ptr.to_fragment(),
            reason: format!("{keyword} must be a schema or boolean, got {other}"),
        }),
    }
}
