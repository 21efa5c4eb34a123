//! # Logical Combinators — `allOf`, `anyOf`, `oneOf`, `not`
//!
//! `allOf` is not a catch site: the first branch mismatch propagates
//! unchanged, carrying the branch's own schema pointer. `anyOf`, `oneOf`,
//! and `not` catch branch mismatches and reinterpret them, which is why
//! their branches compile to independently callable subtree validators.

use serde_json::{Map, Value};

use schemac_core::{CompileError, SchemaPointer};

use crate::context::Compilation;
use crate::filters::expect_array;
use crate::node::{Check, ValidatorId};

pub(crate) fn parse(
    comp: &mut Compilation<'_>,
    ptr: &SchemaPointer,
    schema: &Map<String, Value>,
    out: &mut Vec<Check>,
) -> Result<(), CompileError> {
    if let Some(value) = schema.get("allOf") {
        let branches = branch_ids(comp, ptr, "allOf", value)?;
        out.push(Check::AllOf {
            branches,
            pointer: ptr.join("allOf").to_fragment(),
        });
    }
    if let Some(value) = schema.get("anyOf") {
        let branches = branch_ids(comp, ptr, "anyOf", value)?;
        out.push(Check::AnyOf {
            branches,
            pointer: ptr.join("anyOf").to_fragment(),
        });
    }
    if let Some(value) = schema.get("oneOf") {
        let keyword_ptr = ptr.join("oneOf");
        let branches = branch_ids(comp, ptr, "oneOf", value)?
            .into_iter()
            .enumerate()
            .map(|(index, id)| (id, keyword_ptr.join_index(index).to_fragment()))
            .collect();
        out.push(Check::OneOf {
            branches,
            pointer: keyword_ptr.to_fragment(),
        });
    }
    if let Some(_subschema) = schema.get("not") {
        let not_ptr = ptr.join("not");
        let branch = comp.subschema(&not_ptr, ptr);
        out.push(Check::Not {
            branch,
            pointer: not_ptr.to_fragment(),
        });
    }
    Ok(())
}

fn branch_ids(
    comp: &mut Compilation<'_>,
    ptr: &SchemaPointer,
    keyword: &str,
    value: &Value,
) -> Result<Vec<ValidatorId>, CompileError> {
    let subschemas = expect_array(value, ptr, keyword)?;
    if subschemas.is_empty() {
        return Err(CompileError::MalformedSchema {
            location: ptr.join(keyword).to_fragment(),
            reason: format!("{keyword} must list at least one subschema"),
        });
    }
    let keyword_ptr = ptr.join(keyword);
    Ok((0..subschemas.len())
        .map(|index| comp.subschema(&keyword_ptr.join_index(index), ptr))
        .collect())
}
