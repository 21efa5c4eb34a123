//! # `enum` and `const` — Value Equality Against Fixed Candidates
//!
//! Both compare with structural equality: numbers by mathematical value,
//! objects by key set and per-key structural value. `const` arrived in
//! draft 6; in draft 4 it fails compilation rather than silently becoming
//! an unknown keyword.

use serde_json::{Map, Value};

use schemac_core::{CompileError, SchemaPointer};

use crate::context::Compilation;
use crate::filters::{expect_array, unsupported_in_draft};
use crate::node::Check;

pub(crate) fn parse(
    comp: &mut Compilation<'_>,
    ptr: &SchemaPointer,
    schema: &Map<String, Value>,
    out: &mut Vec<Check>,
) -> Result<(), CompileError> {
    if let Some(candidates) = schema.get("enum") {
        let candidates = expect_array(candidates, ptr, "enum")?;
        if candidates.is_empty() {
            return Err(CompileError::MalformedSchema {
                location: ptr.join("enum").to_fragment(),
                reason: "enum must list at least one candidate".to_string(),
            });
        }
        out.push(Check::Enum {
            values: candidates.clone(),
            pointer: ptr.join("enum").to_fragment(),
        });
    }

    if let Some(constant) = schema.get("const") {
        if !comp.draft.has_const_and_contains() {
            return Err(unsupported_in_draft(
                "const",
                ptr,
                format!("const requires draft 6 or newer, selected draft is {}", comp.draft.as_str()),
            ));
        }
        out.push(Check::Const {
            value: constant.clone(),
            pointer: ptr.join("const").to_fragment(),
        });
    }
    Ok(())
}
