//! # `if` / `then` / `else`
//!
//! The condition runs with its mismatch swallowed: success selects
//! `then`, failure selects `else`, and an absent branch succeeds.
//! `then`/`else` without `if` are inert and compile to nothing.

use serde_json::{Map, Value};

use schemac_core::{CompileError, SchemaPointer};

use crate::context::Compilation;
use crate::filters::unsupported_in_draft;
use crate::node::Check;

pub(crate) fn parse(
    comp: &mut Compilation<'_>,
    ptr: &SchemaPointer,
    schema: &Map<String, Value>,
    out: &mut Vec<Check>,
) -> Result<(), CompileError> {
    let Some(_condition) = schema.get("if") else {
        return Ok(());
    };
    if !comp.draft.has_conditionals() {
        return Err(unsupported_in_draft(
            "if",
            ptr,
            format!(
                "if/then/else requires draft 7 or newer, selected draft is {}",
                comp.draft.as_str()
            ),
        ));
    }

    let condition = comp.subschema(&ptr.join("if"), ptr);
    let then_branch = schema
        .get("then")
        .map(|_| comp.subschema(&ptr.join("then"), ptr));
    let else_branch = schema
        .get("else")
        .map(|_| comp.subschema(&ptr.join("else"), ptr));

    out.push(Check::IfThenElse {
        condition,
        then_branch,
        else_branch,
    });
    Ok(())
}
