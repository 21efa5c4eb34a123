//! # `format` — Dispatch to a Registered Validator
//!
//! Resolution order: a per-pointer override, then a per-name override,
//! then the shipped defaults. A format with no resolution compiles to
//! nothing (annotation-only), so unknown names never reject documents.

use serde_json::{Map, Value};

use schemac_core::{CompileError, SchemaPointer};

use crate::context::Compilation;
use crate::filters::expect_str;
use crate::formats;
use crate::node::Check;

pub(crate) fn parse(
    comp: &Compilation<'_>,
    ptr: &SchemaPointer,
    schema: &Map<String, Value>,
    out: &mut Vec<Check>,
) -> Result<(), CompileError> {
    let Some(value) = schema.get("format") else {
        return Ok(());
    };
    let name = expect_str(value, ptr, "format")?;
    if let Some(check) = formats::resolve(ptr, name, comp.options)? {
        out.push(Check::Format {
            name: name.to_string(),
            check,
            pointer: ptr.join("format").to_fragment(),
        });
    }
    Ok(())
}
