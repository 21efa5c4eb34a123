//! # `minLength` / `maxLength` — Unicode Character Counts
//!
//! Lengths are measured in Unicode scalar values, not bytes, so
//! `"héllo"` has length 5 regardless of encoding.

use serde_json::{Map, Value};

use schemac_core::{CompileError, SchemaPointer};

use crate::filters::expect_size;
use crate::node::Check;

pub(crate) fn parse(
    ptr: &SchemaPointer,
    schema: &Map<String, Value>,
    out: &mut Vec<Check>,
) -> Result<(), CompileError> {
    if let Some(limit) = schema.get("minLength") {
        out.push(Check::MinLength {
            limit: expect_size(limit, ptr, "minLength")?,
            pointer: ptr.join("minLength").to_fragment(),
        });
    }
    if let Some(limit) = schema.get("maxLength") {
        out.push(Check::MaxLength {
            limit: expect_size(limit, ptr, "maxLength")?,
            pointer: ptr.join("maxLength").to_fragment(),
        });
    }
    Ok(())
}
