//! # `pattern` — ECMA-262 Regex over the Whole String
//!
//! The pattern is a search, not a full match: it succeeds when the regex
//! matches anywhere, exactly as written (no implicit anchoring).

use serde_json::{Map, Value};

use schemac_core::{CompileError, SchemaPointer};

use crate::ecma;
use crate::filters::expect_str;
use crate::node::Check;

pub(crate) fn parse(
    ptr: &SchemaPointer,
    schema: &Map<String, Value>,
    out: &mut Vec<Check>,
) -> Result<(), CompileError> {
    let Some(value) = schema.get("pattern") else {
        return Ok(());
    };
    let source = expect_str(value, ptr, "pattern")?;
    let location = ptr.join("pattern").to_fragment();
    let pattern = ecma::compile_pattern(source, &location)?;
    out.push(Check::Pattern {
        pattern,
        pointer: location,
    });
    Ok(())
}
