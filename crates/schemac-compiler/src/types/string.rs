//! The `string` type module: length bounds, `pattern`, `format`.

use serde_json::{Map, Value};

use schemac_core::CompileError;

use crate::artifact::Artifact;
use crate::context::Compilation;
use crate::filters;

pub(crate) fn parse(
    comp: &mut Compilation<'_>,
    art: &mut Artifact,
    schema: &Map<String, Value>,
) -> Result<(), CompileError> {
    let ptr = art.ptr.clone();
    filters::length::parse(&ptr, schema, &mut art.checks)?;
    filters::pattern::parse(&ptr, schema, &mut art.checks)?;
    filters::format::parse(comp, &ptr, schema, &mut art.checks)?;
    Ok(())
}
