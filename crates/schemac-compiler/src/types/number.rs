//! The `number` type module: numeric bounds. `multipleOf` compiles here
//! too but only judges integer-represented values at runtime — the
//! float case is a documented non-goal.

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
    filters::numeric::parse(comp, &ptr, schema, &mut art.checks)
}
