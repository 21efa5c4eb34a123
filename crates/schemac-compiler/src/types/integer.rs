//! The `integer` type module: numeric bounds and integer `multipleOf`.
//! The guard admits only integer-represented numbers; floats with zero
//! fraction stay in the `number` arm.

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
