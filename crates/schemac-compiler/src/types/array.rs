//! The `array` type module. Composes the member filters into the
//! element fold: positional and rest schemas, `contains` counting,
//! duplicate detection, size bounds, and `unevaluatedItems` last.

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
    filters::items::parse(comp, art, schema)?;
    filters::contains::parse(comp, art, schema)?;
    filters::unique::parse(art, schema)?;
    filters::size::parse(art, schema)?;
    filters::unevaluated::parse(comp, art, schema)?;
    Ok(())
}
