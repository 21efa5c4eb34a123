//! The `object` type module. Composes the member filters into the
//! key/value fold: presence checks first, then per-key schemas, name
//! validation, dependencies, size bounds, and `unevaluatedProperties`
//! last.

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
    filters::required::parse(art, schema)?;
    filters::properties::parse(comp, art, schema)?;
    filters::property_names::parse(comp, art, schema)?;
    filters::dependencies::parse(comp, art, schema)?;
    filters::size::parse(art, schema)?;
    filters::unevaluated::parse(comp, art, schema)?;
    Ok(())
}
