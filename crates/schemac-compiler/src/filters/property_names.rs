//! # `propertyNames` — The Schema Each Key Must Satisfy as a String
//!
//! Every key of the object is validated, as a string value, against the
//! subschema. A rejected key reports the key itself as the offending
//! value at the key's instance location. Arrived in draft 6.

use serde_json::{Map, Value};

use schemac_core::CompileError;

use crate::artifact::Artifact;
use crate::context::Compilation;
use crate::filters::unsupported_in_draft;

pub(crate) fn parse(
    comp: &mut Compilation<'_>,
    art: &mut Artifact,
    schema: &Map<String, Value>,
) -> Result<(), CompileError> {
    let Some(_subschema) = schema.get("propertyNames") else {
        return Ok(());
    };
    let ptr = art.ptr.clone();
    if !comp.draft.has_const_and_contains() {
        return Err(unsupported_in_draft(
            "propertyNames",
            &ptr,
            format!(
                "propertyNames requires draft 6 or newer, selected draft is {}",
                comp.draft.as_str()
            ),
        ));
    }
    let id = comp.subschema(&ptr.join("propertyNames"), &ptr);
    art.object_fold().property_names = Some(id);
    Ok(())
}
