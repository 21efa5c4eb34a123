//! # `required` — Presence of Listed Keys
//!
//! A missing key reports the `required` entry that named it
//! (`/required/1`), with the whole object as the offending value.

use serde_json::{Map, Value};

use schemac_core::CompileError;

use crate::artifact::Artifact;
use crate::filters::expect_array;
use crate::node::RequiredCheck;

pub(crate) fn parse(art: &mut Artifact, schema: &Map<String, Value>) -> Result<(), CompileError> {
    let Some(value) = schema.get("required") else {
        return Ok(());
    };
    let ptr = art.ptr.clone();
    let entries = expect_array(value, &ptr, "required")?;
    let mut keys = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(key) = entry.as_str() else {
            return Err(CompileError::MalformedSchema {
                location: ptr.join("required").to_fragment(),
                reason: format!("required entries must be strings, got {entry}"),
            });
        };
        keys.push(key.to_string());
    }
    if keys.is_empty() {
        return Ok(());
    }
    art.object_fold().required = Some(RequiredCheck {
        keys,
        pointer: ptr.join("required").to_fragment(),
    });
    Ok(())
}
