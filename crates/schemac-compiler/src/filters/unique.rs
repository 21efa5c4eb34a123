//! # `uniqueItems` — Structural Duplicate Detection
//!
//! Two elements collide when they compare structurally equal: numbers by
//! mathematical value, objects by key set and per-key value. The fold
//! retains the original sequence to compare each element against its
//! predecessors, which is what the artifact's
//! `needs_array_in_accumulator` flag records.

use serde_json::{Map, Value};

use schemac_core::CompileError;

use crate::artifact::Artifact;
use crate::node::UniqueCheck;

pub(crate) fn parse(art: &mut Artifact, schema: &Map<String, Value>) -> Result<(), CompileError> {
    let Some(value) = schema.get("uniqueItems") else {
        return Ok(());
    };
    let ptr = art.ptr.clone();
    match value {
        Value::Bool(false) => Ok(()),
        Value::Bool(true) => {
            art.needs_array_in_accumulator = true;
            art.array_fold().unique = Some(UniqueCheck {
                pointer: ptr.join("uniqueItems").to_fragment(),
            });
            Ok(())
        }
        other => Err(CompileError::MalformedSchema {
            location: ptr.join("uniqueItems").to_fragment(),
            reason: format!("uniqueItems must be a boolean, got {other}"),
        }),
    }
}
