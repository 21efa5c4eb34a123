//! The `null` type module. No keyword binds to null beyond the
//! combining filters, so the arm is guard-only.

use serde_json::{Map, Value};

use schemac_core::CompileError;

use crate::artifact::Artifact;

pub(crate) fn parse(_art: &mut Artifact, _schema: &Map<String, Value>) -> Result<(), CompileError> {
    Ok(())
}
