//! The `boolean` type module. Guard-only, like `null`.

use serde_json::{Map, Value};

use schemac_core::CompileError;

use crate::artifact::Artifact;

pub(crate) fn parse(_art: &mut Artifact, _schema: &Map<String, Value>) -> Result<(), CompileError> {
    Ok(())
}
