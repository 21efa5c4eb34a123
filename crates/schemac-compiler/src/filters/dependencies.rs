//! # Dependencies — Key-Triggered Requirements
//!
//! If key K is present, either every listed key must also be present
//! (key dependency) or the listed schema must validate against the whole
//! object (schema dependency). Draft 7 and earlier spell both through
//! `dependencies`; 2019-09 split them into `dependentRequired` and
//! `dependentSchemas` and retired the combined keyword.

use serde_json::{Map, Value};

use schemac_core::{CompileError, SchemaPointer};

use crate::artifact::Artifact;
use crate::context::Compilation;
use crate::filters::unsupported_in_draft;
use crate::node::{DependencyCheck, DependencyKind};

pub(crate) fn parse(
    comp: &mut Compilation<'_>,
    art: &mut Artifact,
    schema: &Map<String, Value>,
) -> Result<(), CompileError> {
    let ptr = art.ptr.clone();
    let split_keywords = comp.draft.has_dependent_keywords();

    if let Some(value) = schema.get("dependencies") {
        if split_keywords {
            return Err(unsupported_in_draft(
                "dependencies",
                &ptr,
                "2019-09 split dependencies into dependentRequired and dependentSchemas",
            ));
        }
        let entries = expect_object(value, &ptr, "dependencies")?;
        let keyword_ptr = ptr.join("dependencies");
        for (key, entry) in entries {
            let entry_ptr = keyword_ptr.join(key);
            let kind = match entry {
                Value::Array(_) => DependencyKind::Keys(key_list(entry, &entry_ptr)?),
                Value::Object(_) | Value::Bool(_) => {
                    DependencyKind::Schema(comp.subschema(&entry_ptr, &ptr))
                }
                other => {
                    return Err(CompileError::MalformedSchema {
                        location: entry_ptr.to_fragment(),
                        reason: format!(
                            "dependency must be a key list or a schema, got {other}"
                        ),
                    });
                }
            };
            art.object_fold().dependencies.push(DependencyCheck {
                key: key.clone(),
                kind,
                pointer: entry_ptr.to_fragment(),
            });
        }
    }

    if let Some(value) = schema.get("dependentRequired") {
        if !split_keywords {
            return Err(unsupported_in_draft(
                "dependentRequired",
                &ptr,
                format!(
                    "dependentRequired requires draft 2019-09 or newer, selected draft is {}",
                    comp.draft.as_str()
                ),
            ));
        }
        let entries = expect_object(value, &ptr, "dependentRequired")?;
        let keyword_ptr = ptr.join("dependentRequired");
        for (key, entry) in entries {
            let entry_ptr = keyword_ptr.join(key);
            art.object_fold().dependencies.push(DependencyCheck {
                key: key.clone(),
                kind: DependencyKind::Keys(key_list(entry, &entry_ptr)?),
                pointer: entry_ptr.to_fragment(),
            });
        }
    }

    if let Some(value) = schema.get("dependentSchemas") {
        if !split_keywords {
            return Err(unsupported_in_draft(
                "dependentSchemas",
                &ptr,
                format!(
                    "dependentSchemas requires draft 2019-09 or newer, selected draft is {}",
                    comp.draft.as_str()
                ),
            ));
        }
        let entries = expect_object(value, &ptr, "dependentSchemas")?;
        let keyword_ptr = ptr.join("dependentSchemas");
        for key in entries.keys() {
            let entry_ptr = keyword_ptr.join(key);
            let id = comp.subschema(&entry_ptr, &ptr);
            art.object_fold().dependencies.push(DependencyCheck {
                key: key.clone(),
                kind: DependencyKind::Schema(id),
                pointer: entry_ptr.to_fragment(),
            });
        }
    }
    Ok(())
}

fn expect_object<'v>(
    value: &'v Value,
    ptr: &SchemaPointer,
    keyword: &str,
) -> Result<&'v Map<String, Value>, CompileError> {
    value
        .as_object()
        .ok_or_else(|| CompileError::MalformedSchema {
            location: ptr.join(keyword).to_fragment(),
            reason: format!("{keyword} must be an object, got {value}"),
        })
}

fn key_list(value: &Value, entry_ptr: &SchemaPointer) -> Result<Vec<String>, CompileError> {
    let entries = value
        .as_array()
        .ok_or_else(|| CompileError::MalformedSchema {
            location: entry_ptr.to_fragment(),
            reason: format!("expected a list of keys, got {value}"),
        })?;
    let mut keys = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(key) = entry.as_str() else {
            return Err(CompileError::MalformedSchema {
                location: entry_ptr.to_fragment(),
                reason: format!("dependency keys must be strings, got {entry}"),
            });
        };
        keys.push(key.to_string());
    }
    Ok(keys)
}
