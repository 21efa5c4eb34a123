//! # Array Member Schemas — `items`, `prefixItems`, `additionalItems`
//!
//! Two generations of the same idea:
//!
//! - Through 2019-09, `items` is either one schema applied to every
//!   element, or a positional array with `additionalItems` governing the
//!   remainder.
//! - In 2020-12, `prefixItems` carries the positional schemas and `items`
//!   governs everything beyond the prefix; positional `items` and
//!   `additionalItems` are gone.
//!
//! Boolean schemas shortcut: `true` compiles to nothing, `false` denies
//! any element in its range.

use serde_json::{Map, Value};

use schemac_core::{CompileError, SchemaPointer};

use crate::artifact::Artifact;
use crate::context::Compilation;
use crate::filters::unsupported_in_draft;
use crate::node::RestItems;

pub(crate) fn parse(
    comp: &mut Compilation<'_>,
    art: &mut Artifact,
    schema: &Map<String, Value>,
) -> Result<(), CompileError> {
    let ptr = art.ptr.clone();

    if comp.draft.has_prefix_items() {
        parse_2020(comp, art, schema, &ptr)
    } else {
        parse_legacy(comp, art, schema, &ptr)
    }
}

/// 2020-12: `prefixItems` positional, `items` for the remainder.
fn parse_2020(
    comp: &mut Compilation<'_>,
    art: &mut Artifact,
    schema: &Map<String, Value>,
    ptr: &SchemaPointer,
) -> Result<(), CompileError> {
    if schema.contains_key("additionalItems") {
        return Err(unsupported_in_draft(
            "additionalItems",
            ptr,
            "2020-12 replaced additionalItems with items after prefixItems",
        ));
    }

    if let Some(value) = schema.get("prefixItems") {
        let Some(subschemas) = value.as_array() else {
            return Err(CompileError::MalformedSchema {
                location: ptr.join("prefixItems").to_fragment(),
                reason: format!("prefixItems must be an array of schemas, got {value}"),
            });
        };
        let prefix_ptr = ptr.join("prefixItems");
        for index in 0..subschemas.len() {
            let id = comp.subschema(&prefix_ptr.join_index(index), ptr);
            art.array_fold().prefix.push(id);
        }
    }

    if let Some(value) = schema.get("items") {
        let items_ptr = ptr.join("items");
        match value {
            Value::Bool(true) => {}
            Value::Bool(false) => {
                art.array_fold().rest = Some(RestItems::Deny {
                    pointer: items_ptr.to_fragment(),
                });
            }
            Value::Object(_) => {
                let id = comp.subschema(&items_ptr, ptr);
                art.array_fold().rest = Some(RestItems::Schema(id));
            }
            Value::Array(_) => {
                return Err(unsupported_in_draft(
                    "items",
                    ptr,
                    "positional items is spelled prefixItems in 2020-12",
                ));
            }
            other => {
                return Err(CompileError::MalformedSchema {
                    location: items_ptr.to_fragment(),
                    reason: format!("items must be a schema or boolean, got {other}"),
                });
            }
        }
    }
    Ok(())
}

/// Drafts 4 through 2019-09: `items` schema or positional array plus
/// `additionalItems`.
fn parse_legacy(
    comp: &mut Compilation<'_>,
    art: &mut Artifact,
    schema: &Map<String, Value>,
    ptr: &SchemaPointer,
) -> Result<(), CompileError> {
    if schema.contains_key("prefixItems") {
        return Err(unsupported_in_draft(
            "prefixItems",
            ptr,
            format!(
                "prefixItems requires draft 2020-12, selected draft is {}",
                comp.draft.as_str()
            ),
        ));
    }

    let mut positional = false;
    if let Some(value) = schema.get("items") {
        let items_ptr = ptr.join("items");
        match value {
            Value::Bool(true) => {}
            Value::Bool(false) => {
                art.array_fold().rest = Some(RestItems::Deny {
                    pointer: items_ptr.to_fragment(),
                });
            }
            Value::Object(_) => {
                let id = comp.subschema(&items_ptr, ptr);
                art.array_fold().rest = Some(RestItems::Schema(id));
            }
            Value::Array(subschemas) => {
                positional = true;
                for index in 0..subschemas.len() {
                    let id = comp.subschema(&items_ptr.join_index(index), ptr);
                    art.array_fold().prefix.push(id);
                }
            }
            other => {
                return Err(CompileError::MalformedSchema {
                    location: items_ptr.to_fragment(),
                    reason: format!("items must be a schema, boolean, or array, got {other}"),
                });
            }
        }
    }

    if let Some(value) = schema.get("additionalItems") {
        // Only meaningful after a positional prefix; otherwise `items`
        // already governs every element and additionalItems is inert.
        if !positional {
            return Ok(());
        }
        let additional_ptr = ptr.join("additionalItems");
        match value {
            Value::Bool(true) => {}
            Value::Bool(false) => {
                art.array_fold().rest = Some(RestItems::Deny {
                    pointer: additional_ptr.to_fragment(),
                });
            }
            Value::Object(_) => {
                let id = comp.subschema(&additional_ptr, ptr);
                art.array_fold().rest = Some(RestItems::Schema(id));
            }
            other => {
                return Err(CompileError::MalformedSchema {
                    location: additional_ptr.to_fragment(),
                    reason: format!("additionalItems must be a schema or boolean, got {other}"),
                });
            }
        }
    }
    Ok(())
}
