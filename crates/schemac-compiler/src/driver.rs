//! # Validator Driver — One Schema Node to One Compiled Node
//!
//! Walks a single schema node: boolean schemas shortcut to accept/reject,
//! mapping schemas derive their admissible types, hoist the combining
//! filters, and build one artifact per type by offering every keyword to
//! every applicable filter. The resulting dispatch node always carries
//! the catch-all clause that reports a `/type` mismatch when no guard
//! admits the value.

use serde_json::{Map, Value};

use schemac_core::{CompileError, SchemaPointer};

use crate::context::Compilation;
use crate::dispatch;
use crate::filters;
use crate::node::{Check, DispatchNode, Node};
use crate::types;

/// Compile the schema subtree at `ptr` into a node. `origin` names the
/// location whose request caused this build, for error reporting.
pub(crate) fn build_node(
    comp: &mut Compilation<'_>,
    ptr: &SchemaPointer,
    origin: &str,
) -> Result<Node, CompileError> {
    let schema = comp.lookup_required(ptr, origin)?;
    match schema {
        Value::Bool(true) => Ok(Node::AcceptAll),
        Value::Bool(false) => Ok(Node::RejectAll {
            schema_pointer: fragment_or_root(ptr),
        }),
        Value::Object(map) => build_dispatch(comp, ptr, map),
        other => Err(CompileError::MalformedSchema {
            location: fragment_or_root(ptr),
            reason: format!("a schema must be an object or a boolean, got {other}"),
        }),
    }
}

fn build_dispatch(
    comp: &mut Compilation<'_>,
    ptr: &SchemaPointer,
    schema: &Map<String, Value>,
) -> Result<Node, CompileError> {
    let admissible = dispatch::admissible_types(schema, ptr)?;

    // Combining filters in declaration order, hoisted once per node and
    // emitted ahead of every type arm.
    let mut combining: Vec<Check> = Vec::new();
    filters::reference::parse(comp, ptr, schema, &mut combining)?;
    filters::enum_const::parse(comp, ptr, schema, &mut combining)?;
    filters::combinators::parse(comp, ptr, schema, &mut combining)?;
    filters::conditional::parse(comp, ptr, schema, &mut combining)?;

    let mut arms = Vec::with_capacity(admissible.len());
    for primitive in admissible {
        arms.push(types::build_arm(comp, ptr, schema, primitive)?);
    }

    Ok(Node::Dispatch(DispatchNode {
        type_pointer: ptr.join("type").to_fragment(),
        combining,
        arms,
    }))
}

/// Fragment rendering with `/` for the root, used where a whole node
/// (not a keyword inside it) is the failure location.
pub(crate) fn fragment_or_root(ptr: &SchemaPointer) -> String {
    if ptr.is_root() {
        "/".to_string()
    } else {
        ptr.to_fragment()
    }
}
