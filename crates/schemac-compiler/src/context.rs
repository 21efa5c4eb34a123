//! # Compilation Context — State Threaded Through the Pipeline
//!
//! One [`Compilation`] exists per compile pass. It is passed by exclusive
//! reference through the driver, the type modules, and every filter, so
//! compilation state is never shared across concurrent compilations;
//! callers wanting parallel compiles isolate their compilers.

use serde_json::Value;

use schemac_core::{CompileError, SchemaPointer};

use crate::draft::Draft;
use crate::node::{Node, ValidatorId};
use crate::options::CompileOptions;
use crate::registry::Registry;

pub(crate) struct Compilation<'a> {
    /// The whole schema document; pointers resolve against this root.
    pub root: &'a Value,
    pub draft: Draft,
    pub options: &'a CompileOptions,
    pub registry: Registry,
    /// Node slots indexed by `ValidatorId`; filled by the fixpoint loop.
    pub nodes: Vec<Option<Node>>,
}

impl<'a> Compilation<'a> {
    pub(crate) fn new(
        root: &'a Value,
        authority: impl Into<String>,
        draft: Draft,
        options: &'a CompileOptions,
    ) -> Self {
        Self {
            root,
            draft,
            options,
            registry: Registry::new(authority),
            nodes: Vec::new(),
        }
    }

    /// The identifier of the validator for the subtree at `ptr`,
    /// allocating a forward slot when needed. `origin` is the schema
    /// location making the request, kept for error reporting.
    pub(crate) fn subschema(
        &mut self,
        ptr: &SchemaPointer,
        origin: &SchemaPointer,
    ) -> ValidatorId {
        let id = self.registry.request(ptr, origin);
        while self.nodes.len() < self.registry.len() {
            self.nodes.push(None);
        }
        id
    }

    /// The schema value at `ptr`, or `None` when the pointer leaves the
    /// document. Array segments must be decimal indices.
    pub(crate) fn lookup(&self, ptr: &SchemaPointer) -> Option<&'a Value> {
        let mut current = self.root;
        for segment in ptr.segments() {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => {
                    let index: usize = segment.parse().ok()?;
                    items.get(index)?
                }
                _ => return None,
            };
        }
        Some(current)
    }

    /// `lookup` that fails compilation with an unresolved-reference
    /// error naming the requesting location.
    pub(crate) fn lookup_required(
        &self,
        ptr: &SchemaPointer,
        origin: &str,
    ) -> Result<&'a Value, CompileError> {
        self.lookup(ptr)
            .ok_or_else(|| CompileError::UnresolvedReference {
                reference: ptr.to_uri(),
                location: origin.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_walks_objects_and_arrays() {
        let doc = json!({
            "properties": {"a": {"type": "string"}},
            "allOf": [{"minimum": 1}, {"maximum": 2}]
        });
        let options = CompileOptions::new();
        let comp = Compilation::new(&doc, "root", Draft::V2020, &options);

        let p = SchemaPointer::parse("#/properties/a/type").unwrap();
        assert_eq!(comp.lookup(&p), Some(&json!("string")));
        let p = SchemaPointer::parse("#/allOf/1").unwrap();
        assert_eq!(comp.lookup(&p), Some(&json!({"maximum": 2})));
        let p = SchemaPointer::parse("#/allOf/7").unwrap();
        assert_eq!(comp.lookup(&p), None);
        let p = SchemaPointer::parse("#/missing").unwrap();
        assert_eq!(comp.lookup(&p), None);
    }

    #[test]
    fn test_subschema_allocates_slots() {
        let doc = json!({"type": "object"});
        let options = CompileOptions::new();
        let mut comp = Compilation::new(&doc, "root", Draft::V2020, &options);
        let root = SchemaPointer::root();
        let id = comp.subschema(&root, &root);
        assert_eq!(comp.nodes.len(), 1);
        assert!(comp.nodes[id.0].is_none());
    }
}
