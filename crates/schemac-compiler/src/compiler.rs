//! # Top-Level Compiler — Entrypoint, Fixpoint, Emission
//!
//! Compiling a named schema:
//!
//! 1. resolve the entrypoint pointer (default: document root);
//! 2. register the entry subtree under the authority (default: the name);
//! 3. drain the registry's `needed` queue, building each requested
//!    subtree — newly discovered references re-enter the queue — until
//!    the queue stays empty;
//! 4. extract the entrypoint metadata and emit the immutable
//!    [`Validator`].
//!
//! All compilation state (registry, artifacts) dies with the pass; the
//! emitted validator owns only the node table and metadata.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use schemac_core::{CompileError, SchemaPointer};

use crate::context::Compilation;
use crate::driver;
use crate::node::Node;
use crate::options::CompileOptions;
use crate::program::{Metadata, Validator};
use crate::registry::FileCache;

/// Compiles schemas, caching schema text across compiles.
///
/// Each compilation pass is isolated; compiling several schemas in
/// parallel means giving each thread its own `Compiler`.
#[derive(Debug, Default)]
pub struct Compiler {
    options: CompileOptions,
    cache: FileCache,
}

impl Compiler {
    /// A compiler with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// A compiler with the given options.
    pub fn with_options(options: CompileOptions) -> Self {
        Self {
            options,
            cache: FileCache::new(),
        }
    }

    /// The options in effect.
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// The schema-text cache, exposing the external resource
    /// dependencies recorded so far.
    pub fn cache(&self) -> &FileCache {
        &self.cache
    }

    /// Read schema text into the cache so later compiles reference it by
    /// path without re-reading. Returns `true` when the path was already
    /// cached.
    pub fn precache(&mut self, path: &Path) -> Result<bool, CompileError> {
        let (cached, _) = self.cache.get_file(path)?;
        Ok(cached)
    }

    /// Compile a decoded schema document into a validator named `name`.
    pub fn compile(&mut self, name: &str, schema: &Value) -> Result<Validator, CompileError> {
        let authority = self
            .options
            .authority
            .clone()
            .unwrap_or_else(|| name.to_string());
        if authority.contains('#') {
            return Err(CompileError::InvalidOption(format!(
                "authority {authority:?} must not contain '#'"
            )));
        }

        let entry_ptr = match &self.options.entrypoint {
            Some(text) => SchemaPointer::parse(text)?,
            None => SchemaPointer::root(),
        };

        let mut comp = Compilation::new(schema, &authority, self.options.draft, &self.options);
        if comp.lookup(&entry_ptr).is_none() {
            return Err(CompileError::InvalidOption(format!(
                "entrypoint {} resolves to nothing in the schema document",
                entry_ptr.to_uri()
            )));
        }

        let entry_id = comp.subschema(&entry_ptr, &entry_ptr);

        // Fixpoint: materialize until no request remains. Each pointer
        // compiles at most once, so cycles terminate.
        loop {
            let pending = comp.registry.drain_needed();
            if pending.is_empty() {
                break;
            }
            for request in pending {
                let node = driver::build_node(&mut comp, &request.ptr, &request.origin)?;
                comp.nodes[request.id.0] = Some(node);
                comp.registry.mark_materialized(request.id);
                debug!(
                    fun_id = %comp.registry.fun_id(&request.ptr),
                    "materialized validator"
                );
            }
        }

        debug_assert!(comp.registry.is_materialized(entry_id));
        let metadata = extract_metadata(&comp, &entry_ptr);
        let node_count = comp.nodes.len();
        let mut nodes: Vec<Node> = Vec::with_capacity(node_count);
        for (index, slot) in comp.nodes.into_iter().enumerate() {
            match slot {
                Some(node) => nodes.push(node),
                None => {
                    return Err(CompileError::MalformedSchema {
                        location: "/".to_string(),
                        reason: format!("internal: validator slot {index} never materialized"),
                    })
                }
            }
        }
        debug!(name, authority = %authority, validators = node_count, "compilation complete");

        Ok(Validator {
            name: name.to_string(),
            authority,
            entry: entry_id,
            nodes,
            metadata,
        })
    }

    /// Decode schema text with the configured decoder (default:
    /// `serde_json`) and compile it.
    pub fn compile_text(&mut self, name: &str, text: &str) -> Result<Validator, CompileError> {
        let schema = match &self.options.decoder {
            Some(decoder) => {
                decoder
                    .decode(text)
                    .map_err(|reason| CompileError::MalformedJson {
                        name: name.to_string(),
                        reason,
                    })?
            }
            None => {
                serde_json::from_str(text).map_err(|e| CompileError::MalformedJson {
                    name: name.to_string(),
                    reason: e.to_string(),
                })?
            }
        };
        self.compile(name, &schema)
    }

    /// Load schema text through the cache and compile it.
    pub fn compile_file(&mut self, name: &str, path: &Path) -> Result<Validator, CompileError> {
        let (_, text) = self.cache.get_file(path)?;
        let text = text.to_string();
        self.compile_text(name, &text)
    }
}

/// Pull the six metadata keywords off the entrypoint schema node.
fn extract_metadata(comp: &Compilation<'_>, entry: &SchemaPointer) -> Metadata {
    let Some(Value::Object(map)) = comp.lookup(entry) else {
        return Metadata::default();
    };
    Metadata {
        id: map.get("$id").cloned(),
        schema: map.get("$schema").cloned(),
        title: map.get("title").cloned(),
        description: map.get("description").cloned(),
        default: map.get("default").cloned(),
        examples: map.get("examples").cloned(),
    }
}

/// One-shot compilation with explicit options.
pub fn compile(
    name: &str,
    schema: &Value,
    options: CompileOptions,
) -> Result<Validator, CompileError> {
    Compiler::with_options(options).compile(name, schema)
}
