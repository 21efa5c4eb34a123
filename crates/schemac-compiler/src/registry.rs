//! # Registry — Identifier Allocation and the Compilation Fixpoint
//!
//! The registry maps `(authority, pointer)` to the stable identifier of
//! the validator for that subtree. Requesting an identifier never blocks
//! on the subtree being compiled: the slot is allocated immediately and
//! the pointer is queued in `needed`, which the top-level compiler drains
//! until no request remains. Because each pointer is allocated exactly
//! once, every subtree compiles at most once and reference cycles need
//! no further detection.
//!
//! The registry also owns the schema-text cache: `get_file` loads each
//! path once, in insertion order, and records it as an external resource
//! dependency of the compilation.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::debug;

use schemac_core::{CompileError, SchemaPointer};

use crate::node::ValidatorId;

/// A pending compilation request.
#[derive(Debug)]
pub(crate) struct PendingRequest {
    pub id: ValidatorId,
    pub ptr: SchemaPointer,
    /// Schema location that caused the request, for error reporting.
    pub origin: String,
}

/// Identifier allocation and request tracking for one compilation pass.
#[derive(Debug)]
pub(crate) struct Registry {
    authority: String,
    ids: HashMap<SchemaPointer, ValidatorId>,
    needed: Vec<PendingRequest>,
    materialized: HashSet<ValidatorId>,
    next: usize,
}

impl Registry {
    pub(crate) fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
            ids: HashMap::new(),
            needed: Vec::new(),
            materialized: HashSet::new(),
            next: 0,
        }
    }

    /// Number of identifiers allocated so far.
    pub(crate) fn len(&self) -> usize {
        self.next
    }

    /// The identifier for the validator at `ptr`, allocating a forward
    /// slot and scheduling compilation when it has not been requested
    /// before.
    pub(crate) fn request(&mut self, ptr: &SchemaPointer, origin: &SchemaPointer) -> ValidatorId {
        if let Some(&id) = self.ids.get(ptr) {
            return id;
        }
        let id = ValidatorId(self.next);
        self.next += 1;
        self.ids.insert(ptr.clone(), id);
        self.needed.push(PendingRequest {
            id,
            ptr: ptr.clone(),
            origin: origin.to_fragment(),
        });
        id
    }

    /// Snapshot and drain the pending requests.
    pub(crate) fn drain_needed(&mut self) -> Vec<PendingRequest> {
        std::mem::take(&mut self.needed)
    }

    /// Record that the node behind `id` has been built.
    pub(crate) fn mark_materialized(&mut self, id: ValidatorId) {
        self.materialized.insert(id);
    }

    pub(crate) fn is_materialized(&self, id: ValidatorId) -> bool {
        self.materialized.contains(&id)
    }

    /// The `fun_id` of the validator at `ptr`.
    pub(crate) fn fun_id(&self, ptr: &SchemaPointer) -> String {
        ptr.fun_id(&self.authority)
    }
}

/// Insertion-ordered, idempotent cache of schema text loaded from disk.
///
/// Lives on the [`Compiler`](crate::Compiler), outliving individual
/// compilation passes, so `precache` followed by several compiles reads
/// each file once.
#[derive(Debug, Default)]
pub struct FileCache {
    paths: Vec<PathBuf>,
    texts: HashMap<PathBuf, String>,
}

impl FileCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The schema text at `path`, reading it on first use. The boolean is
    /// `true` when the text was already cached.
    pub(crate) fn get_file(&mut self, path: &Path) -> Result<(bool, &str), CompileError> {
        if !self.texts.contains_key(path) {
            let text = std::fs::read_to_string(path)?;
            debug!(path = %path.display(), bytes = text.len(), "loaded schema text");
            self.paths.push(path.to_path_buf());
            self.texts.insert(path.to_path_buf(), text);
            // Freshly loaded.
            let text = self.texts.get(path).map(String::as_str).unwrap_or("");
            return Ok((false, text));
        }
        let text = self.texts.get(path).map(String::as_str).unwrap_or("");
        Ok((true, text))
    }

    /// Every path loaded so far, in first-load order. These are the
    /// compilation's external resource dependencies.
    pub fn resources(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}
