//! # schemac-compiler — JSON Schema to Executable Validators
//!
//! Compiles a JSON Schema document (drafts 4, 6, 7, 2019-09, 2020-12)
//! into an executable [`Validator`] that, given a decoded JSON value,
//! returns success or a structured [`Mismatch`] naming the failing
//! keyword, the offending subvalue, and the instance location.
//!
//! ## Pipeline
//!
//! The compiler walks the schema at build time: every subtree, keyed by
//! JSON Pointer, is lowered through the type dispatcher and the keyword
//! filters into a type-guarded node, and the registry resolves `$ref`
//! targets to stable node identifiers — unrolling newly discovered
//! references until fixpoint, which makes self-referential schemas safe
//! without cycle detection.
//!
//! ## Usage
//!
//! ```
//! use schemac_compiler::Compiler;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {"name": {"type": "string"}},
//!     "required": ["name"]
//! });
//! let validator = Compiler::new().compile("person", &schema)?;
//!
//! assert!(validator.validate(&json!({"name": "Ada"})).is_ok());
//! let failure = validator.validate(&json!({})).unwrap_err();
//! assert_eq!(failure.schema_pointer, "/required/0");
//! # Ok::<(), schemac_compiler::CompileError>(())
//! ```
//!
//! ## Scope
//!
//! Remote `$ref` resolution is unsupported; references resolve within
//! the compiled document only. Non-integer `multipleOf` and
//! exact-integer-valued floats at integer filters are documented
//! non-goals.

mod artifact;
mod compiler;
mod context;
mod dispatch;
pub mod draft;
mod driver;
mod ecma;
mod filters;
mod formats;
mod node;
pub mod options;
mod program;
mod registry;
mod types;

pub use compiler::{compile, Compiler};
pub use draft::Draft;
pub use options::{CompileOptions, DecoderFn, FormatCheckFn, FormatKey, FormatOverride};
pub use program::Validator;
pub use registry::FileCache;

// Re-export the shared foundation types so callers need one import.
pub use schemac_core::{CompileError, FailureKind, Mismatch, PointerParseError, SchemaPointer};
