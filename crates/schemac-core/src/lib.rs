//! # schemac-core — Foundational Types for the Schema Compiler
//!
//! This crate is the leaf of the schemac workspace. It defines the
//! primitives every other crate builds on:
//!
//! 1. **`SchemaPointer`.** An RFC 6901 JSON Pointer as a segment sequence,
//!    with URI-fragment rendering (`#/a/b/0`), raw instance-path rendering,
//!    and the injective `fun_id` naming scheme that identifies every
//!    generated validator.
//!
//! 2. **Structural equality.** One equality function shared by `enum`,
//!    `const`, and `uniqueItems`, comparing numbers by mathematical value
//!    and objects by key set plus per-key structural value.
//!
//! 3. **Error taxonomy.** `CompileError` for fatal build-time failures and
//!    `Mismatch` for validation failures, which are first-class return
//!    values rather than panics.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `schemac-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod equality;
pub mod error;
pub mod pointer;

pub use equality::{json_equal, num_cmp, num_eq};
pub use error::{CompileError, FailureKind, Mismatch};
pub use pointer::{PointerParseError, SchemaPointer};
