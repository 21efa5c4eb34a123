//! # Filters — One Parse Step per Keyword Family
//!
//! Each submodule owns a keyword (or the keywords that only make sense
//! together), contributing a `parse` step that reads the keyword off the
//! schema node and appends compiled checks to the artifact. A filter
//! whose keyword is absent returns the artifact unchanged.
//!
//! Combining filters (`$ref`, `enum`, `const`, the logical combinators,
//! `if`/`then`/`else`) are hoisted to the node level by the driver and
//! apply to every admissible type; the rest bind to the type modules that
//! instantiate them.

pub(crate) mod combinators;
pub(crate) mod conditional;
pub(crate) mod contains;
pub(crate) mod dependencies;
pub(crate) mod enum_const;
pub(crate) mod format;
pub(crate) mod items;
pub(crate) mod length;
pub(crate) mod numeric;
pub(crate) mod pattern;
pub(crate) mod properties;
pub(crate) mod property_names;
pub(crate) mod reference;
pub(crate) mod required;
pub(crate) mod size;
pub(crate) mod unevaluated;
pub(crate) mod unique;

use serde_json::Value;

use schemac_core::{CompileError, SchemaPointer};

/// A keyword value that must be a non-negative integer (size bounds,
/// `minContains`, `maxContains`).
pub(crate) fn expect_size(
    value: &Value,
    ptr: &SchemaPointer,
    keyword: &str,
) -> Result<usize, CompileError> {
    value
        .as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| CompileError::MalformedSchema {
            location: ptr.join(keyword).to_fragment(),
            reason: format!("{keyword} must be a non-negative integer, got {value}"),
        })
}

/// A keyword value that must be a string (`pattern`, `format`).
pub(crate) fn expect_str<'v>(
    value: &'v Value,
    ptr: &SchemaPointer,
    keyword: &str,
) -> Result<&'v str, CompileError> {
    value
        .as_str()
        .ok_or_else(|| CompileError::MalformedSchema {
            location: ptr.join(keyword).to_fragment(),
            reason: format!("{keyword} must be a string, got {value}"),
        })
}

/// A keyword value that must be an array (`enum`, the combinators,
/// `required`).
pub(crate) fn expect_array<'v>(
    value: &'v Value,
    ptr: &SchemaPointer,
    keyword: &str,
) -> Result<&'v Vec<Value>, CompileError> {
    value
        .as_array()
        .ok_or_else(|| CompileError::MalformedSchema {
            location: ptr.join(keyword).to_fragment(),
            reason: format!("{keyword} must be an array, got {value}"),
        })
}

/// Reject a keyword that does not exist in the selected draft.
pub(crate) fn unsupported_in_draft(
    keyword: &str,
    ptr: &SchemaPointer,
    reason: impl Into<String>,
) -> CompileError {
    CompileError::UnsupportedKeyword {
        keyword: keyword.to_string(),
        location: ptr.join(keyword).to_fragment(),
        reason: reason.into(),
    }
}
