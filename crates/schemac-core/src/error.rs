//! # Error Types — Compile Failures and Validation Mismatches
//!
//! Two taxonomies live here:
//!
//! - [`CompileError`] is fatal and surfaces at build time: unresolvable
//!   `$ref`, a keyword value of the wrong JSON type, malformed schema
//!   text, or a keyword outside its draft.
//! - [`Mismatch`] is a first-class value describing a validation failure:
//!   where in the schema it was detected, which instance subvalue
//!   offended, and how the failure travelled across `$ref` boundaries.
//!
//! Keyword checks "throw" a boxed `Mismatch` up the call stack as an
//! `Err`. It is caught only at combinator boundaries (`anyOf` / `oneOf` /
//! `not` / `if`), at `$ref` boundaries (annotated with the referring
//! pointer and rethrown), and at the public entrypoint. There is no
//! partial recovery: the first mismatch at a non-combinator keyword stops
//! validation of that subtree.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::pointer::PointerParseError;

/// Classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The value's primitive type is not admissible at this location.
    TypeMismatch,
    /// The value matches no element of the `enum` list.
    EnumMismatch,
    /// The value differs from the `const` value.
    ConstMismatch,
    /// `minimum` / `maximum` / `exclusiveMinimum` / `exclusiveMaximum` /
    /// `multipleOf` violated.
    RangeViolation,
    /// `minLength` / `maxLength` / `minItems` / `maxItems` /
    /// `minProperties` / `maxProperties` violated.
    LengthViolation,
    /// The string does not match `pattern`.
    PatternMismatch,
    /// A registered `format` validator returned false.
    FormatMismatch,
    /// A key listed in `required` is absent.
    RequiredMissing,
    /// A key or element rejected by `additionalProperties` /
    /// `additionalItems` / positional `items` overflow.
    AdditionalRejected,
    /// A key rejected by `propertyNames`.
    PropertyNameMismatch,
    /// `dependencies` / `dependentRequired` / `dependentSchemas` violated.
    DependencyUnsatisfied,
    /// `contains` matched fewer than `minContains` or more than
    /// `maxContains` elements.
    ContainsUnsatisfied,
    /// Two array elements compare structurally equal under `uniqueItems`.
    UniqueViolation,
    /// `allOf` / `anyOf` / `oneOf` / `not` failed.
    CombinatorMismatch,
    /// A key or element rejected by `unevaluatedProperties` /
    /// `unevaluatedItems`.
    UnevaluatedRejected,
}

impl FailureKind {
    /// Short human-readable description used by `Display`.
    fn describe(self) -> &'static str {
        match self {
            Self::TypeMismatch => "type mismatch",
            Self::EnumMismatch => "value not in enum",
            Self::ConstMismatch => "value differs from const",
            Self::RangeViolation => "numeric bound violated",
            Self::LengthViolation => "size bound violated",
            Self::PatternMismatch => "pattern mismatch",
            Self::FormatMismatch => "format mismatch",
            Self::RequiredMissing => "required property missing",
            Self::AdditionalRejected => "additional member rejected",
            Self::PropertyNameMismatch => "property name rejected",
            Self::DependencyUnsatisfied => "dependency unsatisfied",
            Self::ContainsUnsatisfied => "contains count out of bounds",
            Self::UniqueViolation => "duplicate items",
            Self::CombinatorMismatch => "combinator failed",
            Self::UnevaluatedRejected => "unevaluated member rejected",
        }
    }
}

/// A structured validation failure.
///
/// `schema_pointer` identifies the failing keyword in URI-fragment
/// escaping (`/patternProperties/%5ES_/type`); `json_pointer` identifies
/// the offending instance location in raw RFC 6901 form (`/001 invalid`,
/// with `/` for the root). `ref_trace` records every `$ref` boundary the
/// failure crossed, innermost first; it is appended lazily so the success
/// path allocates nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mismatch {
    /// Failure classification.
    pub kind: FailureKind,
    /// Pointer into the schema identifying the failing keyword.
    pub schema_pointer: String,
    /// The offending JSON subvalue.
    pub error_value: Value,
    /// Pointer into the instance identifying the offending location.
    pub json_pointer: String,
    /// `$ref` pointers crossed by this failure, innermost first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ref_trace: Vec<String>,
    /// Optional human-readable detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Branch failures, populated by logical combinators.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<Mismatch>,
    /// Schema pointers of the branches that matched, populated by `oneOf`
    /// when more than one branch validated.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<String>,
}

impl Mismatch {
    /// Build a mismatch with the three mandatory fields.
    pub fn new(
        kind: FailureKind,
        schema_pointer: impl Into<String>,
        error_value: Value,
        json_pointer: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            schema_pointer: schema_pointer.into(),
            error_value,
            json_pointer: json_pointer.into(),
            ref_trace: Vec::new(),
            reason: None,
            failures: Vec::new(),
            matches: Vec::new(),
        }
    }

    /// Attach a human-readable reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attach branch failures (combinators).
    pub fn with_failures(mut self, failures: Vec<Mismatch>) -> Self {
        self.failures = failures;
        self
    }

    /// Record a `$ref` crossing. Called as the failure unwinds, so the
    /// innermost crossing lands first.
    pub fn push_ref(&mut self, referring_pointer: impl Into<String>) {
        self.ref_trace.push(referring_pointer.into());
    }

    /// This failure plus every nested branch failure, depth-first.
    pub fn flatten(&self) -> Vec<&Mismatch> {
        let mut out = vec![self];
        for failure in &self.failures {
            out.extend(failure.flatten());
        }
        out
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = if self.json_pointer == "/" {
            "(root)"
        } else {
            self.json_pointer.as_str()
        };
        write!(f, "{location}: ")?;
        match &self.reason {
            Some(reason) => write!(f, "{reason}")?,
            None => write!(f, "{}", self.kind.describe())?,
        }
        write!(f, " [{}]", self.schema_pointer)?;
        if !self.ref_trace.is_empty() {
            write!(f, " via {}", self.ref_trace.join(" <- "))?;
        }
        Ok(())
    }
}

/// Fatal error raised while compiling a schema into a validator.
#[derive(Error, Debug)]
pub enum CompileError {
    /// A `$ref` target is syntactically absent from the schema tree, or
    /// points outside the document (remote references are unsupported).
    #[error("unresolved reference {reference:?} at {location}")]
    UnresolvedReference {
        /// The reference as written in the schema.
        reference: String,
        /// Schema location of the `$ref` keyword.
        location: String,
    },

    /// A keyword value has the wrong JSON type, or the node is not a
    /// schema at all.
    #[error("malformed schema at {location}: {reason}")]
    MalformedSchema {
        /// Schema location of the offending keyword.
        location: String,
        /// What was wrong.
        reason: String,
    },

    /// Schema text failed to decode.
    #[error("malformed schema text for {name:?}: {reason}")]
    MalformedJson {
        /// Name or path of the schema source.
        name: String,
        /// Decoder error detail.
        reason: String,
    },

    /// A keyword is not available in the selected draft, or a documented
    /// non-goal (float `multipleOf`).
    #[error("unsupported keyword {keyword:?} at {location}: {reason}")]
    UnsupportedKeyword {
        /// The keyword as written.
        keyword: String,
        /// Schema location of the keyword.
        location: String,
        /// Draft constraint or non-goal detail.
        reason: String,
    },

    /// An ECMA-262 regex construct with no translation to the host
    /// engine.
    #[error("unsupported regex {pattern:?} at {location}: {reason}")]
    UnsupportedRegex {
        /// The pattern as written.
        pattern: String,
        /// Schema location of the pattern.
        location: String,
        /// Which construct was rejected.
        reason: String,
    },

    /// A compile option is inconsistent (bad authority, unknown draft,
    /// entrypoint that resolves to nothing).
    #[error("invalid compile option: {0}")]
    InvalidOption(String),

    /// Pointer syntax error inside a `$ref` or option.
    #[error("invalid pointer: {0}")]
    Pointer(#[from] PointerParseError),

    /// IO error reading schema text.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
