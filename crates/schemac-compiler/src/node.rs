//! # Compiled Node Model — What a Schema Subtree Lowers To
//!
//! Every schema subtree materializes as one [`Node`] in the validator's
//! node table, addressed by a [`ValidatorId`]. Subschemas reference each
//! other exclusively through ids, which is what makes forward references
//! (and therefore self-referential schemas) safe: an id can be handed out
//! before the node behind it is built.
//!
//! A dispatch node carries one [`TypeArm`] per admissible primitive. At
//! validation time the first arm whose guard matches runs the node's
//! combining checks, then its own checks, then (arrays/objects) its fold.
//! A value matching no arm is reported through the catch-all `/type`
//! clause.
//!
//! Checks carry their schema pointers pre-rendered in URI-fragment
//! escaping so the failure path never re-derives them.

use regex::Regex;
use serde_json::{Number, Value};

use crate::options::FormatCheckFn;

/// Stable identifier of a compiled validator node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ValidatorId(pub(crate) usize);

/// One compiled schema subtree.
#[derive(Debug)]
pub(crate) enum Node {
    /// Boolean schema `true`: accepts anything.
    AcceptAll,
    /// Boolean schema `false`: rejects everything.
    RejectAll {
        /// Pointer of the `false` schema itself.
        schema_pointer: String,
    },
    /// A mapping schema compiled into type-guarded arms.
    Dispatch(DispatchNode),
}

#[derive(Debug)]
pub(crate) struct DispatchNode {
    /// Pre-rendered `<node>/type` fragment for the catch-all clause.
    pub type_pointer: String,
    /// Filters applicable across all primitive types, run once per
    /// dispatch in declaration order.
    pub combining: Vec<Check>,
    /// One arm per admissible primitive, in canonical order (integer
    /// precedes number so integer-typed values prefer the integer arm).
    pub arms: Vec<TypeArm>,
}

/// The seven JSON primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Primitive {
    Null,
    Boolean,
    String,
    Integer,
    Number,
    Array,
    Object,
}

impl Primitive {
    /// Guard predicate: does `value` belong to this primitive?
    ///
    /// A JSON number with an integer representation matches both
    /// `Integer` and `Number`; a fractional number matches only `Number`.
    /// Exact-integer-valued floats are not treated as integers.
    pub(crate) fn matches(self, value: &Value) -> bool {
        match self {
            Self::Null => value.is_null(),
            Self::Boolean => value.is_boolean(),
            Self::String => value.is_string(),
            Self::Integer => value.as_number().is_some_and(|n| !n.is_f64()),
            Self::Number => value.is_number(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }

    /// The keyword spelling used by `type`.
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Parse a `type` keyword entry.
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "null" => Some(Self::Null),
            "boolean" => Some(Self::Boolean),
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "array" => Some(Self::Array),
            "object" => Some(Self::Object),
            _ => None,
        }
    }

    /// Canonical arm ordering.
    pub(crate) const ALL: [Primitive; 7] = [
        Primitive::Null,
        Primitive::Boolean,
        Primitive::String,
        Primitive::Integer,
        Primitive::Number,
        Primitive::Array,
        Primitive::Object,
    ];
}

/// One type-guarded arm of a dispatch node.
#[derive(Debug)]
pub(crate) struct TypeArm {
    pub primitive: Primitive,
    /// Scalar checks contributed by this type's filters.
    pub checks: Vec<Check>,
    /// The accumulator fold, present only for array/object arms that
    /// need one.
    pub fold: Option<Fold>,
}

/// A compiled `pattern` / `patternProperties` regex with its source kept
/// for error reporting.
#[derive(Debug)]
pub(crate) struct CompiledPattern {
    pub regex: Regex,
    pub source: String,
}

/// One compiled keyword check.
#[derive(Debug)]
pub(crate) enum Check {
    // -- combining (all types) --
    Enum {
        values: Vec<Value>,
        pointer: String,
    },
    Const {
        value: Value,
        pointer: String,
    },
    Ref {
        target: ValidatorId,
        /// Pointer of the `$ref` keyword, recorded in `ref_trace`.
        pointer: String,
    },
    AllOf {
        branches: Vec<ValidatorId>,
        pointer: String,
    },
    AnyOf {
        branches: Vec<ValidatorId>,
        pointer: String,
    },
    OneOf {
        /// Branch ids with their schema pointers (for `matches`).
        branches: Vec<(ValidatorId, String)>,
        pointer: String,
    },
    Not {
        branch: ValidatorId,
        pointer: String,
    },
    IfThenElse {
        condition: ValidatorId,
        then_branch: Option<ValidatorId>,
        else_branch: Option<ValidatorId>,
    },

    // -- numeric --
    Minimum {
        bound: Number,
        exclusive: bool,
        pointer: String,
    },
    Maximum {
        bound: Number,
        exclusive: bool,
        pointer: String,
    },
    MultipleOf {
        divisor: u64,
        pointer: String,
    },

    // -- string --
    MinLength {
        limit: usize,
        pointer: String,
    },
    MaxLength {
        limit: usize,
        pointer: String,
    },
    Pattern {
        pattern: CompiledPattern,
        pointer: String,
    },
    Format {
        name: String,
        check: FormatCheckFn,
        pointer: String,
    },
}

/// The accumulator fold of an array or object arm.
#[derive(Debug)]
pub(crate) enum Fold {
    Array(ArrayFold),
    Object(ObjectFold),
}

/// Per-element pipeline and post-traversal checks for arrays.
#[derive(Debug, Default)]
pub(crate) struct ArrayFold {
    /// Positional schemas (`items` array / `prefixItems`).
    pub prefix: Vec<ValidatorId>,
    /// Governs elements beyond the prefix.
    pub rest: Option<RestItems>,
    /// `contains` with its count bounds.
    pub contains: Option<ContainsCheck>,
    /// `uniqueItems: true`; the fold retains the original sequence.
    pub unique: Option<UniqueCheck>,
    pub min_items: Option<Bound>,
    pub max_items: Option<Bound>,
    /// `unevaluatedItems`, applied after evaluated-index computation.
    pub unevaluated: Option<UnevaluatedCheck>,
}

/// Per-member pipeline and post-traversal checks for objects.
#[derive(Debug, Default)]
pub(crate) struct ObjectFold {
    /// `properties`, in key order.
    pub properties: Vec<(String, ValidatorId)>,
    /// `patternProperties`: every matching pattern applies.
    pub patterns: Vec<(CompiledPattern, ValidatorId)>,
    /// `additionalProperties`, for keys matched by neither names nor
    /// patterns.
    pub additional: Option<AdditionalMembers>,
    /// `propertyNames`: each key validated as a string.
    pub property_names: Option<ValidatorId>,
    /// `required` keys with the pointer of the `required` keyword.
    pub required: Option<RequiredCheck>,
    /// `dependencies` / `dependentRequired` / `dependentSchemas`.
    pub dependencies: Vec<DependencyCheck>,
    pub min_properties: Option<Bound>,
    pub max_properties: Option<Bound>,
    /// `unevaluatedProperties`, applied after evaluated-key computation.
    pub unevaluated: Option<UnevaluatedCheck>,
}

/// A size bound with its keyword pointer.
#[derive(Debug)]
pub(crate) struct Bound {
    pub limit: usize,
    pub pointer: String,
}

/// What governs members not matched by positional/name/pattern filters.
#[derive(Debug)]
pub(crate) enum RestItems {
    Schema(ValidatorId),
    Deny { pointer: String },
}

/// `additionalProperties` as a schema or outright rejection.
#[derive(Debug)]
pub(crate) enum AdditionalMembers {
    Schema(ValidatorId),
    Deny { pointer: String },
}

#[derive(Debug)]
pub(crate) struct ContainsCheck {
    pub target: ValidatorId,
    /// Default 1 (`contains` alone).
    pub min: usize,
    pub max: Option<usize>,
    /// Pointer reported when fewer than `min` elements match
    /// (`/minContains` when present, else `/contains`).
    pub min_pointer: String,
    /// Pointer reported when more than `max` elements match.
    pub max_pointer: String,
}

#[derive(Debug)]
pub(crate) struct UniqueCheck {
    pub pointer: String,
}

#[derive(Debug)]
pub(crate) struct RequiredCheck {
    pub keys: Vec<String>,
    /// Pointer of the `required` keyword; the failing index is appended.
    pub pointer: String,
}

#[derive(Debug)]
pub(crate) struct DependencyCheck {
    /// The key whose presence triggers the dependency.
    pub key: String,
    pub kind: DependencyKind,
    /// Pointer of this dependency entry.
    pub pointer: String,
}

#[derive(Debug)]
pub(crate) enum DependencyKind {
    /// Every listed key must also be present.
    Keys(Vec<String>),
    /// The schema must validate against the whole object.
    Schema(ValidatorId),
}

/// `unevaluatedItems` / `unevaluatedProperties`.
#[derive(Debug)]
pub(crate) enum UnevaluatedCheck {
    Schema { target: ValidatorId },
    Deny { pointer: String },
}
