//! # Artifact — Per-Subtree Build State
//!
//! One artifact exists per (schema subtree, admissible type) pair while
//! that subtree compiles. Filters append their compiled checks to it;
//! array/object filters additionally flag the accumulator and extend the
//! element pipeline. `into_arm` seals the artifact into a runtime
//! [`TypeArm`], enforcing that an artifact which never asked for an
//! accumulator carries no accumulator state.

use schemac_core::{CompileError, SchemaPointer};

use crate::node::{ArrayFold, Check, Fold, ObjectFold, Primitive, TypeArm};

/// Build state for one type arm of one schema subtree.
pub(crate) struct Artifact {
    pub primitive: Primitive,
    pub ptr: SchemaPointer,
    pub checks: Vec<Check>,
    /// Set by any filter whose check runs inside the element fold.
    pub needs_accumulator: bool,
    /// Set when the fold must retain the original sequence
    /// (`uniqueItems`).
    pub needs_array_in_accumulator: bool,
    array_fold: ArrayFold,
    object_fold: ObjectFold,
}

impl Artifact {
    pub(crate) fn new(primitive: Primitive, ptr: SchemaPointer) -> Self {
        Self {
            primitive,
            ptr,
            checks: Vec::new(),
            needs_accumulator: false,
            needs_array_in_accumulator: false,
            array_fold: ArrayFold::default(),
            object_fold: ObjectFold::default(),
        }
    }

    /// The array pipeline, flagging the accumulator requirement.
    pub(crate) fn array_fold(&mut self) -> &mut ArrayFold {
        self.needs_accumulator = true;
        &mut self.array_fold
    }

    /// The object pipeline, flagging the accumulator requirement.
    pub(crate) fn object_fold(&mut self) -> &mut ObjectFold {
        self.needs_accumulator = true;
        &mut self.object_fold
    }

    /// Seal into a runtime arm.
    pub(crate) fn into_arm(self) -> Result<TypeArm, CompileError> {
        let fold = if self.needs_accumulator {
            match self.primitive {
                Primitive::Array => Some(Fold::Array(self.array_fold)),
                Primitive::Object => Some(Fold::Object(self.object_fold)),
                other => {
                    return Err(CompileError::MalformedSchema {
                        location: self.ptr.to_fragment(),
                        reason: format!(
                            "internal: accumulator requested for {} artifact",
                            other.name()
                        ),
                    })
                }
            }
        } else {
            None
        };
        Ok(TypeArm {
            primitive: self.primitive,
            checks: self.checks,
            fold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_artifact_has_no_fold() {
        let art = Artifact::new(Primitive::String, SchemaPointer::root());
        let arm = art.into_arm().unwrap();
        assert!(arm.fold.is_none());
        assert!(arm.checks.is_empty());
    }

    #[test]
    fn test_accumulator_flag_produces_fold() {
        let mut art = Artifact::new(Primitive::Array, SchemaPointer::root());
        art.array_fold().unique = Some(crate::node::UniqueCheck {
            pointer: "/uniqueItems".to_string(),
        });
        art.needs_array_in_accumulator = true;
        let arm = art.into_arm().unwrap();
        assert!(matches!(arm.fold, Some(Fold::Array(_))));
    }

    #[test]
    fn test_accumulator_on_scalar_type_is_rejected() {
        let mut art = Artifact::new(Primitive::String, SchemaPointer::root());
        art.needs_accumulator = true;
        assert!(art.into_arm().is_err());
    }
}
