//! # Type Modules — One per JSON Primitive
//!
//! Each module owns the composition of its applicable filters into the
//! type's artifact: `minLength` binds to string only, `minimum` to
//! integer and number, `required` to object only, and so on. The guard
//! predicate for each primitive lives on [`Primitive::matches`]; the
//! array and object modules additionally contribute the member fold that
//! drives the accumulator pipeline.
//!
//! [`Primitive::matches`]: crate::node::Primitive::matches

pub(crate) mod array;
pub(crate) mod boolean;
pub(crate) mod integer;
pub(crate) mod null;
pub(crate) mod number;
pub(crate) mod object;
pub(crate) mod string;

use serde_json::{Map, Value};

use schemac_core::{CompileError, SchemaPointer};

use crate::artifact::Artifact;
use crate::context::Compilation;
use crate::node::{Primitive, TypeArm};

/// Build the arm for one admissible primitive: construct the empty
/// artifact, offer the schema node to the type's filters, and seal.
pub(crate) fn build_arm(
    comp: &mut Compilation<'_>,
    ptr: &SchemaPointer,
    schema: &Map<String, Value>,
    primitive: Primitive,
) -> Result<TypeArm, CompileError> {
    let mut art = Artifact::new(primitive, ptr.clone());
    match primitive {
        Primitive::Null => null::parse(&mut art, schema)?,
        Primitive::Boolean => boolean::parse(&mut art, schema)?,
        Primitive::String => string::parse(comp, &mut art, schema)?,
        Primitive::Integer => integer::parse(comp, &mut art, schema)?,
        Primitive::Number => number::parse(comp, &mut art, schema)?,
        Primitive::Array => array::parse(comp, &mut art, schema)?,
        Primitive::Object => object::parse(comp, &mut art, schema)?,
    }
    art.into_arm()
}
