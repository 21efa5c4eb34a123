//! # Size Bounds — `minItems` / `maxItems`, `minProperties` / `maxProperties`
//!
//! Member counts ride the accumulator: the fold tracks the traversal
//! index and the bounds are judged against it.

use serde_json::{Map, Value};

use schemac_core::CompileError;

use crate::artifact::Artifact;
use crate::filters::expect_size;
use crate::node::{Bound, Primitive};

pub(crate) fn parse(art: &mut Artifact, schema: &Map<String, Value>) -> Result<(), CompileError> {
    let ptr = art.ptr.clone();
    match art.primitive {
        Primitive::Array => {
            if let Some(value) = schema.get("minItems") {
                let bound = Bound {
                    limit: expect_size(value, &ptr, "minItems")?,
                    pointer: ptr.join("minItems").to_fragment(),
                };
                art.array_fold().min_items = Some(bound);
            }
            if let Some(value) = schema.get("maxItems") {
                let bound = Bound {
                    limit: expect_size(value, &ptr, "maxItems")?,
                    pointer: ptr.join("maxItems").to_fragment(),
                };
                art.array_fold().max_items = Some(bound);
            }
        }
        Primitive::Object => {
            if let Some(value) = schema.get("minProperties") {
                let bound = Bound {
                    limit: expect_size(value, &ptr, "minProperties")?,
                    pointer: ptr.join("minProperties").to_fragment(),
                };
                art.object_fold().min_properties = Some(bound);
            }
            if let Some(value) = schema.get("maxProperties") {
                let bound = Bound {
                    limit: expect_size(value, &ptr, "maxProperties")?,
                    pointer: ptr.join("maxProperties").to_fragment(),
                };
                art.object_fold().max_properties = Some(bound);
            }
        }
        _ => {}
    }
    Ok(())
}
