//! # `contains` with `minContains` / `maxContains`
//!
//! The fold counts elements the contains-schema accepts; the traversal
//! succeeds iff `minContains <= count <= maxContains` (defaults 1 and
//! unbounded). The count keywords arrived in 2019-09; `contains` itself
//! in draft 6.

use serde_json::{Map, Value};

use schemac_core::CompileError;

use crate::artifact::Artifact;
use crate::context::Compilation;
use crate::filters::{expect_size, unsupported_in_draft};
use crate::node::ContainsCheck;

pub(crate) fn parse(
    comp: &mut Compilation<'_>,
    art: &mut Artifact,
    schema: &Map<String, Value>,
) -> Result<(), CompileError> {
    let ptr = art.ptr.clone();
    let Some(_subschema) = schema.get("contains") else {
        for keyword in ["minContains", "maxContains"] {
            if schema.contains_key(keyword) {
                return Err(CompileError::MalformedSchema {
                    location: ptr.join(keyword).to_fragment(),
                    reason: format!("{keyword} without contains"),
                });
            }
        }
        return Ok(());
    };

    if !comp.draft.has_const_and_contains() {
        return Err(unsupported_in_draft(
            "contains",
            &ptr,
            format!(
                "contains requires draft 6 or newer, selected draft is {}",
                comp.draft.as_str()
            ),
        ));
    }

    let mut min = 1;
    let mut min_pointer = ptr.join("contains").to_fragment();
    let mut max = None;

    for keyword in ["minContains", "maxContains"] {
        if let Some(value) = schema.get(keyword) {
            if !comp.draft.has_dependent_keywords() {
                return Err(unsupported_in_draft(
                    keyword,
                    &ptr,
                    format!(
                        "{keyword} requires draft 2019-09 or newer, selected draft is {}",
                        comp.draft.as_str()
                    ),
                ));
            }
            let limit = expect_size(value, &ptr, keyword)?;
            if keyword == "minContains" {
                min = limit;
                min_pointer = ptr.join("minContains").to_fragment();
            } else {
                max = Some(limit);
            }
        }
    }

    let target = comp.subschema(&ptr.join("contains"), &ptr);
    art.array_fold().contains = Some(ContainsCheck {
        target,
        min,
        max,
        min_pointer,
        max_pointer: ptr.join("maxContains").to_fragment(),
    });
    Ok(())
}
