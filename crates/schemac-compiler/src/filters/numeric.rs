//! # Numeric Bounds — `minimum`, `maximum`, exclusives, `multipleOf`
//!
//! Bounds compare mathematically across integer and float
//! representations. Draft 4 spells exclusivity as boolean
//! `exclusiveMinimum` / `exclusiveMaximum` keywords that strengthen the
//! corresponding bound; draft 6 turned both into standalone numeric
//! bounds. Integer `multipleOf` divides integer-represented values;
//! float divisors are a documented non-goal (floating-point remainder is
//! not reliably defined) and fail compilation.

use serde_json::{Map, Number, Value};

use schemac_core::{CompileError, SchemaPointer};

use crate::context::Compilation;
use crate::node::Check;

pub(crate) fn parse(
    comp: &Compilation<'_>,
    ptr: &SchemaPointer,
    schema: &Map<String, Value>,
    out: &mut Vec<Check>,
) -> Result<(), CompileError> {
    let boolean_exclusives = comp.draft.boolean_exclusive_bounds();

    if let Some(bound) = schema.get("minimum") {
        let bound = expect_number(bound, ptr, "minimum")?;
        let exclusive = if boolean_exclusives {
            draft4_exclusive_flag(schema, ptr, "exclusiveMinimum")?
        } else {
            false
        };
        out.push(Check::Minimum {
            bound,
            exclusive,
            pointer: ptr.join("minimum").to_fragment(),
        });
    }
    if let Some(bound) = schema.get("maximum") {
        let bound = expect_number(bound, ptr, "maximum")?;
        let exclusive = if boolean_exclusives {
            draft4_exclusive_flag(schema, ptr, "exclusiveMaximum")?
        } else {
            false
        };
        out.push(Check::Maximum {
            bound,
            exclusive,
            pointer: ptr.join("maximum").to_fragment(),
        });
    }

    if !boolean_exclusives {
        if let Some(bound) = schema.get("exclusiveMinimum") {
            let bound = expect_number(bound, ptr, "exclusiveMinimum")?;
            out.push(Check::Minimum {
                bound,
                exclusive: true,
                pointer: ptr.join("exclusiveMinimum").to_fragment(),
            });
        }
        if let Some(bound) = schema.get("exclusiveMaximum") {
            let bound = expect_number(bound, ptr, "exclusiveMaximum")?;
            out.push(Check::Maximum {
                bound,
                exclusive: true,
                pointer: ptr.join("exclusiveMaximum").to_fragment(),
            });
        }
    } else {
        // Draft 4 rejects a boolean exclusive without its bound.
        for keyword in ["exclusiveMinimum", "exclusiveMaximum"] {
            let bound_keyword = if keyword == "exclusiveMinimum" {
                "minimum"
            } else {
                "maximum"
            };
            if schema.contains_key(keyword) && !schema.contains_key(bound_keyword) {
                return Err(CompileError::MalformedSchema {
                    location: ptr.join(keyword).to_fragment(),
                    reason: format!("{keyword} requires {bound_keyword} in draft 4"),
                });
            }
        }
    }

    if let Some(divisor) = schema.get("multipleOf") {
        let location = ptr.join("multipleOf");
        let Some(divisor_num) = divisor.as_number() else {
            return Err(CompileError::MalformedSchema {
                location: location.to_fragment(),
                reason: format!("multipleOf must be a number, got {divisor}"),
            });
        };
        if divisor_num.is_f64() {
            return Err(CompileError::UnsupportedKeyword {
                keyword: "multipleOf".to_string(),
                location: location.to_fragment(),
                reason: "non-integer multipleOf is unsupported".to_string(),
            });
        }
        let Some(divisor) = divisor_num.as_u64().filter(|&d| d > 0) else {
            return Err(CompileError::MalformedSchema {
                location: location.to_fragment(),
                reason: format!("multipleOf must be a positive integer, got {divisor}"),
            });
        };
        out.push(Check::MultipleOf {
            divisor,
            pointer: location.to_fragment(),
        });
    }
    Ok(())
}

fn expect_number(
    value: &Value,
    ptr: &SchemaPointer,
    keyword: &str,
) -> Result<Number, CompileError> {
    match value.as_number() {
        Some(n) => Ok(n.clone()),
        None => Err(CompileError::MalformedSchema {
            location: ptr.join(keyword).to_fragment(),
            reason: format!("{keyword} must be a number, got {value}"),
        }),
    }
}

/// Draft-4 boolean exclusive flag for `minimum` / `maximum`.
fn draft4_exclusive_flag(
    schema: &Map<String, Value>,
    ptr: &SchemaPointer,
    keyword: &str,
) -> Result<bool, CompileError> {
    match schema.get(keyword) {
        None => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(other) => Err(CompileError::MalformedSchema {
            location: ptr.join(keyword).to_fragment(),
            reason: format!("{keyword} must be a boolean in draft 4, got {other}"),
        }),
    }
}
