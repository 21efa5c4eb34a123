//! # Structural Equality — One Definition for `enum`, `const`, `uniqueItems`
//!
//! JSON equality in this system is structural: two numbers are equal iff
//! their mathematical values match (`1 == 1.0`), two objects are equal iff
//! their key sets and per-key structural values match, and two arrays are
//! equal iff they are element-wise equal. `serde_json`'s derived
//! `PartialEq` compares `1` and `1.0` unequal, so the keywords that need
//! value equality go through this module instead.

use std::cmp::Ordering;

use serde_json::{Number, Value};

/// Mathematical equality of two JSON numbers.
pub fn num_eq(a: &Number, b: &Number) -> bool {
    num_cmp(a, b) == Ordering::Equal
}

/// Mathematical ordering of two JSON numbers.
///
/// Integer representations compare exactly; once a float is involved both
/// sides convert to `f64`. JSON numbers are never NaN, so the comparison
/// is total.
pub fn num_cmp(a: &Number, b: &Number) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x.cmp(&y);
    }
    // Mixed signed/unsigned beyond i64 range.
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_u64()) {
        if x < 0 {
            return Ordering::Less;
        }
        return (x as u64).cmp(&y);
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_i64()) {
        if y < 0 {
            return Ordering::Greater;
        }
        return x.cmp(&(y as u64));
    }
    let x = a.as_f64().unwrap_or(0.0);
    let y = b.as_f64().unwrap_or(0.0);
    x.partial_cmp(&y).unwrap_or(Ordering::Equal)
}

/// Structural equality of two JSON values.
pub fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => num_eq(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| json_equal(x, y)))
        }
        _ => false,
    }
}
