//! Structural hash of a [`Value`].
//!
//! Multiply-and-add mixing (`state * 33 + n`) with 64-bit wrapping arithmetic
//! and a distinct constant per node type. Object members are mixed in sorted
//! key order and numbers through their equality key, so values that compare
//! equal always hash equal.

use crate::json_value::{Canonical, Number, Object, Value};

pub const START_STATE: u64 = 5381;

pub const NULL_CONST: u64 = 982_452_847;
pub const TRUE_CONST: u64 = 982_453_247;
pub const FALSE_CONST: u64 = 982_454_243;
pub const ARRAY_CONST: u64 = 982_452_259;
pub const STRING_CONST: u64 = 982_453_601;
pub const OBJECT_CONST: u64 = 982_454_533;
pub const INTEGER_CONST: u64 = 982_451_653;
pub const FLOAT_CONST: u64 = 982_451_707;

/// Mix a single integer into the hash state.
pub fn update_num(state: u64, num: u64) -> u64 {
    state.wrapping_shl(5).wrapping_add(state).wrapping_add(num)
}

/// Mix a string into the hash state, length first.
pub fn update_str(mut state: u64, s: &str) -> u64 {
    state = update_num(state, STRING_CONST);
    state = update_num(state, s.len() as u64);
    for &b in s.as_bytes().iter().rev() {
        state = update_num(state, u64::from(b));
    }
    state
}

pub fn update_number(state: u64, n: &Number) -> u64 {
    match n.canonical() {
        Canonical::Bool(true) => update_num(state, TRUE_CONST),
        Canonical::Bool(false) => update_num(state, FALSE_CONST),
        Canonical::Int(i) => {
            let state = update_num(state, INTEGER_CONST);
            let state = update_num(state, i as u64);
            update_num(state, (i >> 64) as u64)
        }
        Canonical::Float(bits) => update_num(update_num(state, FLOAT_CONST), bits),
    }
}

/// Mix any value into the hash state.
pub fn update_value(state: u64, value: &Value) -> u64 {
    match value {
        Value::Null => update_num(state, NULL_CONST),
        Value::Number(n) => update_number(state, n),
        Value::String(s) => update_str(state, s),
        Value::Array(arr) => {
            let mut state = update_num(state, ARRAY_CONST);
            state = update_num(state, arr.len() as u64);
            for item in arr.iter() {
                state = update_value(state, item);
            }
            state
        }
        Value::Object(map) => update_object(state, map),
    }
}

/// Mix an object into the hash state with its keys sorted.
pub fn update_object(state: u64, map: &Object) -> u64 {
    let mut state = update_num(state, OBJECT_CONST);
    state = update_num(state, map.len() as u64);
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    for (key, value) in entries {
        state = update_str(state, key);
        state = update_value(state, value);
    }
    state
}

/// Hash any value.
pub fn hash(value: &Value) -> u64 {
    update_value(START_STATE, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn h(json: serde_json::Value) -> u64 {
        hash(&Value::from(json))
    }

    #[test]
    fn hash_null() {
        assert_eq!(h(json!(null)), update_num(START_STATE, NULL_CONST));
    }

    #[test]
    fn hash_booleans() {
        assert_eq!(h(json!(true)), update_num(START_STATE, TRUE_CONST));
        assert_eq!(h(json!(false)), update_num(START_STATE, FALSE_CONST));
    }

    #[test]
    fn key_order_does_not_matter() {
        assert_eq!(h(json!({"a": 1, "b": [2]})), h(json!({"b": [2], "a": 1})));
    }

    #[test]
    fn equal_numbers_hash_equal() {
        assert_eq!(h(json!(42)), h(json!(42.0)));
        assert_eq!(h(json!([1, 2.0])), h(json!([1.0, 2])));
    }

    #[test]
    fn distinguishes_types() {
        assert_ne!(h(json!(0)), h(json!(false)));
        assert_ne!(h(json!(1)), h(json!(true)));
        assert_ne!(h(json!("1")), h(json!(1)));
        assert_ne!(h(json!([])), h(json!({})));
        assert_ne!(h(json!(null)), h(json!([])));
    }

    #[test]
    fn distinguishes_structure() {
        assert_ne!(h(json!([1, 2])), h(json!([2, 1])));
        assert_ne!(h(json!([[1], 2])), h(json!([1, [2]])));
        assert_ne!(h(json!({"a": "b"})), h(json!({"b": "a"})));
        assert_ne!(h(json!(0.5)), h(json!(0.25)));
        assert_ne!(h(json!(-1)), h(json!(u64::MAX)));
    }
}
