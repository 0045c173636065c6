#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use json_delta::{Pointer, Value};
use proptest::prelude::*;
use serde::{Deserialize, Deserializer};

pub fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

pub fn p(s: &str) -> Pointer {
    Pointer::parse(s).expect("valid pointer")
}

// =============================================================================
// Fixtures
// =============================================================================

/// One patch conformance case: apply `patch` to `doc`, then expect either
/// `expected` or an error whose code starts with `error`.
#[derive(Debug, Clone, Deserialize)]
pub struct PatchCase {
    pub comment: String,
    pub doc: serde_json::Value,
    pub patch: serde_json::Value,
    #[serde(default, deserialize_with = "present")]
    pub expected: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
    /// The document must be left untouched by a failing patch.
    #[serde(default)]
    pub unchanged: bool,
}

/// Keeps an explicit `null` distinct from an absent field.
fn present<'de, D: Deserializer<'de>>(d: D) -> Result<Option<serde_json::Value>, D::Error> {
    serde_json::Value::deserialize(d).map(Some)
}

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

pub fn load_patch_cases(name: &str) -> Vec<PatchCase> {
    let path = fixtures_dir().join(name);
    let data = fs::read(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()));
    serde_json::from_slice(&data).unwrap_or_else(|e| panic!("parse {}: {e}", path.display()))
}

// =============================================================================
// Proptest strategies
// =============================================================================

/// A small key alphabet so generated documents share keys and values often
/// enough to exercise move and copy detection.
fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::from("a")),
        Just(String::from("b")),
        Just(String::from("c")),
        Just(String::new()),
        Just(String::from("a/b")),
        Just(String::from("m~n")),
        "[a-d]{1,3}".prop_map(String::from),
    ]
}

fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-3i64..4).prop_map(Value::from),
        prop_oneof![Just(0.5f64), Just(2.0f64), Just(-1.25f64)]
            .prop_map(|f| Value::try_from(f).expect("finite")),
        prop_oneof![Just("x"), Just("y"), Just("")].prop_map(Value::from),
    ]
}

pub fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::array),
            prop::collection::vec((key_strategy(), inner), 0..5).prop_map(Value::object),
        ]
    })
}

/// A pair where the target is usually a light edit of the source.
pub fn related_pair_strategy() -> impl Strategy<Value = (Value, Value)> {
    (value_strategy(), value_strategy(), value_strategy()).prop_map(|(base, extra, other)| {
        let target = match (&base, &extra) {
            (Value::Object(map), _) => {
                let mut map = (**map).clone();
                map.insert("moved".into(), extra.clone());
                if let Some(first) = map.keys().next().cloned() {
                    map.shift_remove(&first);
                }
                Value::from(map)
            }
            (Value::Array(arr), _) => {
                let mut arr = (**arr).clone();
                arr.reverse();
                arr.push(extra.clone());
                Value::from(arr)
            }
            _ => other,
        };
        let source = Value::array([base.clone(), extra]);
        (source, Value::array([target, base]))
    })
}
