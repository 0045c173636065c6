//! JSON codec for JSON Patch operations.
//!
//! Converts operations to and from their RFC 6902 wire objects
//! (`{"op": ..., "path": ..., "from": ..., "value": ...}`).

use json_delta_pointer::Pointer;

use crate::error::{JsonError, Result};
use crate::json_patch::types::{DecodeOptions, Op, Patch, UnknownOpPolicy};
use crate::json_value::{Object, Value};

// ── Field helpers ─────────────────────────────────────────────────────────

fn encode_path(path: &Pointer) -> Value {
    Value::String(path.to_string())
}

/// A pointer field; absent and non-string fields are both reported missing.
fn decode_path(obj: &Object, op: &str, index: usize, field: &str) -> Result<Pointer> {
    let text = obj
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| JsonError::missing_field(op, index, field))?;
    Ok(Pointer::parse(text)?)
}

fn decode_value(obj: &Object, op: &str, index: usize) -> Result<Value> {
    obj.get("value")
        .cloned()
        .ok_or_else(|| JsonError::missing_field(op, index, "value"))
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Serialize an `Op` to its wire object.
pub fn to_json(op: &Op) -> Value {
    let mut m = Object::new();
    m.insert("op".into(), Value::from(op.op_name()));
    if let Some(from) = op.from_path() {
        m.insert("from".into(), encode_path(from));
    }
    m.insert("path".into(), encode_path(op.path()));
    if let Some(value) = op.value() {
        m.insert("value".into(), value.clone());
    }
    Value::from(m)
}

/// Serialize a patch to its wire array.
pub fn to_json_patch(patch: &Patch) -> Value {
    patch.iter().map(to_json).collect()
}

// ── Deserialization ───────────────────────────────────────────────────────

/// Deserialize the operation at position `index` of a patch.
///
/// Returns `Ok(None)` when the operation is unknown and `options` asks for
/// unknown operations to be skipped.
pub fn from_json(v: &Value, index: usize, options: &DecodeOptions) -> Result<Option<Op>> {
    let obj = v.as_object().ok_or(JsonError::InvalidPatchFormat)?;
    let name = obj
        .get("op")
        .and_then(Value::as_str)
        .ok_or_else(|| JsonError::missing_field("", index, "op"))?;

    let op = match name {
        "add" => Op::Add {
            path: decode_path(obj, name, index, "path")?,
            value: decode_value(obj, name, index)?,
        },
        "remove" => Op::Remove {
            path: decode_path(obj, name, index, "path")?,
        },
        "replace" => Op::Replace {
            path: decode_path(obj, name, index, "path")?,
            value: decode_value(obj, name, index)?,
        },
        "move" => Op::Move {
            from: decode_path(obj, name, index, "from")?,
            path: decode_path(obj, name, index, "path")?,
        },
        "copy" => Op::Copy {
            from: decode_path(obj, name, index, "from")?,
            path: decode_path(obj, name, index, "path")?,
        },
        "test" => Op::Test {
            path: decode_path(obj, name, index, "path")?,
            value: decode_value(obj, name, index)?,
        },
        other => {
            return match options.unknown_ops {
                UnknownOpPolicy::Reject => Err(JsonError::UnknownOperation(other.to_string())),
                UnknownOpPolicy::Skip => {
                    tracing::debug!(index, op = other, "skipping unknown patch operation");
                    Ok(None)
                }
            };
        }
    };
    Ok(Some(op))
}

/// Deserialize a wire array into a patch.
///
/// # Errors
///
/// [`JsonError::InvalidPatchFormat`] if `v` is not an array of objects;
/// otherwise the first error of [`from_json`].
pub fn from_json_patch(v: &Value, options: &DecodeOptions) -> Result<Patch> {
    let arr = v.as_array().ok_or(JsonError::InvalidPatchFormat)?;
    let mut patch = Patch::new();
    for (index, item) in arr.iter().enumerate() {
        if let Some(op) = from_json(item, index, options)? {
            patch.push(op);
        }
    }
    Ok(patch)
}

impl Patch {
    /// Parse patch JSON text, rejecting unknown operations.
    pub fn from_slice(bytes: &[u8]) -> Result<Patch> {
        Self::from_slice_with(bytes, &DecodeOptions::default())
    }

    pub fn from_slice_with(bytes: &[u8], options: &DecodeOptions) -> Result<Patch> {
        from_json_patch(&Value::from_slice(bytes)?, options)
    }

    /// The wire array form.
    pub fn to_value(&self) -> Value {
        to_json_patch(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    fn decode(json: serde_json::Value) -> Result<Patch> {
        from_json_patch(&v(json), &DecodeOptions::default())
    }

    #[test]
    fn decodes_all_operations() {
        let patch = decode(json!([
            {"op": "add", "path": "/a", "value": 1},
            {"op": "remove", "path": "/b"},
            {"op": "replace", "path": "/c", "value": null},
            {"op": "move", "from": "/d", "path": "/e"},
            {"op": "copy", "from": "/f", "path": "/g"},
            {"op": "test", "path": "/h", "value": [true]}
        ]))
        .unwrap();
        let names: Vec<_> = patch.iter().map(Op::op_name).collect();
        assert_eq!(names, ["add", "remove", "replace", "move", "copy", "test"]);
        assert_eq!(
            patch.operations()[3],
            Op::Move {
                from: Pointer::parse("/d").unwrap(),
                path: Pointer::parse("/e").unwrap(),
            }
        );
        assert_eq!(patch.operations()[2].value(), Some(&Value::Null));
    }

    #[test]
    fn encodes_wire_objects() {
        let patch = decode(json!([
            {"op": "copy", "from": "/a~1b", "path": "/c"},
            {"op": "test", "path": "", "value": {"x": 1}}
        ]))
        .unwrap();
        let wire = serde_json::Value::from(to_json_patch(&patch));
        assert_eq!(
            wire,
            json!([
                {"op": "copy", "from": "/a~1b", "path": "/c"},
                {"op": "test", "path": "", "value": {"x": 1}}
            ])
        );
        assert_eq!(
            serde_json::to_string(&patch.operations()[0]).unwrap(),
            r#"{"op":"copy","from":"/a~1b","path":"/c"}"#
        );
    }

    #[test]
    fn rejects_non_array_or_non_object() {
        assert_eq!(decode(json!({"op": "add"})), Err(JsonError::InvalidPatchFormat));
        assert_eq!(decode(json!([1])), Err(JsonError::InvalidPatchFormat));
        assert_eq!(decode(json!("x")), Err(JsonError::InvalidPatchFormat));
    }

    #[test]
    fn reports_missing_fields_with_index() {
        assert_eq!(
            decode(json!([{"op": "test", "path": "/a", "value": 1}, {"op": "add", "path": "/a"}])),
            Err(JsonError::missing_field("add", 1, "value"))
        );
        assert_eq!(
            decode(json!([{"op": "move", "path": "/a"}])),
            Err(JsonError::missing_field("move", 0, "from"))
        );
        assert_eq!(
            decode(json!([{"op": "remove"}])),
            Err(JsonError::missing_field("remove", 0, "path"))
        );
        assert_eq!(
            decode(json!([{"path": "/a"}])),
            Err(JsonError::missing_field("", 0, "op"))
        );
        assert_eq!(
            decode(json!([{"op": "remove", "path": 7}])),
            Err(JsonError::missing_field("remove", 0, "path"))
        );
    }

    #[test]
    fn value_may_be_null() {
        let patch = decode(json!([{"op": "add", "path": "/a", "value": null}])).unwrap();
        assert_eq!(patch.operations()[0].value(), Some(&Value::Null));
    }

    #[test]
    fn invalid_pointer_text() {
        assert_eq!(
            decode(json!([{"op": "remove", "path": "a"}])),
            Err(JsonError::InvalidPointerSyntax)
        );
    }

    #[test]
    fn unknown_operations_follow_policy() {
        let wire = v(json!([
            {"op": "add", "path": "/a", "value": 1},
            {"op": "flip", "path": "/b"}
        ]));
        assert_eq!(
            from_json_patch(&wire, &DecodeOptions::default()),
            Err(JsonError::UnknownOperation("flip".into()))
        );
        let patch = from_json_patch(&wire, &DecodeOptions::skip_unknown()).unwrap();
        assert_eq!(patch.len(), 1);
        assert_eq!(patch.operations()[0].op_name(), "add");
    }

    #[test]
    fn serde_patch_uses_wire_array() {
        let patch: Patch =
            serde_json::from_str(r#"[{"op":"remove","path":"/x/0"}]"#).unwrap();
        assert_eq!(
            patch.operations(),
            [Op::Remove {
                path: Pointer::parse("/x/0").unwrap()
            }]
        );
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"[{"op":"remove","path":"/x/0"}]"#);
        assert!(serde_json::from_str::<Patch>(r#"[{"op":"nope","path":""}]"#).is_err());
    }
}
