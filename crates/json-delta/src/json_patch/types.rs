//! Core types for the JSON Patch module.

use json_delta_pointer::Pointer;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::json_value::Value;

// ── Op enum ───────────────────────────────────────────────────────────────

/// A JSON Patch (RFC 6902) operation.
///
/// Equality is structural on the carried values, so an `add` of `false`
/// differs from an `add` of `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Add { path: Pointer, value: Value },
    Remove { path: Pointer },
    Replace { path: Pointer, value: Value },
    Move { from: Pointer, path: Pointer },
    Copy { from: Pointer, path: Pointer },
    Test { path: Pointer, value: Value },
}

impl Op {
    /// The wire name of the operation.
    pub fn op_name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Remove { .. } => "remove",
            Op::Replace { .. } => "replace",
            Op::Move { .. } => "move",
            Op::Copy { .. } => "copy",
            Op::Test { .. } => "test",
        }
    }

    /// The target path of the operation.
    pub fn path(&self) -> &Pointer {
        match self {
            Op::Add { path, .. }
            | Op::Remove { path }
            | Op::Replace { path, .. }
            | Op::Move { path, .. }
            | Op::Copy { path, .. }
            | Op::Test { path, .. } => path,
        }
    }

    /// The source path of `move` and `copy`.
    pub fn from_path(&self) -> Option<&Pointer> {
        match self {
            Op::Move { from, .. } | Op::Copy { from, .. } => Some(from),
            _ => None,
        }
    }

    /// The value carried by `add`, `replace` and `test`.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Op::Add { value, .. } | Op::Replace { value, .. } | Op::Test { value, .. } => {
                Some(value)
            }
            _ => None,
        }
    }
}

impl Serialize for Op {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        super::codec::json::to_json(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Op {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = Value::deserialize(deserializer)?;
        super::codec::json::from_json(&wire, 0, &DecodeOptions::default())
            .map_err(de::Error::custom)?
            .ok_or_else(|| de::Error::custom("skipped operation"))
    }
}

// ── Patch ─────────────────────────────────────────────────────────────────

/// An ordered list of operations, applied strictly in sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    ops: Vec<Op>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Op> {
        self.ops.iter()
    }

    pub fn operations(&self) -> &[Op] {
        &self.ops
    }

    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    pub fn into_operations(self) -> Vec<Op> {
        self.ops
    }
}

impl From<Vec<Op>> for Patch {
    fn from(ops: Vec<Op>) -> Self {
        Self { ops }
    }
}

impl FromIterator<Op> for Patch {
    fn from_iter<I: IntoIterator<Item = Op>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Patch {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Patch {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

impl Serialize for Patch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        super::codec::json::to_json_patch(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Patch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = Value::deserialize(deserializer)?;
        super::codec::json::from_json_patch(&wire, &DecodeOptions::default())
            .map_err(de::Error::custom)
    }
}

// ── Options ───────────────────────────────────────────────────────────────

/// Options for `apply_patch`.
#[derive(Debug, Clone, Default)]
pub struct ApplyPatchOptions {
    /// If true, mutate the document in place; a failure leaves the effects
    /// of earlier operations applied.
    /// If false, work on a copy and only commit it once every operation
    /// succeeded.
    pub mutate: bool,
    /// Apply the patch to the sub-document at this pointer instead of the
    /// whole document.
    pub relative_to: Option<Pointer>,
}

impl ApplyPatchOptions {
    pub fn mutate() -> Self {
        Self {
            mutate: true,
            relative_to: None,
        }
    }

    pub fn relative_to(mut self, pointer: Pointer) -> Self {
        self.relative_to = Some(pointer);
        self
    }
}

/// What the decoder does with an `op` name it does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownOpPolicy {
    /// Fail with `UNKNOWN_OPERATION`.
    #[default]
    Reject,
    /// Drop the operation and keep decoding.
    Skip,
}

/// Options for decoding a patch from its wire form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub unknown_ops: UnknownOpPolicy,
}

impl DecodeOptions {
    pub fn skip_unknown() -> Self {
        Self {
            unknown_ops: UnknownOpPolicy::Skip,
        }
    }
}
