//! JSON Patch diff: generate a JSON Patch from two document values.
//!
//! The generator runs in two passes:
//!
//! 1. Walk both trees together and record every maximal subtree that is
//!    equal on both sides. These are the candidate sources for `copy`.
//! 2. Walk again and emit operations. Whenever a value has to be inserted,
//!    an earlier `remove` of an equal value is turned into a `move`, or an
//!    unchanged equal subtree is copied; only otherwise is the value added.
//!
//! Matching is greedy and first-come. The result is not a minimal patch,
//! but applying it to the source always yields the target.

use std::collections::HashMap;

use json_delta_pointer::{Pointer, APPEND_MARKER};

use crate::error::Result;
use crate::json_hash::hash;
use crate::json_patch::types::{Op, Patch};
use crate::json_value::Value;

// ── Public API ────────────────────────────────────────────────────────────

/// Generate the operations that transform `src` into `dst`.
pub fn diff(src: &Value, dst: &Value) -> Vec<Op> {
    let mut generator = Generator::default();
    generator.index_unchanged(&Pointer::root(), src, dst);
    generator.emit(&Pointer::root(), src, dst);
    let ops = generator.finish();
    tracing::debug!(ops = ops.len(), "diff");
    ops
}

impl Patch {
    /// See [`diff`].
    pub fn diff(src: &Value, dst: &Value) -> Patch {
        Patch::from(diff(src, dst))
    }

    /// Parse two JSON texts and diff them.
    pub fn diff_slices(src: &[u8], dst: &[u8]) -> Result<Patch> {
        let src = Value::from_slice(src)?;
        let dst = Value::from_slice(dst)?;
        Ok(Patch::diff(&src, &dst))
    }
}

// ── Generator state ───────────────────────────────────────────────────────

/// Position of a removed element in a source array.
#[derive(Debug, Clone)]
struct ArrayOrigin {
    array: Pointer,
    index: usize,
}

#[derive(Debug)]
struct Emitted {
    op: Op,
    /// Set when the op takes an element out of an array (a `remove`, or a
    /// `move` that replaced one), so its index can be corrected once the
    /// final order is known.
    origin: Option<ArrayOrigin>,
}

#[derive(Default)]
struct Generator<'a> {
    /// Emitted ops in order; a `None` slot is a `remove` turned into a `move`.
    slots: Vec<Option<Emitted>>,
    /// Live removals by value hash, in emission order.
    removed: HashMap<u64, Vec<(usize, &'a Value)>>,
    /// Unchanged subtrees by value hash, in discovery order.
    unchanged: HashMap<u64, Vec<(Pointer, &'a Value)>>,
}

impl<'a> Generator<'a> {
    // ── Pass 1 ────────────────────────────────────────────────────────────

    fn index_unchanged(&mut self, pointer: &Pointer, a: &'a Value, b: &'a Value) {
        if a == b {
            self.unchanged
                .entry(hash(a))
                .or_default()
                .push((pointer.clone(), a));
            return;
        }
        match (a, b) {
            (Value::Object(x), Value::Object(y)) => {
                for (key, va) in x.iter() {
                    if let Some(vb) = y.get(key) {
                        self.index_unchanged(&pointer.append(key.as_str()), va, vb);
                    }
                }
            }
            (Value::Array(x), Value::Array(y)) => {
                for (index, (va, vb)) in x.iter().zip(y.iter()).enumerate() {
                    self.index_unchanged(&pointer.append_index(index), va, vb);
                }
            }
            _ => {}
        }
    }

    // ── Pass 2 ────────────────────────────────────────────────────────────

    fn emit(&mut self, pointer: &Pointer, src: &'a Value, dst: &'a Value) {
        if src == dst {
            return;
        }
        if !src.is_type_compatible(dst) || !src.is_container() {
            self.push(
                Op::Replace {
                    path: pointer.clone(),
                    value: dst.clone(),
                },
                None,
            );
            return;
        }
        match (src, dst) {
            (Value::Object(s), Value::Object(d)) => {
                for (key, value) in s.iter() {
                    if !d.contains_key(key) {
                        self.remove(pointer.append(key.as_str()), value, None);
                    }
                }
                for (key, value) in d.iter() {
                    if !s.contains_key(key) {
                        self.add(pointer.append(key.as_str()), value);
                    }
                }
                for (key, sv) in s.iter() {
                    if let Some(dv) = d.get(key) {
                        self.emit(&pointer.append(key.as_str()), sv, dv);
                    }
                }
            }
            (Value::Array(s), Value::Array(d)) => {
                // Highest index first so each removal leaves the lower ones in place.
                for index in (d.len()..s.len()).rev() {
                    let origin = ArrayOrigin {
                        array: pointer.clone(),
                        index,
                    };
                    self.remove(pointer.append_index(index), &s[index], Some(origin));
                }
                for (index, (sv, dv)) in s.iter().zip(d.iter()).enumerate() {
                    self.emit(&pointer.append_index(index), sv, dv);
                }
                for value in d.iter().skip(s.len()) {
                    self.add(pointer.append(APPEND_MARKER), value);
                }
            }
            _ => {}
        }
    }

    fn push(&mut self, op: Op, origin: Option<ArrayOrigin>) -> usize {
        self.slots.push(Some(Emitted { op, origin }));
        self.slots.len() - 1
    }

    fn remove(&mut self, path: Pointer, value: &'a Value, origin: Option<ArrayOrigin>) {
        let slot = self.push(Op::Remove { path }, origin);
        self.removed.entry(hash(value)).or_default().push((slot, value));
    }

    /// Insert `value` at `path` as a `move`, `copy` or `add`.
    fn add(&mut self, path: Pointer, value: &'a Value) {
        let h = hash(value);
        if let Some(Emitted { op, origin }) = self.take_removed(h, value) {
            let from = op.path().clone();
            self.push(Op::Move { from, path }, origin);
            return;
        }
        let copy_source = self
            .unchanged
            .get(&h)
            .and_then(|bucket| bucket.iter().find(|(_, v)| *v == value))
            .map(|(pointer, _)| pointer.clone());
        let op = match copy_source {
            Some(from) => Op::Copy { from, path },
            None => Op::Add {
                path,
                value: value.clone(),
            },
        };
        self.push(op, None);
    }

    /// Cancel the earliest live removal of a value equal to `value`.
    fn take_removed(&mut self, h: u64, value: &Value) -> Option<Emitted> {
        let bucket = self.removed.get_mut(&h)?;
        let position = bucket.iter().position(|(_, v)| *v == value)?;
        let (slot, _) = bucket.remove(position);
        self.slots[slot].take()
    }

    /// Drop cancelled slots and shift array indices past the elements that
    /// were taken out of the same array earlier in the final order.
    fn finish(self) -> Vec<Op> {
        let mut taken: HashMap<Pointer, Vec<usize>> = HashMap::new();
        let mut ops = Vec::with_capacity(self.slots.len());
        for Emitted { mut op, origin } in self.slots.into_iter().flatten() {
            if let Some(ArrayOrigin { array, index }) = origin {
                let done = taken.entry(array.clone()).or_default();
                let shift = done.iter().filter(|&&i| i < index).count();
                if shift > 0 {
                    let adjusted = array.append_index(index - shift);
                    match &mut op {
                        Op::Remove { path } => *path = adjusted,
                        Op::Move { from, .. } => *from = adjusted,
                        _ => {}
                    }
                }
                done.push(index);
            }
            tracing::trace!(op = op.op_name(), path = %op.path(), "diff op");
            ops.push(op);
        }
        ops
    }
}
