//! JSON Patch apply logic.

use json_delta_pointer::Pointer;

use super::types::{ApplyPatchOptions, Op, Patch};
use crate::error::Result;
use crate::json_value::{JsonWriteOptions, Value};

/// Apply a single operation, returning the value it displaced: the old value
/// for `replace`, `remove` and root-level `add`/`move`/`copy`, the
/// overwritten member for an object `add`.
pub fn apply_op(doc: &mut Value, op: &Op) -> Result<Option<Value>> {
    tracing::trace!(op = op.op_name(), path = %op.path(), "apply op");
    match op {
        Op::Add { path, value } => doc.add(value.clone(), path),
        Op::Remove { path } => doc.remove(path).map(Some),
        Op::Replace { path, value } => doc.replace(value.clone(), path).map(Some),
        Op::Move { from, path } => doc.move_value(from, path),
        Op::Copy { from, path } => doc.copy_value(from, path),
        Op::Test { path, value } => doc.test(value, path).map(|()| None),
    }
}

/// Apply operations in order, stopping at the first failure. Effects of the
/// operations before the failing one stay applied.
pub fn apply_ops(doc: &mut Value, ops: &[Op]) -> Result<Vec<Option<Value>>> {
    ops.iter().map(|op| apply_op(doc, op)).collect()
}

fn apply_relative(
    doc: &mut Value,
    patch: &Patch,
    relative_to: Option<&Pointer>,
) -> Result<Vec<Option<Value>>> {
    let target = match relative_to {
        Some(base) => doc.resolve_mut(base)?,
        None => doc,
    };
    apply_ops(target, patch.operations())
}

/// Apply a patch with options (mutate vs. copy, relative base).
///
/// With `mutate: false` the operations run against a copy of `doc`, which
/// replaces `doc` only if every operation succeeded. With `mutate: true`
/// they run against `doc` itself and a failure keeps the earlier effects.
pub fn apply_patch(
    doc: &mut Value,
    patch: &Patch,
    options: &ApplyPatchOptions,
) -> Result<Vec<Option<Value>>> {
    tracing::debug!(
        ops = patch.len(),
        mutate = options.mutate,
        relative_to = ?options.relative_to,
        "apply patch"
    );
    let relative_to = options.relative_to.as_ref();
    let result = if options.mutate {
        apply_relative(doc, patch, relative_to)
    } else {
        let mut working = doc.clone();
        apply_relative(&mut working, patch, relative_to).map(|displaced| {
            *doc = working;
            displaced
        })
    };
    if let Err(err) = &result {
        tracing::debug!(%err, "patch failed");
    }
    result
}

impl Patch {
    /// See [`apply_patch`].
    pub fn apply_to(
        &self,
        doc: &mut Value,
        options: &ApplyPatchOptions,
    ) -> Result<Vec<Option<Value>>> {
        apply_patch(doc, self, options)
    }

    /// Parse a document from JSON text, apply the patch and serialize the
    /// result. The document and the result may be scalar fragments.
    pub fn apply_to_slice(
        &self,
        bytes: &[u8],
        options: &ApplyPatchOptions,
        write: &JsonWriteOptions,
    ) -> Result<Vec<u8>> {
        let mut doc = Value::from_slice(bytes)?;
        self.apply_to(&mut doc, options)?;
        doc.to_vec(write)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
