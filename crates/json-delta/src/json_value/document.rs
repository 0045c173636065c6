//! Path resolution and the mutating operations on a document.

use std::mem;
use std::sync::Arc;

use json_delta_pointer::{parse_index, Pointer, APPEND_MARKER};

use super::Value;
use crate::error::{JsonError, Result};

/// Index of an existing element addressed by `token`; `-` means the last one.
fn element_index(len: usize, token: &str) -> Option<usize> {
    if token == APPEND_MARKER {
        len.checked_sub(1)
    } else {
        parse_index(token).filter(|&i| i < len)
    }
}

impl Value {
    fn child(&self, token: &str) -> Result<&Value> {
        match self {
            Value::Object(map) => map.get(token),
            Value::Array(arr) => element_index(arr.len(), token).map(|i| &arr[i]),
            _ => None,
        }
        .ok_or(JsonError::ReferencesNonexistentValue)
    }

    /// Promotes `self` and returns the addressed child.
    fn child_mut(&mut self, token: &str) -> Result<&mut Value> {
        match self {
            Value::Object(map) => Arc::make_mut(map).get_mut(token),
            Value::Array(arr) => {
                let arr = Arc::make_mut(arr);
                match element_index(arr.len(), token) {
                    Some(index) => arr.get_mut(index),
                    None => None,
                }
            }
            _ => None,
        }
        .ok_or(JsonError::ReferencesNonexistentValue)
    }

    fn insert_child(&mut self, token: &str, value: Value) -> Result<Option<Value>> {
        match self {
            Value::Object(map) => Ok(Arc::make_mut(map).insert(token.to_string(), value)),
            Value::Array(arr) => {
                let arr = Arc::make_mut(arr);
                if token == APPEND_MARKER {
                    arr.push(value);
                } else {
                    let index = parse_index(token)
                        .filter(|&i| i <= arr.len())
                        .ok_or(JsonError::ReferencesNonexistentValue)?;
                    arr.insert(index, value);
                }
                Ok(None)
            }
            _ => Err(JsonError::ReferencesNonexistentValue),
        }
    }

    fn remove_child(&mut self, token: &str) -> Result<Value> {
        match self {
            Value::Object(map) => Arc::make_mut(map).shift_remove(token),
            Value::Array(arr) => {
                let arr = Arc::make_mut(arr);
                element_index(arr.len(), token).map(|i| arr.remove(i))
            }
            _ => None,
        }
        .ok_or(JsonError::ReferencesNonexistentValue)
    }

    /// Resolve `pointer` against this document.
    ///
    /// # Errors
    ///
    /// [`JsonError::ReferencesNonexistentValue`] for a missing key, an
    /// out-of-bounds or non-canonical index, `-` on an empty array, or any
    /// token applied to a scalar.
    pub fn resolve(&self, pointer: &Pointer) -> Result<&Value> {
        pointer
            .iter()
            .try_fold(self, |node, token| node.child(token))
    }

    /// Walk `pointer`, promoting every container on the way (including the
    /// target) to an owned node, and return the target container.
    ///
    /// # Errors
    ///
    /// [`JsonError::ReferencesNonexistentValue`] if the path does not resolve
    /// or ends at a scalar.
    pub fn promote_mutable_path(&mut self, pointer: &Pointer) -> Result<&mut Value> {
        let node = self.resolve_mut(pointer)?;
        if !node.is_container() {
            return Err(JsonError::ReferencesNonexistentValue);
        }
        node.promote();
        Ok(node)
    }

    /// Mutable counterpart of [`Value::resolve`]; containers on the path are
    /// promoted, the target itself is left as it is.
    pub fn resolve_mut(&mut self, pointer: &Pointer) -> Result<&mut Value> {
        let mut node = self;
        for token in pointer {
            node = node.child_mut(token)?;
        }
        Ok(node)
    }

    /// Add `value` at `pointer`, returning a value it overwrote.
    ///
    /// At the root the whole document is swapped. In an object the key is
    /// set; in an array `-` appends and an index in `0..=len` inserts.
    pub fn add(&mut self, value: Value, pointer: &Pointer) -> Result<Option<Value>> {
        let Some((parent, token)) = pointer.split_last() else {
            return Ok(Some(mem::replace(self, value)));
        };
        self.promote_mutable_path(&parent)?.insert_child(token, value)
    }

    /// Remove and return the value at `pointer`. Removing the root leaves
    /// `null` behind.
    pub fn remove(&mut self, pointer: &Pointer) -> Result<Value> {
        let Some((parent, token)) = pointer.split_last() else {
            return Ok(mem::take(self));
        };
        self.promote_mutable_path(&parent)?.remove_child(token)
    }

    /// Overwrite the existing value at `pointer`, returning the old one.
    pub fn replace(&mut self, value: Value, pointer: &Pointer) -> Result<Value> {
        let slot = self.resolve_mut(pointer)?;
        Ok(mem::replace(slot, value))
    }

    /// Move the value at `from` to `to`.
    ///
    /// The source is removed before the destination index is interpreted, so
    /// moves within one array see the shifted indices.
    ///
    /// # Errors
    ///
    /// [`JsonError::ReferencesNonexistentValue`] when `from` is the root
    /// (unless `to` is too), when `to` lies inside `from`, or when either
    /// side does not resolve. A failed move leaves the document unchanged.
    pub fn move_value(&mut self, from: &Pointer, to: &Pointer) -> Result<Option<Value>> {
        let Some(to_parent) = to.parent() else {
            let value = self.resolve(from)?.clone();
            return Ok(Some(mem::replace(self, value)));
        };
        if from.is_root() || from.is_ancestor_of(to) {
            return Err(JsonError::ReferencesNonexistentValue);
        }
        if !self.resolve(&to_parent)?.is_container() {
            return Err(JsonError::ReferencesNonexistentValue);
        }
        // The destination index can still fall out of range after the removal.
        let mut working = self.clone();
        let value = working.remove(from)?;
        let displaced = working.add(value, to)?;
        *self = working;
        Ok(displaced)
    }

    /// Insert a deep copy of the value at `from` at `to`.
    pub fn copy_value(&mut self, from: &Pointer, to: &Pointer) -> Result<Option<Value>> {
        if to.is_root() {
            let value = self.resolve(from)?.deep_copy();
            return Ok(Some(mem::replace(self, value)));
        }
        if from.is_root() {
            return Err(JsonError::ReferencesNonexistentValue);
        }
        let value = self.resolve(from)?.deep_copy();
        self.add(value, to)
    }

    /// Check that the value at `pointer` structurally equals `value`.
    ///
    /// # Errors
    ///
    /// [`JsonError::PatchTestFailed`] carrying the pointer text, the expected
    /// value and the value found (`None` if the pointer did not resolve).
    pub fn test(&self, value: &Value, pointer: &Pointer) -> Result<()> {
        let found = match self.resolve(pointer) {
            Ok(found) if found == value => return Ok(()),
            Ok(found) => Some(found.clone()),
            Err(_) => None,
        };
        Err(JsonError::PatchTestFailed {
            path: pointer.to_string(),
            expected: value.clone(),
            found,
        })
    }
}
