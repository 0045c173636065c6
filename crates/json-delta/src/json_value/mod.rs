//! Tree-shaped JSON document model.
//!
//! Containers are reference counted. A container whose node is referenced
//! from more than one tree is *shared* and is copied (shallowly) before it is
//! mutated; a uniquely referenced container is *owned* and mutated in place.
//! Mutation through a pointer only promotes the containers on that pointer's
//! path, so untouched siblings stay shared with every other tree that holds
//! them.
//!
//! # Example
//!
//! ```
//! use json_delta::json_value::{Ownership, Value};
//! use json_delta_pointer::Pointer;
//!
//! let original = Value::from(serde_json::json!({"a": {"x": 1}, "b": {"y": 2}}));
//! let mut doc = original.clone();
//! doc.add(Value::from(3), &Pointer::parse("/a/z").unwrap()).unwrap();
//!
//! let a = original.resolve(&Pointer::parse("/a").unwrap()).unwrap();
//! assert_eq!(a.as_object().unwrap().len(), 1);
//! assert_eq!(doc.ownership(), Some(Ownership::Owned));
//! assert_eq!(doc.get("b").unwrap().ownership(), Some(Ownership::Shared));
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

mod convert;
mod document;
mod number;

pub use convert::{from_value, to_value, JsonWriteOptions};
pub use number::Number;
pub(crate) use number::Canonical;

/// Object node payload. Iteration follows insertion order; equality does not.
pub type Object = IndexMap<String, Value>;

/// Array node payload.
pub type Array = Vec<Value>;

/// A JSON value.
#[derive(Clone)]
pub enum Value {
    Object(Arc<Object>),
    Array(Arc<Array>),
    String(String),
    /// Numbers and booleans; see [`Number::is_boolean`].
    Number(Number),
    Null,
}

/// Mutability state of a container node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Referenced from elsewhere; promoted to an owned copy before mutation.
    Shared,
    /// Exclusively referenced; mutable in place.
    Owned,
}

impl Ownership {
    fn of<T>(node: &Arc<T>) -> Self {
        if Arc::strong_count(node) == 1 && Arc::weak_count(node) == 0 {
            Ownership::Owned
        } else {
            Ownership::Shared
        }
    }
}

impl Value {
    pub fn object<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Object(Arc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Value::Array(Arc::new(items.into_iter().collect()))
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Array(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_number().and_then(Number::as_bool)
    }

    /// Look up an object member.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Name of the JSON type, distinguishing booleans from numbers.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::String(_) => "string",
            Value::Number(n) if n.is_boolean() => "boolean",
            Value::Number(_) => "number",
            Value::Null => "null",
        }
    }

    /// Mutability state of a container; `None` for scalars.
    pub fn ownership(&self) -> Option<Ownership> {
        match self {
            Value::Object(map) => Some(Ownership::of(map)),
            Value::Array(arr) => Some(Ownership::of(arr)),
            _ => None,
        }
    }

    /// Make this container owned, copying its node if it is shared.
    pub(crate) fn promote(&mut self) {
        match self {
            Value::Object(map) => {
                Arc::make_mut(map);
            }
            Value::Array(arr) => {
                Arc::make_mut(arr);
            }
            _ => {}
        }
    }

    /// Rebuild every container so the result shares no node with `self`.
    pub fn deep_copy(&self) -> Value {
        match self {
            Value::Object(map) => Value::Object(Arc::new(
                map.iter().map(|(k, v)| (k.clone(), v.deep_copy())).collect(),
            )),
            Value::Array(arr) => Value::Array(Arc::new(arr.iter().map(Value::deep_copy).collect())),
            scalar => scalar.clone(),
        }
    }

    /// Whether a diff may descend into or patch between `self` and `other`
    /// without replacing the whole node.
    ///
    /// Numbers are only compatible with numbers of the same boolean subtype.
    pub fn is_type_compatible(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(_), Value::Object(_))
            | (Value::Array(_), Value::Array(_))
            | (Value::String(_), Value::String(_))
            | (Value::Null, Value::Null) => true,
            (Value::Number(a), Value::Number(b)) => a.is_boolean() == b.is_boolean(),
            _ => false,
        }
    }
}

/// Structural equality: object key order is irrelevant, array order is not,
/// and booleans never equal numeric literals.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => {
                Arc::ptr_eq(a, b)
                    || (a.len() == b.len()
                        && a.iter().all(|(k, v)| b.get(k).is_some_and(|w| v == w)))
            }
            (Value::Array(a), Value::Array(b)) => Arc::ptr_eq(a, b) || a[..] == b[..],
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Object(map) => f.debug_map().entries(map.iter()).finish(),
            Value::Array(arr) => f.debug_list().entries(arr.iter()).finish(),
            Value::String(s) => fmt::Debug::fmt(s, f),
            Value::Number(n) => fmt::Display::fmt(n, f),
            Value::Null => f.write_str("null"),
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Number(Number::from_bool(b))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Number(Number::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::from_i64(i))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Number(Number::from_u64(u))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Value::Object(Arc::new(map))
    }
}

impl From<Array> for Value {
    fn from(arr: Array) -> Self {
        Value::Array(Arc::new(arr))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl TryFrom<f64> for Value {
    type Error = crate::JsonError;

    fn try_from(f: f64) -> Result<Self, Self::Error> {
        Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| crate::JsonError::InvalidObjectType(format!("non-finite number {f}")))
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::array(iter)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::object(iter)
    }
}
