//! JSON Patch (RFC 6902).
//!
//! # Operations
//!
//! `add`, `remove`, `replace`, `move`, `copy`, `test`, applied strictly in
//! order, each to the result of the previous one.
//!
//! # Example
//!
//! ```
//! use json_delta::json_patch::{ApplyPatchOptions, Patch};
//! use json_delta::Value;
//!
//! let patch = Patch::from_slice(br#"[{"op": "add", "path": "/foo/-", "value": "qux"}]"#).unwrap();
//! let mut doc: Value = r#"{"foo": ["bar", "baz"]}"#.parse().unwrap();
//! patch.apply_to(&mut doc, &ApplyPatchOptions::default()).unwrap();
//! assert_eq!(doc.to_string(), r#"{"foo":["bar","baz","qux"]}"#);
//! ```

pub mod apply;
pub mod codec;
pub mod types;

pub use apply::{apply_op, apply_ops, apply_patch};
pub use codec::json::{from_json, from_json_patch, to_json, to_json_patch};
pub use types::{ApplyPatchOptions, DecodeOptions, Op, Patch, UnknownOpPolicy};
