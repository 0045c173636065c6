//! json-delta: JSON documents with copy-on-write mutation, JSON Patch
//! (RFC 6902) and a patch generator with move and copy detection.
//!
//! # Example
//!
//! ```
//! use json_delta::json_patch::{ApplyPatchOptions, Patch};
//! use json_delta::Value;
//!
//! let source: Value = r#"{"a": "b"}"#.parse().unwrap();
//! let target: Value = r#"{"c": "d", "z": "b"}"#.parse().unwrap();
//!
//! let patch = Patch::diff(&source, &target);
//! assert_eq!(
//!     patch.to_value().to_string(),
//!     r#"[{"op":"add","path":"/c","value":"d"},{"op":"move","from":"/a","path":"/z"}]"#
//! );
//!
//! let mut doc = source.clone();
//! patch.apply_to(&mut doc, &ApplyPatchOptions::default()).unwrap();
//! assert_eq!(doc, target);
//! ```

pub mod error;
pub mod json_hash;
pub mod json_patch;
pub mod json_patch_diff;
pub mod json_value;

pub use error::{JsonError, Result};
pub use json_delta_pointer::{Pointer, PointerError};
pub use json_patch::{Op, Patch};
pub use json_value::Value;
