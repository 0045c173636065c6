//! Structural hashing consistent with [`Value`](crate::json_value::Value)
//! equality.

pub mod hash;

pub use hash::{hash, update_num, update_object, update_str, update_value};
