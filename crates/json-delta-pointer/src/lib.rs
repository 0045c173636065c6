//! JSON Pointer (RFC 6901).
//!
//! A [`Pointer`] is an ordered sequence of unescaped reference tokens. The
//! empty sequence addresses the whole document.
//!
//! # Example
//!
//! ```
//! use json_delta_pointer::Pointer;
//!
//! let pointer = Pointer::parse("/foo/a~1b").unwrap();
//! assert_eq!(pointer.tokens(), ["foo", "a/b"]);
//! assert_eq!(pointer.to_string(), "/foo/a~1b");
//!
//! let parent = pointer.parent().unwrap();
//! assert_eq!(parent.to_string(), "/foo");
//! assert_eq!(parent.append_index(3).to_string(), "/foo/3");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use thiserror::Error;

pub mod fragment;
pub mod util;

pub use fragment::{percent_decode, percent_encode_fragment};
pub use util::{
    escape_component, is_array_index_token, is_valid_index, parse_index, unescape_component,
    APPEND_MARKER,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("INVALID_POINTER_SYNTAX")]
    InvalidPointerSyntax,
}

/// A parsed JSON Pointer.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pointer {
    tokens: Vec<String>,
}

impl Pointer {
    /// The pointer addressing the whole document.
    pub const fn root() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Build a pointer from already-unescaped tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse the string form of a pointer.
    ///
    /// The empty string is the root. Otherwise the text must start with `/`,
    /// or with `#` for the percent-encoded URI fragment form.
    ///
    /// # Errors
    ///
    /// Returns [`PointerError::InvalidPointerSyntax`] for text that is
    /// neither form, or a fragment with malformed percent-encoding.
    ///
    /// # Example
    ///
    /// ```
    /// use json_delta_pointer::Pointer;
    ///
    /// assert!(Pointer::parse("").unwrap().is_root());
    /// assert_eq!(Pointer::parse("/").unwrap().tokens(), [""]);
    /// assert_eq!(Pointer::parse("#/c%25d").unwrap().tokens(), ["c%d"]);
    /// assert!(Pointer::parse("foo").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, PointerError> {
        match text.strip_prefix('#') {
            Some(fragment) => Self::parse_plain(&percent_decode(fragment)?),
            None => Self::parse_plain(text),
        }
    }

    fn parse_plain(text: &str) -> Result<Self, PointerError> {
        if text.is_empty() {
            return Ok(Self::root());
        }
        let rest = text
            .strip_prefix('/')
            .ok_or(PointerError::InvalidPointerSyntax)?;
        Ok(Self {
            tokens: rest.split('/').map(unescape_component).collect(),
        })
    }

    /// The unescaped reference tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.tokens.iter()
    }

    /// Whether this pointer addresses the whole document.
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The pointer to the container of the referenced value.
    ///
    /// The root has no parent; a single-token pointer (including `/`) has the
    /// root as its parent.
    ///
    /// # Example
    ///
    /// ```
    /// use json_delta_pointer::Pointer;
    ///
    /// let parent = |s: &str| Pointer::parse(s).unwrap().parent().map(|p| p.to_string());
    /// assert_eq!(parent(""), None);
    /// assert_eq!(parent("/a"), Some(String::new()));
    /// assert_eq!(parent("/a/b"), Some("/a".to_string()));
    /// assert_eq!(parent("//"), Some("/".to_string()));
    /// ```
    pub fn parent(&self) -> Option<Pointer> {
        let (_, init) = self.tokens.split_last()?;
        Some(Self {
            tokens: init.to_vec(),
        })
    }

    /// The last reference token, `None` for the root.
    pub fn last_token(&self) -> Option<&str> {
        self.tokens.last().map(String::as_str)
    }

    /// Split into the parent pointer and the last token.
    pub fn split_last(&self) -> Option<(Pointer, &str)> {
        let (last, init) = self.tokens.split_last()?;
        Some((
            Self {
                tokens: init.to_vec(),
            },
            last.as_str(),
        ))
    }

    /// A new pointer with `token` (unescaped) appended.
    pub fn append(&self, token: impl Into<String>) -> Pointer {
        let mut tokens = Vec::with_capacity(self.tokens.len() + 1);
        tokens.extend_from_slice(&self.tokens);
        tokens.push(token.into());
        Self { tokens }
    }

    /// A new pointer with an array index appended.
    pub fn append_index(&self, index: usize) -> Pointer {
        self.append(index.to_string())
    }

    /// Check if `self` is a proper prefix of `other`.
    ///
    /// # Example
    ///
    /// ```
    /// use json_delta_pointer::Pointer;
    ///
    /// let parent = Pointer::parse("/foo").unwrap();
    /// let child = Pointer::parse("/foo/bar").unwrap();
    /// assert!(parent.is_ancestor_of(&child));
    /// assert!(!child.is_ancestor_of(&parent));
    /// assert!(!parent.is_ancestor_of(&parent));
    /// ```
    pub fn is_ancestor_of(&self, other: &Pointer) -> bool {
        self.tokens.len() < other.tokens.len() && other.tokens.starts_with(&self.tokens)
    }

    /// The `#`-prefixed, percent-encoded URI fragment form.
    ///
    /// # Example
    ///
    /// ```
    /// use json_delta_pointer::Pointer;
    ///
    /// let pointer = Pointer::from_tokens(["c%d", "a b"]);
    /// assert_eq!(pointer.to_fragment(), "#/c%25d/a%20b");
    /// assert_eq!(Pointer::parse(&pointer.to_fragment()).unwrap(), pointer);
    /// ```
    pub fn to_fragment(&self) -> String {
        let mut out = String::from("#");
        out.push_str(&percent_encode_fragment(&self.to_string()));
        out
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str("/")?;
            f.write_str(&escape_component(token))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pointer(\"{self}\")")
    }
}

impl FromStr for Pointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a Pointer {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl Serialize for Pointer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pointer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Pointer::parse(&text).map_err(de::Error::custom)
    }
}
