//! Reference token helpers.

/// Unescapes a JSON Pointer reference token.
///
/// `~1` is replaced with `/` before `~0` is replaced with `~`, so `~01`
/// decodes to `~1` rather than `/`.
///
/// # Example
///
/// ```
/// use json_delta_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("~01"), "~1");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~1 must be replaced before ~0
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer reference token.
///
/// # Example
///
/// ```
/// use json_delta_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// assert_eq!(escape_component("~1"), "~01");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~ must be escaped before /
    component.replace('~', "~0").replace('/', "~1")
}

/// Check if a token is a canonical non-negative array index.
///
/// Leading zeros are rejected except for the literal `"0"`.
///
/// # Example
///
/// ```
/// use json_delta_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("-"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

/// Check if a token may address an array element: a canonical index or the
/// append marker `-`.
pub fn is_array_index_token(token: &str) -> bool {
    token == APPEND_MARKER || is_valid_index(token)
}

/// Parse a canonical array index token.
///
/// Returns `None` for non-canonical tokens and for the append marker.
pub fn parse_index(token: &str) -> Option<usize> {
    if !is_valid_index(token) {
        return None;
    }
    token.parse().ok()
}

/// The token denoting the position after the last array element.
pub const APPEND_MARKER: &str = "-";
