//! URI fragment identifier form of a pointer (RFC 6901 section 6).

use crate::PointerError;

/// Characters left literal in a fragment, besides ASCII alphanumerics.
const FRAGMENT_SAFE: &[u8] = b"!$&'()*+,-./:;=?@_~";

fn is_fragment_safe(b: u8) -> bool {
    b.is_ascii_alphanumeric() || FRAGMENT_SAFE.contains(&b)
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Percent-encode every byte outside the fragment-safe set.
///
/// # Example
///
/// ```
/// use json_delta_pointer::percent_encode_fragment;
///
/// assert_eq!(percent_encode_fragment("/c%d"), "/c%25d");
/// assert_eq!(percent_encode_fragment("/ "), "/%20");
/// ```
pub fn percent_encode_fragment(text: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(text.len());
    for &b in text.as_bytes() {
        if is_fragment_safe(b) {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX[(b >> 4) as usize] as char);
            out.push(HEX[(b & 0x0f) as usize] as char);
        }
    }
    out
}

/// Decode `%XX` escapes.
///
/// # Errors
///
/// Returns [`PointerError::InvalidPointerSyntax`] when a `%` is not followed
/// by two hex digits or the decoded bytes are not UTF-8.
pub fn percent_decode(text: &str) -> Result<String, PointerError> {
    let bytes = text.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).copied().and_then(hex_value);
            let lo = bytes.get(i + 2).copied().and_then(hex_value);
            match (hi, lo) {
                (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
                _ => return Err(PointerError::InvalidPointerSyntax),
            }
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| PointerError::InvalidPointerSyntax)
}
