//! Numeric payload with a boolean subtype.
//!
//! JSON `true`/`false` are numbers whose boolean flag is set. Booleans only
//! ever equal booleans; among the numeric kinds, equality is by value, so
//! `42` equals `42.0` but `0` never equals `false`.

use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Clone, Copy, Debug)]
enum N {
    Bool(bool),
    /// Every integer that fits in `i64`.
    Int(i64),
    /// Only integers above `i64::MAX`.
    UInt(u64),
    /// Always finite.
    Float(f64),
}

/// A JSON number or boolean.
#[derive(Clone, Copy, Debug)]
pub struct Number {
    n: N,
}

/// Comparison key shared by equality and hashing.
#[derive(PartialEq, Eq, Hash)]
pub(crate) enum Canonical {
    Bool(bool),
    Int(i128),
    Float(u64),
}

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

impl Number {
    pub fn from_bool(b: bool) -> Self {
        Self { n: N::Bool(b) }
    }

    pub fn from_i64(i: i64) -> Self {
        Self { n: N::Int(i) }
    }

    pub fn from_u64(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => Self::from_i64(i),
            Err(_) => Self { n: N::UInt(u) },
        }
    }

    /// Returns `None` for NaN and infinities, which JSON cannot represent.
    pub fn from_f64(f: f64) -> Option<Self> {
        f.is_finite().then_some(Self { n: N::Float(f) })
    }

    /// Whether this is a JSON boolean rather than a numeric literal.
    pub fn is_boolean(&self) -> bool {
        matches!(self.n, N::Bool(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.n {
            N::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.n {
            N::Int(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self.n {
            N::Int(i) => u64::try_from(i).ok(),
            N::UInt(u) => Some(u),
            _ => None,
        }
    }

    /// The numeric value as a float; `None` for booleans.
    pub fn as_f64(&self) -> Option<f64> {
        match self.n {
            N::Bool(_) => None,
            N::Int(i) => Some(i as f64),
            N::UInt(u) => Some(u as f64),
            N::Float(f) => Some(f),
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self.n, N::Float(_))
    }

    pub(crate) fn canonical(&self) -> Canonical {
        match self.n {
            N::Bool(b) => Canonical::Bool(b),
            N::Int(i) => Canonical::Int(i128::from(i)),
            N::UInt(u) => Canonical::Int(i128::from(u)),
            N::Float(f) => {
                if f.fract() == 0.0 && (-TWO_POW_63..TWO_POW_64).contains(&f) {
                    // Exact: every integral float in this range converts losslessly.
                    Canonical::Int(f as i128)
                } else {
                    Canonical::Float(f.to_bits())
                }
            }
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.n {
            N::Bool(b) => write!(f, "{b}"),
            N::Int(i) => write!(f, "{i}"),
            N::UInt(u) => write!(f, "{u}"),
            N::Float(x) => write!(f, "{x:?}"),
        }
    }
}

impl From<bool> for Number {
    fn from(b: bool) -> Self {
        Self::from_bool(b)
    }
}

impl From<i64> for Number {
    fn from(i: i64) -> Self {
        Self::from_i64(i)
    }
}

impl From<i32> for Number {
    fn from(i: i32) -> Self {
        Self::from_i64(i64::from(i))
    }
}

impl From<u64> for Number {
    fn from(u: u64) -> Self {
        Self::from_u64(u)
    }
}

impl From<u32> for Number {
    fn from(u: u32) -> Self {
        Self::from_i64(i64::from(u))
    }
}

impl From<usize> for Number {
    fn from(u: usize) -> Self {
        Self::from_u64(u as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float(f: f64) -> Number {
        Number::from_f64(f).unwrap()
    }

    #[test]
    fn booleans_never_equal_numbers() {
        assert_ne!(Number::from_bool(false), Number::from_i64(0));
        assert_ne!(Number::from_bool(false), float(0.0));
        assert_ne!(Number::from_bool(true), Number::from_i64(1));
        assert_eq!(Number::from_bool(true), Number::from_bool(true));
        assert_ne!(Number::from_bool(true), Number::from_bool(false));
    }

    #[test]
    fn integers_equal_integral_floats() {
        assert_eq!(Number::from_i64(42), float(42.0));
        assert_ne!(Number::from_i64(42), float(42.5));
        assert_eq!(float(-0.0), Number::from_i64(0));
        assert_eq!(Number::from_u64(u64::MAX), Number::from_u64(u64::MAX));
        assert_ne!(Number::from_u64(u64::MAX), Number::from_i64(-1));
        assert_eq!(Number::from_u64(7), Number::from_i64(7));
    }

    #[test]
    fn large_floats_compare_by_value() {
        assert_eq!(float(1e20), float(1e20));
        assert_eq!(Number::from_u64(1 << 63), float(TWO_POW_63));
        assert_ne!(float(0.1), float(0.2));
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Number::from_f64(f64::NAN).is_none());
        assert!(Number::from_f64(f64::INFINITY).is_none());
        assert!(Number::from_f64(f64::NEG_INFINITY).is_none());
    }

    #[test]
    fn accessors() {
        assert_eq!(Number::from_bool(true).as_f64(), None);
        assert_eq!(Number::from_i64(-3).as_u64(), None);
        assert_eq!(Number::from_u64(3).as_i64(), Some(3));
        assert_eq!(float(1.5).as_f64(), Some(1.5));
        assert!(Number::from_bool(false).is_boolean());
        assert_eq!(Number::from_i64(5).to_string(), "5");
        assert_eq!(float(5.0).to_string(), "5.0");
    }
}
