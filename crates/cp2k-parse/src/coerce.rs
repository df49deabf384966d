//! Best-effort numeric coercion of keyword values.
//!
//! A value containing a `.` is tried as a float, anything else as an
//! integer. When the conversion fails the text is kept as a string; that is
//! the expected outcome for most CP2K values (`GPW`, `.TRUE.`, `1e-06`,
//! `16.1 0.07 -0.69`) and never an error.

use std::borrow::Cow;
use std::fmt;

/// A coerced keyword value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Integer value.
    Integer(i64),
    /// Floating-point value.
    Float(f64),
    /// Anything that did not convert.
    String(String),
}

impl Scalar {
    /// Get as integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as float. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Float(f) => Some(*f),
            Scalar::Integer(i) => Some(*i as f64),
            Scalar::String(_) => None,
        }
    }

    /// Get as string (only for values that stayed strings).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x:?}"),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Integer(i)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

/// Try to read `item` as a float.
///
/// Accepts decimal and exponent forms (`1.5`, `-0.2`, `1.0e-6`, `.5`) and
/// single underscores between digits (`1_000.5`).
pub fn to_float(item: &str) -> Option<f64> {
    strip_digit_separators(item.trim())?.parse().ok()
}

/// Try to read `item` as an integer. Anything with a decimal point fails.
/// Single underscores between digits are accepted (`1_000`).
pub fn to_int(item: &str) -> Option<i64> {
    strip_digit_separators(item.trim())?.parse().ok()
}

/// Remove `_` digit separators. `None` if an underscore is not flanked by
/// digits on both sides.
fn strip_digit_separators(item: &str) -> Option<Cow<'_, str>> {
    if !item.contains('_') {
        return Some(Cow::Borrowed(item));
    }
    let mut out = String::with_capacity(item.len());
    for (i, c) in item.char_indices() {
        if c != '_' {
            out.push(c);
            continue;
        }
        let before = item[..i].chars().next_back();
        let after = item[i + 1..].chars().next();
        if !(before.is_some_and(|c| c.is_ascii_digit()) && after.is_some_and(|c| c.is_ascii_digit())) {
            return None;
        }
    }
    Some(Cow::Owned(out))
}

/// Coerce a raw value string.
///
/// ```
/// use cp2k_parse::{Scalar, coerce_value};
///
/// assert_eq!(coerce_value("2"), Scalar::Integer(2));
/// assert_eq!(coerce_value("2.0"), Scalar::Float(2.0));
/// assert_eq!(coerce_value("one"), Scalar::String("one".into()));
/// ```
pub fn coerce_value(value: &str) -> Scalar {
    let coerced = if value.contains('.') {
        to_float(value).map(Scalar::Float)
    } else {
        to_int(value).map(Scalar::Integer)
    };
    coerced.unwrap_or_else(|| Scalar::String(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_to_float() {
        assert_eq!(to_float("1.5"), Some(1.5));
        assert_eq!(to_float("2"), Some(2.0));
        assert_eq!(to_float("1.0e-6"), Some(1.0e-6));
        assert_eq!(to_float("test"), None);
    }

    #[test]
    fn test_to_int() {
        assert_eq!(to_int("1.5"), None);
        assert_eq!(to_int("2"), Some(2));
        assert_eq!(to_int("-17"), Some(-17));
        assert_eq!(to_int("2.0"), None);
        assert_eq!(to_int("test"), None);
    }

    #[test]
    fn test_coerce_integers() {
        assert_eq!(coerce_value("400"), Scalar::Integer(400));
        assert_eq!(coerce_value("-3"), Scalar::Integer(-3));
    }

    #[test]
    fn test_coerce_floats() {
        assert_eq!(coerce_value("2.0"), Scalar::Float(2.0));
        assert_eq!(coerce_value("37.29669"), Scalar::Float(37.29669));
        assert_eq!(coerce_value("1.0E-5"), Scalar::Float(1.0e-5));
    }

    #[test]
    fn test_exponent_without_dot_stays_string() {
        assert_eq!(coerce_value("1e-06"), Scalar::from("1e-06"));
    }

    #[test]
    fn test_non_numeric_stays_string() {
        assert_eq!(coerce_value(".TRUE."), Scalar::from(".TRUE."));
        assert_eq!(coerce_value("GPW"), Scalar::from("GPW"));
        assert_eq!(coerce_value(""), Scalar::from(""));
        assert_eq!(
            coerce_value("16.11886919 0.07814137 -0.697284243"),
            Scalar::from("16.11886919 0.07814137 -0.697284243")
        );
        assert_eq!(coerce_value("inf"), Scalar::from("inf"));
    }

    #[test]
    fn test_digit_separators() {
        assert_eq!(coerce_value("1_000"), Scalar::Integer(1000));
        assert_eq!(coerce_value("-2_500_000"), Scalar::Integer(-2_500_000));
        assert_eq!(coerce_value("1_000.25"), Scalar::Float(1000.25));
        assert_eq!(coerce_value("1.0e1_0"), Scalar::Float(1.0e10));
    }

    #[test]
    fn test_misplaced_separators_stay_string() {
        for raw in ["_1", "1_", "1__0", "1_.5", "1._5", "_", "MOL_SET"] {
            assert_eq!(coerce_value(raw), Scalar::from(raw), "{raw}");
        }
    }

    #[test]
    fn test_integer_overflow_stays_string() {
        let big = "123456789012345678901234567890";
        assert_eq!(coerce_value(big), Scalar::from(big));
    }

    #[test]
    fn test_display() {
        assert_eq!(Scalar::Integer(4).to_string(), "4");
        assert_eq!(Scalar::Float(300.0).to_string(), "300.0");
        assert_eq!(Scalar::from("PBE").to_string(), "PBE");
    }

    proptest! {
        #[test]
        fn failed_coercion_preserves_text(s in "\\PC{0,16}") {
            if let Scalar::String(text) = coerce_value(&s) {
                prop_assert_eq!(text, s);
            }
        }

        #[test]
        fn dotted_values_never_become_integers(s in "[0-9]{1,6}\\.[0-9]{0,6}") {
            prop_assert!(matches!(coerce_value(&s), Scalar::Float(_)));
        }

        #[test]
        fn integers_survive(i in any::<i64>()) {
            prop_assert_eq!(coerce_value(&i.to_string()), Scalar::Integer(i));
        }
    }
}
