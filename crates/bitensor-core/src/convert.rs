//! Coercions between booleans and the shared float and string views.

/// Float view of a boolean: `1.0` or `0.0`.
#[inline]
pub fn bool_to_f64(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

/// Boolean coercion of a float.
///
/// Exact comparison against zero: only `0.0` and `-0.0` are `false`.
/// Negative values and NaN are `true`.
#[inline]
#[allow(clippy::float_cmp)]
pub fn f64_to_bool(v: f64) -> bool {
    v != 0.0
}

/// String view of a boolean.
#[inline]
pub fn bool_to_string(b: bool) -> String {
    if b { "true" } else { "false" }.to_string()
}

/// Parse a boolean literal.
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`; anything
/// else (including surrounding whitespace) yields `None`.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_float_coercion() {
        assert!(f64_to_bool(1.0));
        assert!(f64_to_bool(5.5));
        assert!(f64_to_bool(-0.25));
        assert!(f64_to_bool(f64::NAN));
        assert!(f64_to_bool(f64::MIN_POSITIVE));
        assert!(!f64_to_bool(0.0));
        assert!(!f64_to_bool(-0.0));
        assert_eq!(bool_to_f64(true), 1.0);
        assert_eq!(bool_to_f64(false), 0.0);
    }

    #[test]
    fn test_parse_bool() {
        for s in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(s), Some(true), "{s}");
        }
        for s in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(s), Some(false), "{s}");
        }
        for s in ["", "yes", "tRuE", " true", "2", "not-a-boolean"] {
            assert_eq!(parse_bool(s), None, "{s}");
        }
    }

    #[test]
    fn test_bool_to_string() {
        assert_eq!(bool_to_string(true), "true");
        assert_eq!(bool_to_string(false), "false");
        assert_eq!(parse_bool(&bool_to_string(true)), Some(true));
    }
}
