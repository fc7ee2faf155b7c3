use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("valid numeric grammar")
});

/// A typed comparison value.
///
/// Unquoted literals that look like numbers become [`Value::Integer`] or
/// [`Value::Float`]; everything else, and every quoted literal, stays a
/// [`Value::String`].
///
/// # Examples
///
/// ```
/// use flyql::Value;
///
/// assert_eq!(Value::coerce("10", false), Value::Integer(10));
/// assert_eq!(Value::coerce("12.34", false), Value::Float(12.34));
/// assert_eq!(Value::coerce("10", true), Value::String("10".to_string()));
/// assert_eq!(Value::coerce("abc", false), Value::String("abc".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Whole number
    Integer(i64),

    /// Number with a fractional part, or too large for `i64`
    Float(f64),

    /// Anything that is not a number, including quoted literals
    String(String),
}

impl Value {
    /// Apply value coercion to a raw literal.
    ///
    /// A quoted literal is kept verbatim. An unquoted literal becomes a number
    /// only when the whole text matches the numeric grammar and the result is
    /// finite; integral numbers are stored as integers.
    pub fn coerce(raw: &str, quoted: bool) -> Value {
        if quoted || !is_numeric(raw) {
            return Value::String(raw.to_string());
        }

        if !raw.contains(['.', 'e', 'E'])
            && let Ok(n) = raw.parse::<i64>()
        {
            return Value::Integer(n);
        }

        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => {
                if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
                    Value::Integer(n as i64)
                } else {
                    Value::Float(n)
                }
            }
            _ => Value::String(raw.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

/// Whether the whole text is a single finite number.
///
/// Signs, a decimal point and an exponent are accepted; surrounding
/// whitespace, hex prefixes and `inf`/`NaN` are not.
pub fn is_numeric(text: &str) -> bool {
    NUMBER_RE.is_match(text) && text.parse::<f64>().is_ok_and(f64::is_finite)
}
