use crate::ast::{Key, Operator, parse_key};
use crate::error::FlyqlError;
use crate::value::Value;
use serde::Serialize;
use std::fmt;

/// A single comparison, e.g. `status=200`.
///
/// Expressions are immutable once built: the operator has been checked
/// against the comparison operator set and the value has been coerced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expression {
    pub key: Key,
    pub operator: Operator,
    pub value: Value,
}

impl Expression {
    /// Build an expression from the raw text captured by the parser.
    ///
    /// The key text goes through the key segmenter; `quoted` forces the
    /// value to stay a string.
    ///
    /// # Errors
    ///
    /// Fails when the operator is unknown, the key is empty or the key text
    /// cannot be segmented.
    ///
    /// # Example
    ///
    /// ```
    /// use flyql::{Expression, Operator, Value};
    ///
    /// let expr = Expression::from_raw("count", ">=", "10", false).unwrap();
    /// assert_eq!(expr.operator, Operator::GreaterOrEqualsThan);
    /// assert_eq!(expr.value, Value::Integer(10));
    /// assert_eq!(expr.to_string(), "count>=10");
    /// ```
    pub fn from_raw(
        key: &str,
        operator: &str,
        value: &str,
        quoted: bool,
    ) -> Result<Self, FlyqlError> {
        let operator: Operator = operator.parse().map_err(FlyqlError::InvalidOperator)?;
        let key = parse_key(key)?;
        Expression::new(key, operator, Value::coerce(value, quoted))
    }

    /// Build an expression from an already segmented key.
    pub fn new(key: Key, operator: Operator, value: Value) -> Result<Self, FlyqlError> {
        if key.is_empty() {
            return Err(FlyqlError::EmptyKey);
        }
        Ok(Expression {
            key,
            operator,
            value,
        })
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.key.raw, self.operator, self.value)
    }
}
