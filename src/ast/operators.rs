use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Characters that may appear while a boolean operator is being read.
pub const VALID_BOOL_OPERATORS_CHARS: [char; 5] = ['a', 'n', 'd', 'o', 'r'];

/// Longest boolean operator keyword, in characters.
pub const MAX_BOOL_OPERATOR_LEN: usize = 3;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    /// Equal (`=`)
    #[serde(rename = "=")]
    Equals,
    /// Not equal (`!=`)
    #[serde(rename = "!=")]
    NotEquals,
    /// Regex match (`=~`)
    #[serde(rename = "=~")]
    EqualsRegex,
    /// Regex mismatch (`!~`)
    #[serde(rename = "!~")]
    NotEqualsRegex,
    /// Greater than (`>`)
    #[serde(rename = ">")]
    GreaterThan,
    /// Less than (`<`)
    #[serde(rename = "<")]
    LowerThan,
    /// Greater than or equal (`>=`)
    #[serde(rename = ">=")]
    GreaterOrEqualsThan,
    /// Less than or equal (`<=`)
    #[serde(rename = "<=")]
    LowerOrEqualsThan,
}

impl Operator {
    pub const ALL: [Operator; 8] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::EqualsRegex,
        Operator::NotEqualsRegex,
        Operator::GreaterThan,
        Operator::LowerThan,
        Operator::GreaterOrEqualsThan,
        Operator::LowerOrEqualsThan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::EqualsRegex => "=~",
            Operator::NotEqualsRegex => "!~",
            Operator::GreaterThan => ">",
            Operator::LowerThan => "<",
            Operator::GreaterOrEqualsThan => ">=",
            Operator::LowerOrEqualsThan => "<=",
        }
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean operators joining two expressions.
///
/// There is no precedence between them: `a=1 or b=2 and c=3` groups as
/// `(a=1 or b=2) and c=3`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoolOperator {
    /// Logical AND (`and`)
    #[default]
    And,
    /// Logical OR (`or`)
    Or,
}

impl BoolOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoolOperator::And => "and",
            BoolOperator::Or => "or",
        }
    }
}

impl FromStr for BoolOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "and" => Ok(BoolOperator::And),
            "or" => Ok(BoolOperator::Or),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for BoolOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
