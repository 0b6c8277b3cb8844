//! Comparison and logical operators.
//!
//! Both sets are closed: parsing any other text fails with a validation
//! error instead of falling back to a default.
//!
//! ```rust
//! use querymaker_query::{ComparisonOperator, LogicalOperator};
//!
//! let op: ComparisonOperator = "NOT IN".parse().unwrap();
//! assert_eq!(op, ComparisonOperator::NotIn);
//! assert!(op.is_list());
//!
//! assert!("NAND".parse::<LogicalOperator>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Operator comparing a column with its value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ComparisonOperator {
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
    /// `=`
    #[default]
    Eq,
    /// `!=`
    NotEq,
    /// `<>`
    LtGt,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `<=>` (null-safe equality)
    NullSafeEq,
    /// `IS NOT`
    IsNot,
    /// `IS`
    Is,
    /// `IS NOT NULL`
    IsNotNull,
    /// `IS NULL`
    IsNull,
    /// `IN`
    In,
    /// `NOT IN`
    NotIn,
}

impl ComparisonOperator {
    /// Every comparison operator, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::Like,
        Self::NotLike,
        Self::Eq,
        Self::NotEq,
        Self::LtGt,
        Self::Lt,
        Self::Lte,
        Self::Gt,
        Self::Gte,
        Self::NullSafeEq,
        Self::IsNot,
        Self::Is,
        Self::IsNotNull,
        Self::IsNull,
        Self::In,
        Self::NotIn,
    ];

    /// SQL text of the operator.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::LtGt => "<>",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::NullSafeEq => "<=>",
            Self::IsNot => "IS NOT",
            Self::Is => "IS",
            Self::IsNotNull => "IS NOT NULL",
            Self::IsNull => "IS NULL",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
        }
    }

    /// Whether the operator compares against a bound value.
    ///
    /// `IS NULL` and `IS NOT NULL` stand alone.
    pub fn takes_value(&self) -> bool {
        !matches!(self, Self::IsNull | Self::IsNotNull)
    }

    /// Whether the operator renders a parenthesized placeholder list.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for ComparisonOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_sql() == s)
            .ok_or_else(|| QueryError::invalid_comparison_operator(s))
    }
}

impl TryFrom<String> for ComparisonOperator {
    type Error = QueryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ComparisonOperator> for String {
    fn from(op: ComparisonOperator) -> Self {
        op.as_sql().to_string()
    }
}

/// Operator joining a condition to the one before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogicalOperator {
    /// `AND`
    #[default]
    And,
    /// `OR`
    Or,
    /// `XOR`
    Xor,
    /// `NOT`
    Not,
}

impl LogicalOperator {
    /// Every logical operator, in declaration order.
    pub const ALL: [Self; 4] = [Self::And, Self::Or, Self::Xor, Self::Not];

    /// SQL text of the operator.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Not => "NOT",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for LogicalOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_sql() == s)
            .ok_or_else(|| QueryError::invalid_logical_operator(s))
    }
}

impl TryFrom<String> for LogicalOperator {
    type Error = QueryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LogicalOperator> for String {
    fn from(op: LogicalOperator) -> Self {
        op.as_sql().to_string()
    }
}
