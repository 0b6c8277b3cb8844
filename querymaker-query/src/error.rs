//! Error types for statement building with actionable messages.
//!
//! Every failure raised while compiling criteria, assembling a statement or
//! binding values is a [`QueryError`]. Errors carry:
//! - An [`ErrorCode`] for programmatic handling
//! - The offending field and criterion position, when known
//! - Suggestions for fixing the input
//!
//! # Error Codes
//!
//! Error codes follow a pattern: Q{category}{number}
//! - 1xxx: Validation errors (bad column, unknown operator, bad value)
//! - 2xxx: Configuration errors (missing join condition, unknown alias)
//! - 3xxx: Empty input errors (no tables registered)
//! - 4xxx: Binding errors (raised by statement implementations)
//!
//! ```rust
//! use querymaker_query::{ErrorCode, ErrorKind, QueryError};
//!
//! let err = QueryError::invalid_comparison_operator("BOGUS");
//! assert_eq!(err.code, ErrorCode::InvalidComparisonOperator);
//! assert_eq!(err.kind(), ErrorKind::Validation);
//! assert!(err.to_string().contains("BOGUS"));
//! ```
//!
//! Errors are never retried internally and partially built SQL is never
//! returned alongside one: callers discard the whole call and fix the input.

use std::fmt;
use thiserror::Error;

/// Result type for statement building operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors (1xxx)
    /// Criterion column is empty (Q1001).
    EmptyColumn = 1001,
    /// Comparison operator is unknown or not allowed (Q1002).
    InvalidComparisonOperator = 1002,
    /// Logical operator is unknown or not allowed (Q1003).
    InvalidLogicalOperator = 1003,
    /// Operator requires a value but none was given (Q1004).
    MissingValue = 1004,
    /// Value shape does not fit the operator (Q1005).
    InvalidValue = 1005,
    /// Two bind slots normalize to the same placeholder name (Q1006).
    PlaceholderCollision = 1006,
    /// Criteria could not be decoded (Q1007).
    InvalidCriteria = 1007,

    // Configuration errors (2xxx)
    /// Field-value list is empty where one is required (Q2001).
    EmptyFieldValues = 2001,
    /// A joined table has no `on` condition (Q2002).
    MissingJoinCondition = 2002,
    /// Requested table alias is not registered (Q2003).
    UnknownTable = 2003,
    /// Batch rows do not share the same columns (Q2004).
    InconsistentBatchRow = 2004,
    /// Compiler configuration is invalid (Q2005).
    InvalidConfiguration = 2005,

    // Empty input errors (3xxx)
    /// No tables registered (Q3001).
    NoTables = 3001,

    // Binding errors (4xxx)
    /// The statement rejected a bound value (Q4001).
    BindFailed = 4001,
}

/// Broad category of an [`ErrorCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed criterion or value.
    Validation,
    /// Inconsistent tables, field values or compiler configuration.
    Configuration,
    /// Required input is missing entirely.
    EmptyInput,
    /// The external statement refused a binding.
    Binding,
}

impl ErrorCode {
    /// Get the error code string (e.g., "Q1001").
    pub fn code(&self) -> String {
        format!("Q{}", *self as u16)
    }

    /// Get the category of this code.
    pub fn kind(&self) -> ErrorKind {
        match *self as u16 {
            1000..=1999 => ErrorKind::Validation,
            2000..=2999 => ErrorKind::Configuration,
            3000..=3999 => ErrorKind::EmptyInput,
            _ => ErrorKind::Binding,
        }
    }

    /// Get a short description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::EmptyColumn => "Column name cannot be empty",
            Self::InvalidComparisonOperator => "Invalid comparison operator",
            Self::InvalidLogicalOperator => "Invalid logical operator",
            Self::MissingValue => "Missing criterion value",
            Self::InvalidValue => "Invalid criterion value",
            Self::PlaceholderCollision => "Placeholder name collision",
            Self::InvalidCriteria => "Invalid criteria input",
            Self::EmptyFieldValues => "Field values cannot be empty",
            Self::MissingJoinCondition => "Joined table is missing its on condition",
            Self::UnknownTable => "Unknown table alias",
            Self::InconsistentBatchRow => "Inconsistent batch row",
            Self::InvalidConfiguration => "Invalid compiler configuration",
            Self::NoTables => "Tables cannot be empty",
            Self::BindFailed => "Binding failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Additional context for an error.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation that was being performed.
    pub operation: Option<String>,
    /// The input field involved (e.g. `operator`, `column`).
    pub field: Option<String>,
    /// 1-based position of the offending criterion.
    pub position: Option<usize>,
    /// Suggestions for fixing the error.
    pub suggestions: Vec<String>,
}

/// Errors that can occur while building or binding a statement.
#[derive(Error, Debug)]
pub struct QueryError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Additional context.
    pub context: ErrorContext,
    /// The source error (if any).
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl QueryError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add context about the operation.
    pub fn with_context(mut self, operation: impl Into<String>) -> Self {
        self.context.operation = Some(operation.into());
        self
    }

    /// Set the input field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.context.field = Some(field.into());
        self
    }

    /// Set the criterion position.
    pub fn at_position(mut self, position: usize) -> Self {
        self.context.position = Some(position);
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context.suggestions.push(suggestion.into());
        self
    }

    /// Set the source error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // ============== Validation ==============

    /// Create an empty column error.
    pub fn empty_column() -> Self {
        Self::new(ErrorCode::EmptyColumn, "Column name cannot be empty").with_field("column")
    }

    /// Create an invalid comparison operator error.
    pub fn invalid_comparison_operator(operator: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidComparisonOperator,
            format!("'{}' is not a valid comparison operator", operator),
        )
        .with_field("operator")
        .with_suggestion(
            "Use one of: LIKE, NOT LIKE, =, !=, <>, <, <=, >, >=, <=>, IS NOT, IS, IS NOT NULL, IS NULL, IN, NOT IN",
        )
    }

    /// Create an invalid logical operator error.
    pub fn invalid_logical_operator(operator: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidLogicalOperator,
            format!("'{}' is not a valid logical operator", operator),
        )
        .with_field("logicalOperator")
        .with_suggestion("Use one of: AND, OR, XOR, NOT")
    }

    /// Create a missing value error.
    pub fn missing_value(column: &str, operator: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::MissingValue,
            format!("Criterion on '{}' with operator '{}' requires a value", column, operator),
        )
        .with_field("value")
    }

    /// Create an invalid value error.
    pub fn invalid_value(column: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InvalidValue,
            format!("Invalid value for '{}': {}", column, message.into()),
        )
        .with_field("value")
    }

    /// Create a placeholder collision error.
    pub fn placeholder_collision(name: &str) -> Self {
        Self::new(
            ErrorCode::PlaceholderCollision,
            format!("Placeholder '{}' would be bound twice", name),
        )
        .with_suggestion("Rename one of the columns so their placeholders differ")
    }

    /// Create an invalid criteria input error.
    pub fn invalid_criteria(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCriteria, message)
    }

    // ============== Configuration ==============

    /// Create an empty field-values error.
    pub fn empty_field_values(operation: &str) -> Self {
        Self::new(
            ErrorCode::EmptyFieldValues,
            format!("fieldsValues cannot be empty in {}", operation),
        )
        .with_context(operation)
    }

    /// Create a missing join condition error.
    pub fn missing_join_condition(alias: &str) -> Self {
        Self::new(
            ErrorCode::MissingJoinCondition,
            format!("Joined table '{}' must have an on condition", alias),
        )
        .with_field("on")
    }

    /// Create an unknown table error.
    pub fn unknown_table(alias: &str) -> Self {
        Self::new(
            ErrorCode::UnknownTable,
            format!("Requested table does not exist for the alias: {}", alias),
        )
    }

    /// Create an inconsistent batch row error.
    pub fn inconsistent_batch_row(row: usize) -> Self {
        Self::new(
            ErrorCode::InconsistentBatchRow,
            format!("Batch row {} does not use the same columns as row 0", row),
        )
        .with_suggestion("Give every row the same columns in the same order")
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfiguration, message)
    }

    // ============== Empty input ==============

    /// Create a no tables error.
    pub fn no_tables() -> Self {
        Self::new(ErrorCode::NoTables, "Tables cannot be empty")
            .with_suggestion("Register at least one table before building a SELECT or COUNT")
    }

    // ============== Binding ==============

    /// Create a bind failure error.
    pub fn bind_failed(name: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::BindFailed,
            format!("Failed to bind {}: {}", name, message.into()),
        )
    }

    // ============== Error Checks ==============

    /// Get the category of this error.
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    /// Check if this is a validation error.
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Check if this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    /// Check if this is an empty input error.
    pub fn is_empty_input(&self) -> bool {
        self.kind() == ErrorKind::EmptyInput
    }

    /// Display the full error with all context and suggestions.
    pub fn display_full(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Error [{}]: {}\n", self.code.code(), self.message));

        if let Some(ref op) = self.context.operation {
            output.push_str(&format!("  → While: {}\n", op));
        }
        if let Some(ref field) = self.context.field {
            output.push_str(&format!("  → Field: {}\n", field));
        }
        if let Some(position) = self.context.position {
            output.push_str(&format!("  → Criterion: #{}\n", position));
        }

        if !self.context.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for (i, suggestion) in self.context.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::EmptyColumn.code(), "Q1001");
        assert_eq!(ErrorCode::MissingJoinCondition.code(), "Q2002");
        assert_eq!(ErrorCode::NoTables.code(), "Q3001");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(ErrorCode::PlaceholderCollision.kind(), ErrorKind::Validation);
        assert_eq!(ErrorCode::UnknownTable.kind(), ErrorKind::Configuration);
        assert_eq!(ErrorCode::NoTables.kind(), ErrorKind::EmptyInput);
        assert_eq!(ErrorCode::BindFailed.kind(), ErrorKind::Binding);
    }

    #[test]
    fn test_invalid_operator_error() {
        let err = QueryError::invalid_comparison_operator("BOGUS");
        assert!(err.is_validation());
        assert_eq!(err.context.field.as_deref(), Some("operator"));
        assert_eq!(err.to_string(), "[Q1002] 'BOGUS' is not a valid comparison operator");
    }

    #[test]
    fn test_configuration_errors() {
        assert!(QueryError::missing_join_condition("o").is_configuration());
        assert!(QueryError::unknown_table("x").is_configuration());
        assert!(QueryError::empty_field_values("insertQuery").is_configuration());
        assert!(QueryError::no_tables().is_empty_input());
    }

    #[test]
    fn test_display_full() {
        let err = QueryError::invalid_logical_operator("NAND").at_position(3);

        let output = err.display_full();
        assert!(output.contains("Q1003"));
        assert!(output.contains("Criterion: #3"));
        assert!(output.contains("Suggestions"));
    }
}
