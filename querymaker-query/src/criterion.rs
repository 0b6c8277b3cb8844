//! Filter criteria and field assignments.
//!
//! A criteria list is an ordered `Vec<Criterion>`. Criteria sharing a
//! [`NestedSpec::key`] are rendered together as one parenthesized group.
//!
//! ```rust
//! use querymaker_query::{ComparisonOperator, Criterion, LogicalOperator};
//!
//! let criteria = vec![
//!     Criterion::new("age").operator(ComparisonOperator::Gt).value(18),
//!     Criterion::new("status").value("active"),
//!     Criterion::new("role")
//!         .logical(LogicalOperator::Or)
//!         .operator(ComparisonOperator::In)
//!         .value(vec!["admin", "owner"]),
//! ];
//! assert_eq!(criteria.len(), 3);
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{QueryError, QueryResult};
use crate::operator::{ComparisonOperator, LogicalOperator};
use crate::value::{BindType, FilterValue};

/// One filter condition contributing to a WHERE clause.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criterion {
    /// Column reference, emitted verbatim.
    #[serde(default)]
    pub column: String,
    /// Comparison operator; the compiler default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<ComparisonOperator>,
    /// Compared value; not needed for `IS NULL` / `IS NOT NULL`.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<FilterValue>,
    /// Connective placed before the condition; ignored for the first one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_operator: Option<LogicalOperator>,
    /// Bind type override.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub bind_type: Option<BindType>,
    /// Group membership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested: Option<NestedSpec>,
}

/// An explicit `"value": null` is a null value, not a missing one.
fn present_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<FilterValue>, D::Error> {
    FilterValue::deserialize(deserializer).map(Some)
}

impl Criterion {
    /// Create a criterion on a column with every other field defaulted.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ..Self::default()
        }
    }

    /// Shorthand for `column = value`.
    pub fn equals(column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(column).value(value)
    }

    /// Shorthand for `column IS NULL`.
    pub fn is_null(column: impl Into<String>) -> Self {
        Self::new(column).operator(ComparisonOperator::IsNull)
    }

    /// Shorthand for `column IS NOT NULL`.
    pub fn is_not_null(column: impl Into<String>) -> Self {
        Self::new(column).operator(ComparisonOperator::IsNotNull)
    }

    /// Shorthand for `column IN (...)`.
    pub fn in_list<T: Into<FilterValue>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        Self::new(column)
            .operator(ComparisonOperator::In)
            .value(FilterValue::List(values.into_iter().map(Into::into).collect()))
    }

    /// Set the comparison operator.
    pub fn operator(mut self, operator: ComparisonOperator) -> Self {
        self.operator = Some(operator);
        self
    }

    /// Set the comparison operator from its SQL text.
    pub fn operator_str(self, operator: &str) -> QueryResult<Self> {
        Ok(self.operator(operator.parse()?))
    }

    /// Set the compared value.
    pub fn value(mut self, value: impl Into<FilterValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the logical connective.
    pub fn logical(mut self, logical: LogicalOperator) -> Self {
        self.logical_operator = Some(logical);
        self
    }

    /// Set the logical connective from its SQL text.
    pub fn logical_str(self, logical: &str) -> QueryResult<Self> {
        Ok(self.logical(logical.parse()?))
    }

    /// Override the bind type.
    pub fn bind_type(mut self, bind_type: BindType) -> Self {
        self.bind_type = Some(bind_type);
        self
    }

    /// Put the criterion into a group.
    pub fn nested(mut self, nested: NestedSpec) -> Self {
        self.nested = Some(nested);
        self
    }

    /// Put the criterion into the group `key` with no overrides.
    pub fn group(self, key: impl Into<String>) -> Self {
        self.nested(NestedSpec::new(key))
    }
}

/// Group membership of a criterion.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NestedSpec {
    /// Group identifier, unique per group within one criteria list.
    pub key: String,
    /// Connective text placed before the group, replacing the default one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Text placed right after the group closes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

impl NestedSpec {
    /// Create a group spec with no overrides.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            before: None,
            after: None,
        }
    }

    /// Set the text placed before the group.
    pub fn before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    /// Set the text placed after the group.
    pub fn after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }
}

/// One column assignment for INSERT or UPDATE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    /// Target column.
    pub column: String,
    /// Assigned value.
    pub value: FilterValue,
    /// When false the value is interpolated as literal SQL text.
    #[serde(default = "default_bind")]
    pub bind: bool,
    /// Bind type override.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub bind_type: Option<BindType>,
}

fn default_bind() -> bool {
    true
}

impl FieldValue {
    /// Create a bound assignment.
    pub fn new(column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
            bind: true,
            bind_type: None,
        }
    }

    /// Create an assignment interpolated as literal SQL (e.g. `NOW()`).
    pub fn raw(column: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            bind: false,
            ..Self::new(column, FilterValue::String(sql.into()))
        }
    }

    /// Override the bind type.
    pub fn bind_type(mut self, bind_type: BindType) -> Self {
        self.bind_type = Some(bind_type);
        self
    }
}

/// Decode a criteria list from JSON.
///
/// Any decoding failure, including an unknown operator, is a validation error.
pub fn criteria_from_json(json: &str) -> QueryResult<Vec<Criterion>> {
    serde_json::from_str(json).map_err(|e| {
        QueryError::invalid_criteria(format!("Failed to decode criteria: {}", e)).with_source(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_builder_defaults() {
        let criterion = Criterion::new("status");
        assert_eq!(criterion.operator, None);
        assert_eq!(criterion.logical_operator, None);
        assert!(criterion.value.is_none());
        assert!(criterion.nested.is_none());
    }

    #[test]
    fn test_operator_str() {
        let criterion = Criterion::new("name").operator_str("NOT LIKE").unwrap();
        assert_eq!(criterion.operator, Some(ComparisonOperator::NotLike));

        let err = Criterion::new("x").operator_str("BOGUS").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidComparisonOperator);
    }

    #[test]
    fn test_criteria_from_json() {
        let criteria = criteria_from_json(
            r#"[
                {"column": "age", "operator": ">", "value": 18},
                {"column": "status", "value": "active", "logicalOperator": "OR"},
                {"column": "id", "operator": "IN", "value": [1, 2], "type": "int",
                 "nested": {"key": "g", "before": "AND"}}
            ]"#,
        )
        .unwrap();

        assert_eq!(criteria[0].operator, Some(ComparisonOperator::Gt));
        assert_eq!(criteria[0].value, Some(FilterValue::Int(18)));
        assert_eq!(criteria[1].logical_operator, Some(LogicalOperator::Or));
        assert_eq!(criteria[2].bind_type, Some(BindType::Int));
        assert_eq!(criteria[2].nested.as_ref().unwrap().before.as_deref(), Some("AND"));
    }

    #[test]
    fn test_criteria_from_json_explicit_null() {
        let criteria = criteria_from_json(
            r#"[
                {"column": "deleted_at", "operator": "IS", "value": null},
                {"column": "parent_id", "value": null},
                {"column": "archived_at", "operator": "IS"}
            ]"#,
        )
        .unwrap();

        assert_eq!(criteria[0].value, Some(FilterValue::Null));
        assert_eq!(criteria[1].value, Some(FilterValue::Null));
        assert_eq!(criteria[2].value, None);
    }

    #[test]
    fn test_criteria_from_json_rejects_unknown_operator() {
        let err = criteria_from_json(r#"[{"column": "x", "operator": "BOGUS"}]"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCriteria);
        assert!(err.is_validation());
        assert!(err.message.contains("BOGUS"));
    }

    #[test]
    fn test_field_value_raw() {
        let field = FieldValue::raw("updated_at", "NOW()");
        assert!(!field.bind);
        assert_eq!(field.value.to_literal(), "NOW()");

        let field: FieldValue = serde_json::from_str(r#"{"column": "a", "value": 1}"#).unwrap();
        assert!(field.bind);
    }
}
