//! Criterion validation.
//!
//! Runs once per criterion before any text is produced for it.

use crate::config::CompilerConfig;
use crate::criterion::Criterion;
use crate::error::{QueryError, QueryResult};
use crate::value::FilterValue;

/// Reject a malformed criterion.
///
/// Fails when the column is empty, when an operator is outside the
/// configured sets, or when the value does not fit the operator.
pub fn criterion(criterion: &Criterion, config: &CompilerConfig) -> QueryResult<()> {
    if criterion.column.trim().is_empty() {
        return Err(QueryError::empty_column());
    }

    if let Some(operator) = criterion.operator {
        if !config.allows_comparison(operator) {
            return Err(QueryError::invalid_comparison_operator(operator));
        }
    }

    if let Some(logical) = criterion.logical_operator {
        if !config.allows_logical(logical) {
            return Err(QueryError::invalid_logical_operator(logical));
        }
    }

    let operator = criterion.operator.unwrap_or(config.default_comparison);
    if !operator.takes_value() {
        return Ok(());
    }

    match &criterion.value {
        None => Err(QueryError::missing_value(&criterion.column, operator)),
        Some(FilterValue::List(_)) if !operator.is_list() => Err(QueryError::invalid_value(
            &criterion.column,
            format!("a list needs IN or NOT IN, not '{}'", operator),
        )),
        Some(FilterValue::List(values)) if values.is_empty() => Err(QueryError::invalid_value(
            &criterion.column,
            format!("'{}' needs at least one value", operator),
        )),
        Some(FilterValue::List(values)) if values.iter().any(FilterValue::is_list) => {
            Err(QueryError::invalid_value(
                &criterion.column,
                "list elements must be scalars",
            ))
        }
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::operator::{ComparisonOperator, LogicalOperator};

    fn check(criterion: &Criterion) -> QueryResult<()> {
        super::criterion(criterion, &CompilerConfig::default())
    }

    #[test]
    fn test_valid_criteria() {
        assert!(check(&Criterion::equals("a", 1)).is_ok());
        assert!(check(&Criterion::is_null("a")).is_ok());
        assert!(check(&Criterion::in_list("a", [1, 2])).is_ok());
        assert!(check(&Criterion::new("a").operator(ComparisonOperator::In).value(1)).is_ok());
    }

    #[test]
    fn test_empty_column() {
        let err = check(&Criterion::equals("", 1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyColumn);

        let err = check(&Criterion::equals("   ", 1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyColumn);
    }

    #[test]
    fn test_disallowed_operators() {
        let config = CompilerConfig::default()
            .with_allowed_comparisons([ComparisonOperator::Eq])
            .with_allowed_logicals([LogicalOperator::And]);

        let err = super::criterion(
            &Criterion::new("a").operator(ComparisonOperator::Like).value("x%"),
            &config,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidComparisonOperator);

        let err = super::criterion(
            &Criterion::equals("a", 1).logical(LogicalOperator::Xor),
            &config,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidLogicalOperator);
    }

    #[test]
    fn test_missing_value() {
        let err = check(&Criterion::new("a")).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingValue);
    }

    #[test]
    fn test_list_value_shapes() {
        let err = check(&Criterion::equals("a", vec![1, 2])).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidValue);

        let err = check(&Criterion::in_list("a", Vec::<i64>::new())).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidValue);

        let nested = FilterValue::List(vec![FilterValue::List(vec![1.into()])]);
        let err = check(&Criterion::new("a").operator(ComparisonOperator::In).value(nested))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidValue);
    }
}
