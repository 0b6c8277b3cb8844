//! Placeholder naming and the shared per-criterion bind plan.
//!
//! Named parameters may only contain `[a-zA-Z0-9_]`. [`placeholder_name`]
//! strips backticks and replaces every other disallowed character with `_`:
//!
//! ```rust
//! use querymaker_query::placeholder::placeholder_name;
//!
//! assert_eq!(placeholder_name("`u`.`created_at`"), "u_created_at");
//! assert_eq!(placeholder_name("price-eur"), "price_eur");
//! ```
//!
//! Columns that differ only in disallowed characters (`a.b` and `a-b`)
//! normalize to the same name. Pick column references that stay distinct.
//!
//! [`plan_criterion`] is the only place criterion placeholders are named.
//! The WHERE compiler renders its text from the plan and the binder binds
//! from the same plan, so the two cannot disagree.

use smallvec::SmallVec;

use crate::config::CompilerConfig;
use crate::criterion::Criterion;
use crate::error::QueryResult;
use crate::operator::{ComparisonOperator, LogicalOperator};
use crate::validate;
use crate::value::{BindType, FilterValue};

/// Placeholder bound to the LIMIT offset.
pub const START: &str = ":start";
/// Placeholder bound to the LIMIT row count.
pub const LIMIT: &str = ":limit";

/// Normalize a column reference into a bind identifier.
pub fn placeholder_name(column: &str) -> String {
    column
        .chars()
        .filter(|c| *c != '`')
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Placeholder for a field assignment, suffixed with the row index in batches.
pub fn field_placeholder(column: &str, row: Option<usize>) -> String {
    match row {
        Some(row) => format!(":{}{}", placeholder_name(column), row),
        None => format!(":{}", placeholder_name(column)),
    }
}

/// One value to bind under one placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct BindSlot<'a> {
    /// Placeholder, including the leading `:`.
    pub name: String,
    /// Bound value.
    pub value: &'a FilterValue,
    /// Explicit type or the detected one.
    pub bind_type: BindType,
}

/// Everything needed to render or bind one criterion.
#[derive(Debug, Clone)]
pub struct CriterionPlan<'a> {
    /// 1-based position in the criteria list.
    pub position: usize,
    /// The criterion itself.
    pub criterion: &'a Criterion,
    /// Effective comparison operator.
    pub operator: ComparisonOperator,
    /// Effective logical connective.
    pub logical: LogicalOperator,
    /// Bind slots in left-to-right order.
    pub slots: SmallVec<[BindSlot<'a>; 1]>,
}

impl CriterionPlan<'_> {
    /// Render `<column> <operator>[ <placeholders>]` without a connective.
    pub fn condition_sql(&self) -> String {
        let mut sql = String::with_capacity(self.criterion.column.len() + 16);
        sql.push_str(&self.criterion.column);
        sql.push(' ');
        sql.push_str(self.operator.as_sql());

        if self.operator.is_list() {
            sql.push_str(" (");
            for (i, slot) in self.slots.iter().enumerate() {
                if i > 0 {
                    sql.push(',');
                }
                sql.push_str(&slot.name);
            }
            sql.push(')');
        } else if let Some(slot) = self.slots.first() {
            sql.push(' ');
            sql.push_str(&slot.name);
        }

        sql
    }
}

/// Validate one criterion and derive its placeholders and bind values.
///
/// Scalar placeholders are `:<name><position>`. List elements are
/// `:<name><position><index>` with a 0-based index. A scalar given to
/// `IN` / `NOT IN` gets the scalar form.
pub fn plan_criterion<'a>(
    position: usize,
    criterion: &'a Criterion,
    config: &CompilerConfig,
) -> QueryResult<CriterionPlan<'a>> {
    validate::criterion(criterion, config).map_err(|e| e.at_position(position))?;

    let operator = criterion.operator.unwrap_or(config.default_comparison);
    let logical = criterion.logical_operator.unwrap_or(config.default_logical);
    let base = placeholder_name(&criterion.column);

    let mut slots = SmallVec::new();
    match (operator.takes_value(), criterion.value.as_ref()) {
        (false, _) | (true, None) => {}
        (true, Some(FilterValue::List(values))) => {
            for (index, value) in values.iter().enumerate() {
                slots.push(BindSlot {
                    name: format!(":{}{}{}", base, position, index),
                    value,
                    bind_type: criterion
                        .bind_type
                        .unwrap_or_else(|| value.detect_bind_type()),
                });
            }
        }
        (true, Some(value)) => slots.push(BindSlot {
            name: format!(":{}{}", base, position),
            value,
            bind_type: criterion
                .bind_type
                .unwrap_or_else(|| value.detect_bind_type()),
        }),
    }

    Ok(CriterionPlan {
        position,
        criterion,
        operator,
        logical,
        slots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_placeholder_name() {
        assert_eq!(placeholder_name("age"), "age");
        assert_eq!(placeholder_name("`users`.`id`"), "users_id");
        assert_eq!(placeholder_name("u.first name"), "u_first_name");
        assert_eq!(placeholder_name("héllo"), "h_llo");
    }

    #[test]
    fn test_placeholder_name_collision_is_accepted() {
        assert_eq!(placeholder_name("a.b"), placeholder_name("a-b"));
    }

    #[test]
    fn test_field_placeholder() {
        assert_eq!(field_placeholder("`name`", None), ":name");
        assert_eq!(field_placeholder("name", Some(3)), ":name3");
    }

    #[test]
    fn test_plan_scalar() {
        let config = CompilerConfig::default();
        let criterion = Criterion::new("age").operator(ComparisonOperator::Gt).value(18);
        let plan = plan_criterion(1, &criterion, &config).unwrap();

        assert_eq!(plan.slots.len(), 1);
        assert_eq!(plan.slots[0].name, ":age1");
        assert_eq!(plan.slots[0].bind_type, BindType::Int);
        assert_eq!(plan.condition_sql(), "age > :age1");
    }

    #[test]
    fn test_plan_list() {
        let config = CompilerConfig::default();
        let criterion = Criterion::in_list("id", [7, 8, 9]);
        let plan = plan_criterion(2, &criterion, &config).unwrap();

        let names: Vec<_> = plan.slots.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, [":id20", ":id21", ":id22"]);
        assert_eq!(plan.condition_sql(), "id IN (:id20,:id21,:id22)");
    }

    #[test]
    fn test_plan_in_with_scalar() {
        let config = CompilerConfig::default();
        let criterion = Criterion::new("id").operator(ComparisonOperator::NotIn).value(5);
        let plan = plan_criterion(3, &criterion, &config).unwrap();

        assert_eq!(plan.condition_sql(), "id NOT IN (:id3)");
        assert_eq!(plan.slots[0].value, &FilterValue::Int(5));
    }

    #[test]
    fn test_plan_is_null_has_no_slots() {
        let config = CompilerConfig::default();
        let criterion = Criterion::is_null("deleted_at");
        let plan = plan_criterion(1, &criterion, &config).unwrap();

        assert!(plan.slots.is_empty());
        assert_eq!(plan.condition_sql(), "deleted_at IS NULL");
    }

    #[test]
    fn test_plan_explicit_bind_type() {
        let config = CompilerConfig::default();
        let criterion = Criterion::equals("zip", 1234).bind_type(BindType::Str);
        let plan = plan_criterion(1, &criterion, &config).unwrap();
        assert_eq!(plan.slots[0].bind_type, BindType::Str);
    }

    #[test]
    fn test_plan_reports_position() {
        let config = CompilerConfig::default();
        let criterion = Criterion::new("");
        let err = plan_criterion(4, &criterion, &config).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyColumn);
        assert_eq!(err.context.position, Some(4));
    }
}
