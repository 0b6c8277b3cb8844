//! Attaching values to the placeholders the compilers emit.
//!
//! Criterion bindings come from [`CriteriaCompiler::plan`], the same plan
//! the WHERE text is rendered from. Field bindings use
//! [`field_placeholder`], the same helper the INSERT/UPDATE assemblers use.
//!
//! ```rust
//! use querymaker_query::{BoundParams, ComparisonOperator, CriteriaCompiler, Criterion};
//!
//! let criteria = vec![
//!     Criterion::new("age").operator(ComparisonOperator::Gt).value(18),
//!     Criterion::equals("status", "active"),
//! ];
//!
//! let mut params = BoundParams::new();
//! CriteriaCompiler::default().bind_criteria(&mut params, &criteria).unwrap();
//! assert_eq!(params.names().collect::<Vec<_>>(), [":age1", ":status2"]);
//! ```

use crate::clause::Pagination;
use crate::compiler::CriteriaCompiler;
use crate::criterion::{Criterion, FieldValue};
use crate::error::QueryResult;
use crate::placeholder::field_placeholder;
use crate::statement::Statement;

impl CriteriaCompiler {
    /// Bind every criterion value under the placeholder [`Self::compile`] emits for it.
    ///
    /// `IS NULL` / `IS NOT NULL` criteria bind nothing; list values bind one
    /// placeholder per element, left to right.
    pub fn bind_criteria<S: Statement + ?Sized>(
        &self,
        statement: &mut S,
        criteria: &[Criterion],
    ) -> QueryResult<()> {
        for plan in self.plan(criteria)? {
            for slot in &plan.slots {
                crate::querymaker_trace!(name = %slot.name, bind_type = ?slot.bind_type, "binding criterion value");
                statement.bind_named_value(&slot.name, slot.value, slot.bind_type)?;
            }
        }
        Ok(())
    }
}

/// Bind field values for INSERT/UPDATE.
///
/// Entries with `bind == false` are skipped; their text is already in the SQL.
/// The bind type defaults to string.
pub fn bind_fields_values<S: Statement + ?Sized>(
    statement: &mut S,
    fields_values: &[FieldValue],
) -> QueryResult<()> {
    bind_fields(statement, fields_values, None)
}

/// Bind one batch-insert row, using row-suffixed placeholders.
pub fn bind_batch_row<S: Statement + ?Sized>(
    statement: &mut S,
    fields_values: &[FieldValue],
    row: usize,
) -> QueryResult<()> {
    bind_fields(statement, fields_values, Some(row))
}

fn bind_fields<S: Statement + ?Sized>(
    statement: &mut S,
    fields_values: &[FieldValue],
    row: Option<usize>,
) -> QueryResult<()> {
    for field in fields_values.iter().filter(|f| f.bind) {
        let name = field_placeholder(&field.column, row);
        crate::querymaker_trace!(name = %name, "binding field value");
        statement.bind_named_value(&name, &field.value, field.bind_type.unwrap_or_default())?;
    }
    Ok(())
}

/// Bind `:start` / `:limit` under the same presence rule as the LIMIT clause.
pub fn bind_start_limit<S: Statement + ?Sized>(
    statement: &mut S,
    start: u64,
    limit: u64,
) -> QueryResult<()> {
    Pagination::new(start, limit).bind(statement)
}
