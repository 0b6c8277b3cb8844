//! Statement assemblers.
//!
//! [`QueryMaker`] owns a table registry and a criteria compiler and builds
//! complete statements terminated by `;`. Each `*_query` method has a
//! binding counterpart that attaches the values its placeholders expect.
//!
//! ```rust
//! use querymaker_query::{BoundParams, ComparisonOperator, Criterion, QueryMaker, Select};
//!
//! let maker = QueryMaker::for_table("users");
//! let criteria = vec![Criterion::new("age").operator(ComparisonOperator::Gte).value(21)];
//!
//! let sql = maker
//!     .select_query(&criteria, Select::fields(["id", "name"]), Some("name"), 0, 10)
//!     .unwrap();
//! assert_eq!(
//!     sql,
//!     "SELECT id, name FROM `users` AS `users` WHERE age >= :age1 ORDER BY name LIMIT :limit;"
//! );
//!
//! let mut params = BoundParams::new();
//! maker.bind_values(&mut params, &criteria, 0, 10, &[]).unwrap();
//! assert_eq!(params.names().collect::<Vec<_>>(), [":age1", ":limit"]);
//! ```

use std::collections::HashSet;

use tracing::debug;

use crate::binder::{bind_batch_row, bind_fields_values, bind_start_limit};
use crate::clause::{Pagination, Select, limit_offset, order_by};
use crate::compiler::CriteriaCompiler;
use crate::criterion::{Criterion, FieldValue};
use crate::error::{QueryError, QueryResult};
use crate::placeholder::{LIMIT, START, field_placeholder};
use crate::statement::Statement;
use crate::table::{Table, Tables};

/// Builds SELECT, COUNT, INSERT, UPDATE and DELETE statements.
#[derive(Debug, Clone, Default)]
pub struct QueryMaker {
    tables: Tables,
    compiler: CriteriaCompiler,
}

impl QueryMaker {
    /// Create a query maker over a table registry.
    pub fn new(tables: Tables) -> Self {
        Self {
            tables,
            compiler: CriteriaCompiler::default(),
        }
    }

    /// Create a query maker for one table aliased by its own name.
    pub fn for_table(name: impl Into<String>) -> Self {
        Self::new(Tables::single(name))
    }

    /// Use a specific criteria compiler.
    pub fn with_compiler(mut self, compiler: CriteriaCompiler) -> Self {
        self.compiler = compiler;
        self
    }

    /// Register another table.
    pub fn add_table(&mut self, alias: impl Into<String>, table: Table) -> &mut Self {
        self.tables.add(alias, table);
        self
    }

    /// The table registry.
    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// The criteria compiler.
    pub fn compiler(&self) -> &CriteriaCompiler {
        &self.compiler
    }

    /// Build a SELECT across every registered table.
    pub fn select_query(
        &self,
        criteria: &[Criterion],
        select: impl Into<Select>,
        order: Option<&str>,
        start: u64,
        limit: u64,
    ) -> QueryResult<String> {
        let select = select.into();
        let mut sql = self.tables.select_from(&select.to_sql())?;
        sql.push_str(self.compiler.compile(criteria)?.sql());
        sql.push_str(&order_by(order));
        sql.push_str(&limit_offset(start, limit));
        sql.push(';');

        debug!(kind = "select", tables = self.tables.len(), sql_len = sql.len(), "built statement");
        Ok(sql)
    }

    /// Build a `SELECT COUNT(*)` across every registered table.
    pub fn count_query(&self, criteria: &[Criterion]) -> QueryResult<String> {
        let mut sql = self.tables.select_from("COUNT(*)")?;
        sql.push_str(self.compiler.compile(criteria)?.sql());
        sql.push(';');

        debug!(kind = "count", tables = self.tables.len(), "built statement");
        Ok(sql)
    }

    /// Build an UPDATE of the primary table.
    ///
    /// A SET placeholder may not repeat a WHERE placeholder, `:start` or
    /// `:limit` when those are emitted, or another SET placeholder.
    pub fn update_query(
        &self,
        criteria: &[Criterion],
        fields_values: &[FieldValue],
        start: u64,
        limit: u64,
    ) -> QueryResult<String> {
        if fields_values.is_empty() {
            return Err(QueryError::empty_field_values("updateQuery"));
        }
        let table = self.tables.primary()?;
        let compiled = self.compiler.compile(criteria)?;

        let pagination = Pagination::new(start, limit);

        let mut taken: HashSet<String> = compiled.placeholders().map(str::to_string).collect();
        if pagination.has_start() {
            taken.insert(START.to_string());
        }
        if !pagination.is_empty() {
            taken.insert(LIMIT.to_string());
        }

        let mut assignments = Vec::with_capacity(fields_values.len());
        for field in fields_values {
            if !field.bind {
                assignments.push(format!("{} = {}", field.column, field.value.to_literal()));
                continue;
            }
            let name = field_placeholder(&field.column, None);
            claim(&mut taken, &name, "updateQuery")?;
            assignments.push(format!("{} = {}", field.column, name));
        }

        let mut sql = format!("UPDATE {} SET {}", table.quoted_name(), assignments.join(", "));
        sql.push_str(compiled.sql());
        sql.push_str(&pagination.to_sql());
        sql.push(';');

        debug!(kind = "update", table = %table.name, fields = fields_values.len(), "built statement");
        Ok(sql)
    }

    /// Build an INSERT into the primary table.
    pub fn insert_query(&self, fields_values: &[FieldValue]) -> QueryResult<String> {
        if fields_values.is_empty() {
            return Err(QueryError::empty_field_values("insertQuery"));
        }
        check_row_placeholders(&mut HashSet::new(), fields_values, None, "insertQuery")?;
        let table = self.tables.primary()?;

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({});",
            table.quoted_name(),
            column_list(fields_values),
            row_values(fields_values, None)
        );

        debug!(kind = "insert", table = %table.name, fields = fields_values.len(), "built statement");
        Ok(sql)
    }

    /// Build a multi-row INSERT into the primary table.
    ///
    /// Placeholders carry the 0-based row index (`:name0`, `:name1`, ...).
    /// Every row must list the same columns in the same order as the first.
    /// Row suffixes can make names collide (column `a` in row 10 and column
    /// `a1` in row 0 both yield `:a10`); that is a `PlaceholderCollision`.
    pub fn batch_insert_query(&self, rows: &[Vec<FieldValue>]) -> QueryResult<String> {
        let Some(first) = rows.first().filter(|row| !row.is_empty()) else {
            return Err(QueryError::empty_field_values("batchInsertQuery"));
        };
        check_batch_columns(rows)?;
        check_batch_placeholders(rows, "batchInsertQuery")?;
        let table = self.tables.primary()?;

        let values = rows
            .iter()
            .enumerate()
            .map(|(row, fields)| format!("({})", row_values(fields, Some(row))))
            .collect::<Vec<_>>()
            .join(",");

        let sql = format!(
            "INSERT INTO {} ({}) VALUES {};",
            table.quoted_name(),
            column_list(first),
            values
        );

        debug!(kind = "batch_insert", table = %table.name, rows = rows.len(), "built statement");
        Ok(sql)
    }

    /// Build a DELETE from the primary table.
    pub fn delete_query(&self, criteria: &[Criterion], start: u64, limit: u64) -> QueryResult<String> {
        let table = self.tables.primary()?;

        let mut sql = format!("DELETE FROM {}", table.quoted_name());
        sql.push_str(self.compiler.compile(criteria)?.sql());
        sql.push_str(&limit_offset(start, limit));
        sql.push(';');

        debug!(kind = "delete", table = %table.name, "built statement");
        Ok(sql)
    }

    /// Bind criteria, field values and `:start` / `:limit` for SELECT,
    /// COUNT, UPDATE, INSERT or DELETE.
    pub fn bind_values<S: Statement + ?Sized>(
        &self,
        statement: &mut S,
        criteria: &[Criterion],
        start: u64,
        limit: u64,
        fields_values: &[FieldValue],
    ) -> QueryResult<()> {
        self.compiler.bind_criteria(statement, criteria)?;
        bind_fields_values(statement, fields_values)?;
        bind_start_limit(statement, start, limit)
    }

    /// Bind everything a [`Self::batch_insert_query`] statement expects.
    pub fn batch_bind_values<S: Statement + ?Sized>(
        &self,
        statement: &mut S,
        criteria: &[Criterion],
        start: u64,
        limit: u64,
        rows: &[Vec<FieldValue>],
    ) -> QueryResult<()> {
        if rows.is_empty() {
            return Err(QueryError::empty_field_values("batchBindValues"));
        }
        check_batch_columns(rows)?;
        check_batch_placeholders(rows, "batchBindValues")?;

        self.compiler.bind_criteria(statement, criteria)?;
        for (row, fields) in rows.iter().enumerate() {
            bind_batch_row(statement, fields, row)?;
        }
        bind_start_limit(statement, start, limit)
    }
}

fn column_list(fields_values: &[FieldValue]) -> String {
    fields_values
        .iter()
        .map(|f| f.column.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

fn row_values(fields_values: &[FieldValue], row: Option<usize>) -> String {
    fields_values
        .iter()
        .map(|field| {
            if field.bind {
                field_placeholder(&field.column, row)
            } else {
                field.value.to_literal()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn claim(taken: &mut HashSet<String>, name: &str, operation: &str) -> QueryResult<()> {
    if taken.insert(name.to_string()) {
        Ok(())
    } else {
        Err(QueryError::placeholder_collision(name).with_context(operation))
    }
}

fn check_row_placeholders(
    taken: &mut HashSet<String>,
    fields_values: &[FieldValue],
    row: Option<usize>,
    operation: &str,
) -> QueryResult<()> {
    for field in fields_values.iter().filter(|f| f.bind) {
        claim(taken, &field_placeholder(&field.column, row), operation)?;
    }
    Ok(())
}

fn check_batch_placeholders(rows: &[Vec<FieldValue>], operation: &str) -> QueryResult<()> {
    let mut taken = HashSet::new();
    for (row, fields) in rows.iter().enumerate() {
        check_row_placeholders(&mut taken, fields, Some(row), operation)?;
    }
    Ok(())
}

fn check_batch_columns(rows: &[Vec<FieldValue>]) -> QueryResult<()> {
    let Some(first) = rows.first() else {
        return Ok(());
    };
    for (index, row) in rows.iter().enumerate().skip(1) {
        let same = row.len() == first.len()
            && row.iter().zip(first).all(|(a, b)| a.column == b.column);
        if !same {
            return Err(QueryError::inconsistent_batch_row(index));
        }
    }
    Ok(())
}
