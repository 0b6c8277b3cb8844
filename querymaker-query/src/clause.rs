//! ORDER BY, LIMIT and column-list clauses.
//!
//! ```rust
//! use querymaker_query::clause::{Pagination, order_by};
//!
//! assert_eq!(order_by(Some("created_at DESC")), " ORDER BY created_at DESC");
//! assert_eq!(order_by(None), "");
//!
//! assert_eq!(Pagination::new(0, 5).to_sql(), " LIMIT :limit");
//! assert_eq!(Pagination::new(5, 0).to_sql(), "");
//! assert_eq!(Pagination::new(5, 5).to_sql(), " LIMIT :start, :limit");
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::QueryResult;
use crate::placeholder::{LIMIT, START};
use crate::statement::Statement;
use crate::value::{BindType, FilterValue};

/// Render `" ORDER BY <field>"`, or nothing for an absent or empty field.
///
/// The field text is trusted and emitted as given.
pub fn order_by(field: Option<&str>) -> String {
    match field {
        Some(field) if !field.is_empty() => format!(" ORDER BY {}", field),
        _ => String::new(),
    }
}

/// Render the LIMIT clause for `start` and `limit`.
///
/// Zero means absent for both, so a zero offset or a zero row count cannot
/// be expressed here.
pub fn limit_offset(start: u64, limit: u64) -> String {
    Pagination::new(start, limit).to_sql()
}

/// Offset and row count for a LIMIT clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Rows to skip; zero means absent.
    pub start: u64,
    /// Rows to return; zero means absent.
    pub limit: u64,
}

impl Pagination {
    /// Create pagination from an offset and a row count.
    pub fn new(start: u64, limit: u64) -> Self {
        Self { start, limit }
    }

    /// Pagination for the first `limit` rows.
    pub fn first(limit: u64) -> Self {
        Self::new(0, limit)
    }

    /// Whether no LIMIT clause is emitted.
    pub fn is_empty(&self) -> bool {
        self.limit == 0
    }

    /// Whether the LIMIT clause carries an offset.
    pub fn has_start(&self) -> bool {
        self.start != 0 && self.limit != 0
    }

    /// Generate the LIMIT clause.
    pub fn to_sql(&self) -> String {
        if self.has_start() {
            format!(" LIMIT {}, {}", START, LIMIT)
        } else if !self.is_empty() {
            format!(" LIMIT {}", LIMIT)
        } else {
            String::new()
        }
    }

    /// Bind `:start` / `:limit` exactly when [`Self::to_sql`] emits them.
    pub fn bind<S: Statement + ?Sized>(&self, statement: &mut S) -> QueryResult<()> {
        if self.has_start() {
            statement.bind_named_value(START, &int_value(self.start), BindType::Int)?;
        }
        if !self.is_empty() {
            statement.bind_named_value(LIMIT, &int_value(self.limit), BindType::Int)?;
        }
        Ok(())
    }
}

fn int_value(n: u64) -> FilterValue {
    FilterValue::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

/// Columns to select.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Select {
    /// Select all columns.
    #[default]
    All,
    /// Select specific column expressions.
    Fields(Vec<String>),
}

impl Select {
    /// Select all columns.
    pub fn all() -> Self {
        Self::All
    }

    /// Select specific column expressions.
    pub fn fields(fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            Self::All
        } else {
            Self::Fields(fields)
        }
    }

    /// Generate the column list.
    pub fn to_sql(&self) -> Cow<'static, str> {
        match self {
            Self::All => Cow::Borrowed("*"),
            Self::Fields(fields) => Cow::Owned(fields.join(", ")),
        }
    }
}

impl From<&str> for Select {
    fn from(field: &str) -> Self {
        if field.is_empty() {
            Self::All
        } else {
            Self::Fields(vec![field.to_string()])
        }
    }
}

impl<S: Into<String>> From<Vec<S>> for Select {
    fn from(fields: Vec<S>) -> Self {
        Self::fields(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::BoundParams;

    #[test]
    fn test_order_by() {
        assert_eq!(order_by(Some("name")), " ORDER BY name");
        assert_eq!(order_by(Some("")), "");
        assert_eq!(order_by(None), "");
    }

    #[test]
    fn test_limit_offset_boundaries() {
        assert_eq!(limit_offset(0, 5), " LIMIT :limit");
        assert_eq!(limit_offset(5, 0), "");
        assert_eq!(limit_offset(5, 5), " LIMIT :start, :limit");
        assert_eq!(limit_offset(0, 0), "");
    }

    #[test]
    fn test_bind_mirrors_clause() {
        let mut params = BoundParams::new();
        Pagination::new(5, 0).bind(&mut params).unwrap();
        assert!(params.is_empty());

        let mut params = BoundParams::new();
        Pagination::new(0, 5).bind(&mut params).unwrap();
        assert_eq!(params.names().collect::<Vec<_>>(), [":limit"]);

        let mut params = BoundParams::new();
        Pagination::new(10, 5).bind(&mut params).unwrap();
        assert_eq!(params.names().collect::<Vec<_>>(), [":start", ":limit"]);
        assert_eq!(params.get(":start").unwrap().value, FilterValue::Int(10));
        assert_eq!(params.get(":limit").unwrap().bind_type, BindType::Int);
    }

    #[test]
    fn test_select() {
        assert_eq!(Select::all().to_sql(), "*");
        assert_eq!(Select::fields(["id", "name"]).to_sql(), "id, name");
        assert_eq!(Select::fields(Vec::<String>::new()), Select::All);
        assert_eq!(Select::from("COUNT(*)").to_sql(), "COUNT(*)");
    }
}
