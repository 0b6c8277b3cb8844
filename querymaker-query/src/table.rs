//! Table registry.
//!
//! Tables are kept in insertion order under their alias. The first table
//! inserted is the primary table: it is the FROM table of SELECT/COUNT and
//! the target of INSERT/UPDATE/DELETE. Every later table is joined to it
//! and must carry an `on` condition.
//!
//! ```rust
//! use querymaker_query::{Table, Tables};
//!
//! let mut tables = Tables::new();
//! tables.add("u", Table::new("users"));
//! tables.add("o", Table::new("orders").on("u.id", "o.user_id"));
//!
//! assert_eq!(tables.primary().unwrap().name, "users");
//! assert_eq!(
//!     tables.select_from("u.name, o.total").unwrap(),
//!     "SELECT u.name, o.total FROM `users` AS `u` JOIN `orders` AS `o` ON u.id = o.user_id"
//! );
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};

/// A table and, for joined tables, its join condition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Table {
    /// Table name, emitted inside backticks.
    pub name: String,
    /// Join condition as `left = right` pairs, combined with `AND`.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub on: IndexMap<String, String>,
}

impl Table {
    /// Create a table with no join condition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            on: IndexMap::new(),
        }
    }

    /// Add a `left = right` join condition.
    pub fn on(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.on.insert(left.into(), right.into());
        self
    }

    /// Backtick-quoted table name.
    pub fn quoted_name(&self) -> String {
        quote_identifier(&self.name)
    }

    fn on_sql(&self) -> String {
        self.on
            .iter()
            .map(|(left, right)| format!("{} = {}", left, right))
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

/// Wrap an identifier in backticks, doubling any embedded backtick.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Ordered alias → table mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tables {
    tables: IndexMap<String, Table>,
}

impl Tables {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding a single table aliased by its own name.
    pub fn single(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut tables = Self::new();
        tables.add(name.clone(), Table::new(name));
        tables
    }

    /// Register a table under an alias, replacing any table with that alias.
    pub fn add(&mut self, alias: impl Into<String>, table: Table) -> &mut Self {
        self.tables.insert(alias.into(), table);
        self
    }

    /// The primary table (first inserted).
    pub fn primary(&self) -> QueryResult<&Table> {
        self.tables
            .first()
            .map(|(_, table)| table)
            .ok_or_else(QueryError::no_tables)
    }

    /// Look up a table by alias.
    pub fn get(&self, alias: &str) -> QueryResult<&Table> {
        self.tables
            .get(alias)
            .ok_or_else(|| QueryError::unknown_table(alias))
    }

    /// Number of registered tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no table is registered.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterate `(alias, table)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.tables.iter().map(|(alias, table)| (alias.as_str(), table))
    }

    /// Render `SELECT <columns> FROM <primary> [JOIN ...]`.
    pub fn select_from(&self, columns: &str) -> QueryResult<String> {
        if self.tables.is_empty() {
            return Err(QueryError::no_tables());
        }

        let mut from = String::new();
        for (index, (alias, table)) in self.tables.iter().enumerate() {
            if index == 0 {
                from.push_str(&format!("{} AS {}", table.quoted_name(), quote_identifier(alias)));
                continue;
            }

            if table.on.is_empty() {
                return Err(QueryError::missing_join_condition(alias));
            }

            from.push_str(&format!(
                " JOIN {} AS {} ON {}",
                table.quoted_name(),
                quote_identifier(alias),
                table.on_sql()
            ));
        }

        Ok(format!("SELECT {} FROM {}", columns, from))
    }
}

impl<A: Into<String>> FromIterator<(A, Table)> for Tables {
    fn from_iter<I: IntoIterator<Item = (A, Table)>>(iter: I) -> Self {
        let mut tables = Self::new();
        for (alias, table) in iter {
            tables.add(alias, table);
        }
        tables
    }
}
