//! # QueryMaker
//!
//! Builds parametrized SQL statements from a list of filter criteria, and
//! binds each criterion's value to the placeholder emitted for it.
//!
//! QueryMaker provides:
//! - WHERE compilation with nested groups and per-criterion placeholders
//! - SELECT, COUNT, INSERT, batch INSERT, UPDATE and DELETE assemblers
//! - ORDER BY and LIMIT clauses with bindable `:start` / `:limit`
//! - A binder that feeds any prepared-statement type implementing [`Statement`]
//!
//! ## Quick Start
//!
//! ```rust
//! use querymaker::prelude::*;
//!
//! # fn main() -> Result<(), QueryError> {
//! let maker = QueryMaker::for_table("users");
//!
//! let criteria = vec![
//!     Criterion::new("age").operator(ComparisonOperator::Gt).value(18),
//!     Criterion::equals("status", "active"),
//! ];
//!
//! let sql = maker.select_query(&criteria, Select::All, Some("id"), 0, 25)?;
//! assert_eq!(
//!     sql,
//!     "SELECT * FROM `users` AS `users` WHERE age > :age1 AND status = :status2 ORDER BY id LIMIT :limit;"
//! );
//!
//! let mut params = BoundParams::new();
//! maker.bind_values(&mut params, &criteria, 0, 25, &[])?;
//! assert_eq!(params.names().collect::<Vec<_>>(), [":age1", ":status2", ":limit"]);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub use querymaker_query::*;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use querymaker_query::prelude::*;
}
