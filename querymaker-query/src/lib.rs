//! # querymaker-query
//!
//! Parametrized SQL text for a MySQL-style dialect, built from a flat list of
//! criteria, together with the bindings for every placeholder it emits.
//!
//! The crate never executes SQL. It produces statement text and hands
//! `(name, value, type)` triples to anything implementing [`Statement`].
//!
//! ## Criteria
//!
//! ```rust
//! use querymaker_query::{ComparisonOperator, CriteriaCompiler, Criterion, LogicalOperator};
//!
//! let criteria = vec![
//!     Criterion::new("age").operator(ComparisonOperator::Gt).value(18),
//!     Criterion::in_list("id", [3, 5]).logical(LogicalOperator::Or),
//!     Criterion::is_null("deleted_at"),
//! ];
//!
//! let compiled = CriteriaCompiler::default().compile(&criteria).unwrap();
//! assert_eq!(
//!     compiled.sql(),
//!     " WHERE age > :age1 OR id IN (:id20,:id21) AND deleted_at IS NULL"
//! );
//! ```
//!
//! ## Placeholder names
//!
//! ```rust
//! use querymaker_query::placeholder::placeholder_name;
//!
//! assert_eq!(placeholder_name("`u`.`created_at`"), "u_created_at");
//! assert_eq!(placeholder_name("a-b"), "a_b");
//! ```
//!
//! ## Statements
//!
//! ```rust
//! use querymaker_query::{BoundParams, Criterion, FieldValue, QueryMaker};
//!
//! let maker = QueryMaker::for_table("users");
//! let criteria = vec![Criterion::equals("id", 7)];
//! let fields = vec![FieldValue::new("name", "Ada")];
//!
//! let sql = maker.update_query(&criteria, &fields, 0, 0).unwrap();
//! assert_eq!(sql, "UPDATE `users` SET name = :name WHERE id = :id1;");
//!
//! let mut params = BoundParams::new();
//! maker.bind_values(&mut params, &criteria, 0, 0, &fields).unwrap();
//! assert_eq!(params.len(), 2);
//! ```
//!
//! ## Errors
//!
//! Every failure is a [`QueryError`] with a stable [`ErrorCode`]:
//!
//! ```rust
//! use querymaker_query::{CriteriaCompiler, Criterion, ErrorCode};
//!
//! let err = CriteriaCompiler::default()
//!     .compile(&[Criterion::equals("", 1)])
//!     .unwrap_err();
//! assert_eq!(err.code, ErrorCode::EmptyColumn);
//! assert!(err.is_validation());
//! ```

pub mod binder;
pub mod clause;
pub mod compiler;
pub mod config;
pub mod criterion;
pub mod error;
pub mod logging;
pub mod operator;
pub mod placeholder;
pub mod query;
pub mod statement;
pub mod table;
pub mod validate;
pub mod value;

pub use binder::{bind_batch_row, bind_fields_values, bind_start_limit};
pub use clause::{Pagination, Select, limit_offset, order_by};
pub use compiler::{Binding, CompiledWhere, CriteriaCompiler};
pub use config::CompilerConfig;
pub use criterion::{Criterion, FieldValue, NestedSpec, criteria_from_json};
pub use error::{ErrorCode, ErrorContext, ErrorKind, QueryError, QueryResult};
pub use operator::{ComparisonOperator, LogicalOperator};
pub use placeholder::{field_placeholder, placeholder_name};
pub use query::QueryMaker;
pub use statement::{BoundParams, BoundValue, Statement};
pub use table::{Table, Tables, quote_identifier};
pub use value::{BindType, FilterValue};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::clause::{Pagination, Select};
    pub use crate::compiler::{CompiledWhere, CriteriaCompiler};
    pub use crate::config::CompilerConfig;
    pub use crate::criterion::{Criterion, FieldValue, NestedSpec};
    pub use crate::error::{QueryError, QueryResult};
    pub use crate::operator::{ComparisonOperator, LogicalOperator};
    pub use crate::query::QueryMaker;
    pub use crate::statement::{BoundParams, Statement};
    pub use crate::table::{Table, Tables};
    pub use crate::value::{BindType, FilterValue};
}
