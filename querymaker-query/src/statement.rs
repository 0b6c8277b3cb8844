//! Prepared-statement abstraction used by the binder.
//!
//! The crate never executes SQL. It only hands `(name, value, type)` triples
//! to something implementing [`Statement`]. [`BoundParams`] is an in-memory
//! implementation that records them in order.
//!
//! ```rust
//! use querymaker_query::{BindType, BoundParams, FilterValue, Statement};
//!
//! let mut params = BoundParams::new();
//! params.bind_named_value(":age1", &FilterValue::Int(18), BindType::Int).unwrap();
//! assert_eq!(params.get(":age1").unwrap().value, FilterValue::Int(18));
//! ```

use indexmap::IndexMap;

use crate::error::QueryResult;
use crate::value::{BindType, FilterValue};

/// A statement accepting named parameter bindings.
pub trait Statement {
    /// Bind `value` under `name` (including the leading `:`).
    fn bind_named_value(
        &mut self,
        name: &str,
        value: &FilterValue,
        bind_type: BindType,
    ) -> QueryResult<()>;
}

impl<S: Statement + ?Sized> Statement for &mut S {
    fn bind_named_value(
        &mut self,
        name: &str,
        value: &FilterValue,
        bind_type: BindType,
    ) -> QueryResult<()> {
        (**self).bind_named_value(name, value, bind_type)
    }
}

/// A recorded binding.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundValue {
    /// Bound value.
    pub value: FilterValue,
    /// Bind type.
    pub bind_type: BindType,
}

/// Named bindings recorded in first-bind order.
///
/// Binding a name again replaces its value and keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParams {
    params: IndexMap<String, BoundValue>,
}

impl BoundParams {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a binding by placeholder name.
    pub fn get(&self, name: &str) -> Option<&BoundValue> {
        self.params.get(name)
    }

    /// Number of distinct bound names.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether nothing was bound.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Placeholder names in bind order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    /// Bindings in bind order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundValue)> {
        self.params.iter().map(|(name, bound)| (name.as_str(), bound))
    }

    /// Take the bindings as `(name-without-colon, value)` pairs, the shape
    /// most named-parameter drivers accept.
    pub fn into_named(self) -> Vec<(String, FilterValue)> {
        self.params
            .into_iter()
            .map(|(name, bound)| {
                let name = name.strip_prefix(':').map(str::to_string).unwrap_or(name);
                (name, bound.value)
            })
            .collect()
    }
}

impl Statement for BoundParams {
    fn bind_named_value(
        &mut self,
        name: &str,
        value: &FilterValue,
        bind_type: BindType,
    ) -> QueryResult<()> {
        self.params.insert(
            name.to_string(),
            BoundValue {
                value: value.clone(),
                bind_type,
            },
        );
        Ok(())
    }
}
