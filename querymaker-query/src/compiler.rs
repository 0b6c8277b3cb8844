//! Criteria-to-WHERE compilation.
//!
//! Criteria are processed strictly in input order with a 1-based position
//! counter that advances once per criterion, grouped or not. Each position
//! names that criterion's placeholders (`:age1`, `:status2`, `:id30`, ...).
//!
//! ```rust
//! use querymaker_query::{ComparisonOperator, CriteriaCompiler, Criterion};
//!
//! let compiler = CriteriaCompiler::default();
//! let criteria = vec![
//!     Criterion::new("age").operator(ComparisonOperator::Gt).value(18),
//!     Criterion::equals("status", "active"),
//! ];
//!
//! let compiled = compiler.compile(&criteria).unwrap();
//! assert_eq!(compiled.sql(), " WHERE age > :age1 AND status = :status2");
//! assert_eq!(compiled.bindings().len(), 2);
//! ```
//!
//! # Nested groups
//!
//! Criteria sharing a `nested.key` are merged, in list order, into one
//! parenthesized group. The group sits where the key first appears, even
//! when later members are interleaved with other criteria:
//!
//! ```rust
//! use querymaker_query::{CriteriaCompiler, Criterion};
//!
//! let criteria = vec![
//!     Criterion::equals("a", 1),
//!     Criterion::equals("b", 2).group("g"),
//!     Criterion::equals("c", 3).group("g"),
//! ];
//! let compiled = CriteriaCompiler::default().compile(&criteria).unwrap();
//! assert_eq!(compiled.sql(), " WHERE a = :a1 AND (b = :b2 AND c = :c3)");
//! ```
//!
//! The connective in front of a group is omitted at position 1; otherwise it
//! is `nested.before` when given, else the first member's logical operator.
//! Inside the group the first member has no connective. A group with
//! `nested.after` supplies the connective for whatever is appended to the
//! outer text next.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::CompilerConfig;
use crate::criterion::Criterion;
use crate::error::{QueryError, QueryResult};
use crate::placeholder::{CriterionPlan, plan_criterion};
use crate::value::{BindType, FilterValue};

/// An owned placeholder binding produced by compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// Placeholder, including the leading `:`.
    pub name: String,
    /// Bound value.
    pub value: FilterValue,
    /// Bind type.
    pub bind_type: BindType,
}

/// A compiled WHERE clause and the bindings it expects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledWhere {
    sql: String,
    bindings: Vec<Binding>,
}

impl CompiledWhere {
    /// The clause text: empty, or starting with `" WHERE "`.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bindings in placeholder order.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Whether there were no criteria.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Iterate placeholder names in order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|b| b.name.as_str())
    }

    /// Split into text and bindings.
    pub fn into_parts(self) -> (String, Vec<Binding>) {
        (self.sql, self.bindings)
    }
}

/// Compiles ordered criteria into WHERE text and binds their values.
///
/// The configuration is immutable and shared, so a compiler can be cloned
/// cheaply and used from several threads at once.
#[derive(Debug, Clone, Default)]
pub struct CriteriaCompiler {
    config: Arc<CompilerConfig>,
}

enum Segment<'a> {
    Condition(String),
    Group(GroupSegment<'a>),
}

struct GroupSegment<'a> {
    connective: Option<&'a str>,
    after: Option<&'a str>,
    body: String,
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

impl CriteriaCompiler {
    /// Create a compiler, rejecting a configuration whose defaults are not allowed.
    pub fn new(config: CompilerConfig) -> QueryResult<Self> {
        Ok(Self {
            config: Arc::new(config.validated()?),
        })
    }

    /// Create a compiler sharing a configuration with other compilers.
    pub fn with_shared_config(config: Arc<CompilerConfig>) -> QueryResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The compiler configuration.
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Validate every criterion and derive its bind plan.
    ///
    /// Fails on the first invalid criterion, or when two slots share a
    /// placeholder name.
    pub fn plan<'a>(&self, criteria: &'a [Criterion]) -> QueryResult<Vec<CriterionPlan<'a>>> {
        let mut seen = HashSet::new();
        let mut plans = Vec::with_capacity(criteria.len());

        for (index, criterion) in criteria.iter().enumerate() {
            let plan = plan_criterion(index + 1, criterion, &self.config)?;
            for slot in &plan.slots {
                if !seen.insert(slot.name.clone()) {
                    return Err(QueryError::placeholder_collision(&slot.name)
                        .at_position(plan.position));
                }
            }
            plans.push(plan);
        }

        Ok(plans)
    }

    /// Compile criteria into `" WHERE ..."`, or an empty clause when there are none.
    pub fn compile(&self, criteria: &[Criterion]) -> QueryResult<CompiledWhere> {
        if criteria.is_empty() {
            return Ok(CompiledWhere::default());
        }

        let plans = self.plan(criteria)?;

        let mut segments: Vec<Segment<'_>> = Vec::new();
        let mut groups: HashMap<&str, usize> = HashMap::new();
        let mut after_pending = false;

        for plan in &plans {
            let condition = plan.condition_sql();
            let first = plan.position == 1;
            trace!(position = plan.position, condition = %condition, "compiled criterion");

            let criterion: &Criterion = plan.criterion;
            let Some(nested) = &criterion.nested else {
                let text = if first || after_pending {
                    condition
                } else {
                    format!("{} {}", plan.logical, condition)
                };
                after_pending = false;
                segments.push(Segment::Condition(text));
                continue;
            };

            if let Some(&index) = groups.get(nested.key.as_str()) {
                if let Segment::Group(group) = &mut segments[index] {
                    group.body.push(' ');
                    group.body.push_str(plan.logical.as_sql());
                    group.body.push(' ');
                    group.body.push_str(&condition);
                }
                continue;
            }

            let before = non_blank(nested.before.as_deref());
            let connective = if first {
                None
            } else if before.is_some() {
                before
            } else if after_pending {
                None
            } else {
                Some(plan.logical.as_sql())
            };
            let after = non_blank(nested.after.as_deref());
            after_pending = after.is_some();

            groups.insert(nested.key.as_str(), segments.len());
            segments.push(Segment::Group(GroupSegment {
                connective,
                after,
                body: condition,
            }));
        }

        let mut sql = String::from(" WHERE ");
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                sql.push(' ');
            }
            match segment {
                Segment::Condition(text) => sql.push_str(text),
                Segment::Group(group) => {
                    if let Some(connective) = group.connective {
                        sql.push_str(connective);
                        sql.push(' ');
                    }
                    sql.push('(');
                    sql.push_str(group.body.trim_end());
                    sql.push(')');
                    if let Some(after) = group.after {
                        sql.push(' ');
                        sql.push_str(after);
                    }
                }
            }
        }
        let sql = sql.trim_end().to_string();

        let bindings: Vec<Binding> = plans
            .iter()
            .flat_map(|plan| plan.slots.iter())
            .map(|slot| Binding {
                name: slot.name.clone(),
                value: slot.value.clone(),
                bind_type: slot.bind_type,
            })
            .collect();

        debug!(
            criteria = criteria.len(),
            groups = groups.len(),
            placeholders = bindings.len(),
            "compiled WHERE clause"
        );
        crate::querymaker_debug!(sql = %sql, "WHERE clause text");

        Ok(CompiledWhere { sql, bindings })
    }
}
