//! Compiler configuration.
//!
//! The defaults and allowed operator sets live in an immutable
//! [`CompilerConfig`] owned by each compiler. It can be built in code or
//! parsed from a `[compiler]` TOML table:
//!
//! ```toml
//! [compiler]
//! default_comparison = "="
//! default_logical = "AND"
//! allowed_comparisons = ["=", "!=", "<", ">", "IN", "IS NULL"]
//! allowed_logicals = ["AND", "OR"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};
use crate::operator::{ComparisonOperator, LogicalOperator};

/// Defaults and allowed operators used by the criteria compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerConfig {
    /// Operator used when a criterion has none.
    #[serde(default)]
    pub default_comparison: ComparisonOperator,

    /// Connective used when a criterion has none.
    #[serde(default)]
    pub default_logical: LogicalOperator,

    /// Comparison operators accepted by validation.
    #[serde(default = "all_comparisons")]
    pub allowed_comparisons: Vec<ComparisonOperator>,

    /// Logical operators accepted by validation.
    #[serde(default = "all_logicals")]
    pub allowed_logicals: Vec<LogicalOperator>,
}

fn all_comparisons() -> Vec<ComparisonOperator> {
    ComparisonOperator::ALL.to_vec()
}

fn all_logicals() -> Vec<LogicalOperator> {
    LogicalOperator::ALL.to_vec()
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            default_comparison: ComparisonOperator::Eq,
            default_logical: LogicalOperator::And,
            allowed_comparisons: all_comparisons(),
            allowed_logicals: all_logicals(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    compiler: CompilerConfig,
}

impl CompilerConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> QueryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            QueryError::invalid_configuration(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))
            .with_source(e)
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string holding a `[compiler]` table.
    pub fn from_toml_str(content: &str) -> QueryResult<Self> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| {
            QueryError::invalid_configuration(format!("Invalid compiler configuration: {}", e))
                .with_source(e)
        })?;

        file.compiler.validated()
    }

    /// Set the default comparison operator.
    pub fn with_default_comparison(mut self, operator: ComparisonOperator) -> Self {
        self.default_comparison = operator;
        self
    }

    /// Set the default logical operator.
    pub fn with_default_logical(mut self, operator: LogicalOperator) -> Self {
        self.default_logical = operator;
        self
    }

    /// Restrict the accepted comparison operators.
    pub fn with_allowed_comparisons(
        mut self,
        operators: impl IntoIterator<Item = ComparisonOperator>,
    ) -> Self {
        self.allowed_comparisons = operators.into_iter().collect();
        self
    }

    /// Restrict the accepted logical operators.
    pub fn with_allowed_logicals(
        mut self,
        operators: impl IntoIterator<Item = LogicalOperator>,
    ) -> Self {
        self.allowed_logicals = operators.into_iter().collect();
        self
    }

    /// Check that both defaults are themselves allowed.
    pub fn validated(self) -> QueryResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Check that both defaults are themselves allowed, without consuming.
    pub fn validate(&self) -> QueryResult<()> {
        if !self.allows_comparison(self.default_comparison) {
            return Err(QueryError::invalid_configuration(format!(
                "Default comparison operator '{}' is not in the allowed set",
                self.default_comparison
            )));
        }
        if !self.allows_logical(self.default_logical) {
            return Err(QueryError::invalid_configuration(format!(
                "Default logical operator '{}' is not in the allowed set",
                self.default_logical
            )));
        }
        Ok(())
    }

    /// Whether validation accepts this comparison operator.
    pub fn allows_comparison(&self, operator: ComparisonOperator) -> bool {
        self.allowed_comparisons.contains(&operator)
    }

    /// Whether validation accepts this logical operator.
    pub fn allows_logical(&self, operator: LogicalOperator) -> bool {
        self.allowed_logicals.contains(&operator)
    }
}
