//! Scalar values and bind-type tags.

use serde::{Deserialize, Serialize};

/// A value compared against a column or assigned to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// String value.
    String(String),
    /// List of values, used with `IN` / `NOT IN`.
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if this is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Bind type picked when the caller does not give one.
    ///
    /// Only integers are sent as integers; everything else goes as a string.
    pub fn detect_bind_type(&self) -> BindType {
        match self {
            Self::Int(_) => BindType::Int,
            _ => BindType::Str,
        }
    }

    /// Render the value as literal SQL text for unbound field values.
    ///
    /// Strings are emitted verbatim so callers can pass expressions such as
    /// `NOW()`; the text is not escaped.
    pub fn to_literal(&self) -> String {
        match self {
            Self::Null => "NULL".to_string(),
            Self::Bool(true) => "1".to_string(),
            Self::Bool(false) => "0".to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::String(s) => s.clone(),
            Self::List(values) => values
                .iter()
                .map(Self::to_literal)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for FilterValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

impl From<serde_json::Value> for FilterValue {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value;

        match v {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Into::into).collect()),
            // Objects have no scalar form; keep their JSON text.
            other @ Value::Object(_) => Self::String(other.to_string()),
        }
    }
}

/// How a bound value is transmitted to the prepared statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindType {
    /// SQL NULL.
    Null,
    /// Boolean.
    Bool,
    /// Integer.
    Int,
    /// String (the default).
    #[default]
    Str,
    /// Large object.
    Lob,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_value_from() {
        assert_eq!(FilterValue::from(42i32), FilterValue::Int(42));
        assert_eq!(FilterValue::from("hello"), FilterValue::String("hello".to_string()));
        assert_eq!(FilterValue::from(true), FilterValue::Bool(true));
        assert_eq!(FilterValue::from(None::<i64>), FilterValue::Null);
        assert_eq!(
            FilterValue::from(vec![1, 2]),
            FilterValue::List(vec![FilterValue::Int(1), FilterValue::Int(2)])
        );
    }

    #[test]
    fn test_detect_bind_type() {
        assert_eq!(FilterValue::Int(18).detect_bind_type(), BindType::Int);
        assert_eq!(FilterValue::from("18").detect_bind_type(), BindType::Str);
        assert_eq!(FilterValue::Float(1.5).detect_bind_type(), BindType::Str);
        assert_eq!(FilterValue::Bool(true).detect_bind_type(), BindType::Str);
        assert_eq!(BindType::default(), BindType::Str);
    }

    #[test]
    fn test_to_literal() {
        assert_eq!(FilterValue::from("NOW()").to_literal(), "NOW()");
        assert_eq!(FilterValue::Int(7).to_literal(), "7");
        assert_eq!(FilterValue::Bool(false).to_literal(), "0");
        assert_eq!(FilterValue::Null.to_literal(), "NULL");
    }

    #[test]
    fn test_from_json() {
        let value: FilterValue = serde_json::json!([1, "a", null, 2.5]).into();
        assert_eq!(
            value,
            FilterValue::List(vec![
                FilterValue::Int(1),
                FilterValue::String("a".into()),
                FilterValue::Null,
                FilterValue::Float(2.5),
            ])
        );
    }

    #[test]
    fn test_untagged_deserialize() {
        let value: FilterValue = serde_json::from_str("18").unwrap();
        assert_eq!(value, FilterValue::Int(18));
        let value: FilterValue = serde_json::from_str("[\"a\",\"b\"]").unwrap();
        assert!(value.is_list());
    }
}
