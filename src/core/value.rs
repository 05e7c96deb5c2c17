use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Scalar value extracted from a record field.
///
/// Records are semi-structured JSON documents; everything the engine filters,
/// sorts or aggregates on is first reduced to one of these scalars.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
}

impl Value {
    /// Convert a JSON scalar. Objects and arrays have no scalar form and map to
    /// `Null`; callers that want a display convention for them go through the
    /// field extractor instead.
    pub fn from_json(json: &JsonValue) -> Self {
        match json {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Boolean(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => n.as_f64().map(Self::Float).unwrap_or(Self::Null),
            },
            JsonValue::String(s) => Self::Text(s.clone()),
            JsonValue::Array(_) | JsonValue::Object(_) => Self::Null,
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Boolean(_) => 1,
            Self::Integer(_) | Self::Float(_) => 2,
            Self::Text(_) => 3,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Numeric view used by aggregation and range filters. Numeric strings
    /// such as `"12.50"` count as numbers; everything else is `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            other => other.as_f64().filter(|f| !f.is_nan()),
        }
    }

    /// String form for search and display. `Null` is the empty string.
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            other => other.to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// `"all"`, the empty string and `Null` mark a filter as inactive.
    pub fn is_inactive_sentinel(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty() || s == "all",
            _ => false,
        }
    }

    /// Case-sensitive equality used by equality filters. Scalars of different
    /// types are compared through their display strings so that a select box
    /// value `"5"` still matches a numeric field holding `5`.
    pub fn loose_eq(&self, other: &Value) -> bool {
        if self.type_rank() == other.type_rank() {
            return self == other;
        }
        if self.is_null() || other.is_null() {
            return false;
        }
        self.to_text() == other.to_text()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => {
                if a.is_nan() && b.is_nan() {
                    return true;
                }
                (a - b).abs() < f64::EPSILON
            }
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(i), Self::Float(f)) | (Self::Float(f), Self::Integer(i)) => {
                (*i as f64 - f).abs() < f64::EPSILON
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(fl) => {
                if fl.is_nan() {
                    write!(f, "NaN")
                } else if fl.is_infinite() {
                    if *fl > 0.0 {
                        write!(f, "Infinity")
                    } else {
                        write!(f, "-Infinity")
                    }
                } else {
                    write!(f, "{}", fl)
                }
            }
            Self::Text(s) => write!(f, "{}", s),
            Self::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_equality() {
        assert_eq!(Value::Integer(42), Value::Integer(42));
        assert_eq!(Value::Float(3.0), Value::Integer(3));
        assert_ne!(Value::Integer(1), Value::Integer(2));
    }

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(Value::from_json(&json!(7)), Value::Integer(7));
        assert_eq!(Value::from_json(&json!(7.25)), Value::Float(7.25));
        assert_eq!(Value::from_json(&json!("x")), Value::Text("x".into()));
        assert_eq!(Value::from_json(&json!(true)), Value::Boolean(true));
        assert_eq!(Value::from_json(&json!({"a": 1})), Value::Null);
    }

    #[test]
    fn test_inactive_sentinels() {
        assert!(Value::Text("all".into()).is_inactive_sentinel());
        assert!(Value::Text(String::new()).is_inactive_sentinel());
        assert!(Value::Null.is_inactive_sentinel());
        assert!(!Value::Text("All".into()).is_inactive_sentinel());
        assert!(!Value::Integer(0).is_inactive_sentinel());
    }

    #[test]
    fn test_loose_equality() {
        assert!(Value::Text("5".into()).loose_eq(&Value::Integer(5)));
        assert!(!Value::Text("Pending".into()).loose_eq(&Value::Text("pending".into())));
        assert!(!Value::Null.loose_eq(&Value::Text(String::new())));
    }

    #[test]
    fn test_numeric_strings() {
        assert_eq!(Value::Text(" 12.50 ".into()).as_number(), Some(12.5));
        assert_eq!(Value::Text("n/a".into()).as_number(), None);
        assert_eq!(Value::Boolean(true).as_number(), None);
    }

    #[test]
    fn test_deserialize_untagged() {
        let values: Vec<Value> = serde_json::from_value(json!([null, 1, 2.5, "x", false])).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Integer(1),
                Value::Float(2.5),
                Value::Text("x".into()),
                Value::Boolean(false)
            ]
        );
    }
}
