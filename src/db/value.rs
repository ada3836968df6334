//! Backend-neutral cell values.
//!
//! Both backends read result cells into `Value` so that dumps, reports and
//! integrity checks never see driver-specific types.

use std::fmt;

use serde::Serialize;

/// A single cell of a row, either bound into a statement or read from a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    /// Extract as i64.
    ///
    /// Reals are truncated and text is parsed, since PostgreSQL's simple-query
    /// protocol hands every cell back as text.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Real(f) => Some(*f as i64),
            Value::Text(s) => s.trim().parse().ok(),
            Value::Null => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "None"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) if r.fract() == 0.0 => write!(f, "{:.1}", r),
            Value::Real(r) => write!(f, "{}", r),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Real(f)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Integer(42), Some(42))]
    #[case(Value::Real(42.7), Some(42))]
    #[case(Value::Text("  7 ".into()), Some(7))]
    #[case(Value::Text("S00001".into()), None)]
    #[case(Value::Null, None)]
    fn test_as_i64(#[case] value: Value, #[case] expected: Option<i64>) {
        assert_eq!(value.as_i64(), expected);
    }

    #[rstest]
    fn test_display_null_and_real() {
        assert_eq!(Value::Null.to_string(), "None");
        assert_eq!(Value::Real(75000.0).to_string(), "75000.0");
        assert_eq!(Value::Real(0.5).to_string(), "0.5");
    }

    #[rstest]
    fn test_from_option() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some("S00001")), Value::Text("S00001".into()));
    }

    #[rstest]
    fn test_serializes_untagged() {
        let row = vec![Value::Null, Value::Integer(1), Value::Text("Dog".into())];
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"[null,1,"Dog"]"#);
    }
}
