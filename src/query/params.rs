//! Convert serde_json::Value filter operands to PostgREST literals.

use serde_json::Value;

#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    Text(String),
}

impl FilterValue {
    pub fn from_json(v: &Value) -> Self {
        match v {
            Value::Null => FilterValue::Null,
            Value::Bool(b) => FilterValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FilterValue::I64(i),
                None => FilterValue::F64(n.as_f64().unwrap_or(0.0)),
            },
            Value::String(s) => FilterValue::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => FilterValue::Text(v.to_string()),
        }
    }

    /// Right-hand side of an equality filter; `null` needs the `is` operator.
    pub fn render_eq(&self) -> String {
        match self {
            FilterValue::Null => "is.null".to_string(),
            FilterValue::Bool(b) => format!("eq.{}", b),
            FilterValue::I64(n) => format!("eq.{}", n),
            FilterValue::F64(n) => format!("eq.{}", n),
            FilterValue::Text(s) => format!("eq.{}", s),
        }
    }

    /// Same-value test used by the in-process store.
    pub fn matches(&self, v: Option<&Value>) -> bool {
        let v = match v {
            None | Some(Value::Null) => return matches!(self, FilterValue::Null),
            Some(v) => v,
        };
        match (self, v) {
            (FilterValue::Bool(a), Value::Bool(b)) => a == b,
            (FilterValue::I64(a), Value::Number(n)) => n.as_f64() == Some(*a as f64),
            (FilterValue::F64(a), Value::Number(n)) => n.as_f64() == Some(*a),
            (FilterValue::Text(a), Value::String(s)) => a == s,
            (FilterValue::Text(a), other) => *a == other.to_string(),
            _ => false,
        }
    }
}
