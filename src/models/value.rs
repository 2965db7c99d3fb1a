use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A concrete test value produced for one parameter. Serializes untagged
/// so it drops straight into a JSON request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TestValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
}

impl TestValue {
    pub fn str(s: &str) -> Self {
        TestValue::Str(s.to_string())
    }

    pub fn map(key: &str, value: &str) -> Self {
        let mut m = BTreeMap::new();
        m.insert(key.to_string(), value.to_string());
        TestValue::Map(m)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Query-string rendition. Scalars render bare; lists join on comma;
    /// maps render as compact JSON.
    pub fn to_query_string(&self) -> String {
        match self {
            TestValue::Str(s) => s.clone(),
            TestValue::Int(i) => i.to_string(),
            TestValue::Float(f) => f.to_string(),
            TestValue::Bool(b) => b.to_string(),
            TestValue::List(items) => items.join(","),
            TestValue::Map(_) => self.to_json().to_string(),
        }
    }
}

impl fmt::Display for TestValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_query_string())
    }
}
