use serde_json::Value;

use super::{OperationSpec, TestValue};

/// A fully assembled test request for one operation: the synthesized
/// values keyed by the parameter's original (non-normalized) name, in
/// declaration order. Built once, consumed once.
#[derive(Debug, Clone)]
pub struct TestRequest {
    pub operation: OperationSpec,
    pub values: Vec<(String, TestValue)>,
}

impl TestRequest {
    pub fn new(operation: OperationSpec, values: Vec<(String, TestValue)>) -> Self {
        Self { operation, values }
    }

    /// The values as a JSON object, for methods that carry a body.
    pub fn body_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (name, value) in &self.values {
            map.insert(name.clone(), value.to_json());
        }
        Value::Object(map)
    }

    /// The values as query pairs, for GET requests.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), value.to_query_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HttpMethod, TestValue};

    #[test]
    fn test_body_json_preserves_names() {
        let op = OperationSpec::new(HttpMethod::Post, "/users".to_string());
        let req = TestRequest::new(
            op,
            vec![
                ("UserName".to_string(), TestValue::str("test_name")),
                ("page".to_string(), TestValue::Int(1)),
            ],
        );

        let body = req.body_json();
        assert_eq!(body["UserName"], serde_json::json!("test_name"));
        assert_eq!(body["page"], serde_json::json!(1));
    }

    #[test]
    fn test_query_pairs_render_scalars() {
        let op = OperationSpec::new(HttpMethod::Get, "/users".to_string());
        let req = TestRequest::new(
            op,
            vec![
                ("flag".to_string(), TestValue::Bool(true)),
                ("count".to_string(), TestValue::Int(10)),
            ],
        );

        let pairs = req.query_pairs();
        assert_eq!(pairs[0], ("flag".to_string(), "true".to_string()));
        assert_eq!(pairs[1], ("count".to_string(), "10".to_string()));
    }
}
