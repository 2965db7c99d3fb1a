use crate::models::{OperationSpec, TestRequest};
use crate::synth::ValueSynthesizer;

/// Assembles the test request for one operation. Only query and body
/// parameters receive synthesized values; path templates and headers go
/// out untouched, so a templated path reaches the server with its literal
/// `{param}` segment. That gap is inherited behavior, kept on purpose —
/// filling it would change which endpoints get flagged.
pub struct RequestBuilder {
    synthesizer: ValueSynthesizer,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            synthesizer: ValueSynthesizer::new(),
        }
    }

    pub fn build(&self, operation: &OperationSpec) -> TestRequest {
        let values = operation
            .parameters
            .iter()
            .filter(|param| param.location.is_substitutable())
            .map(|param| {
                (
                    param.name.clone(),
                    self.synthesizer.synthesize(&param.name, param.declared_type),
                )
            })
            .collect();

        TestRequest::new(operation.clone(), values)
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeclaredType, HttpMethod, ParamLocation, ParameterSpec, TestValue};

    fn operation(params: Vec<ParameterSpec>) -> OperationSpec {
        let mut op = OperationSpec::new(HttpMethod::Get, "/things/{thingId}".to_string());
        op.parameters = params;
        op
    }

    #[test]
    fn test_query_and_body_parameters_filled() {
        let builder = RequestBuilder::new();
        let op = operation(vec![
            ParameterSpec::new("page", ParamLocation::Query, DeclaredType::Integer),
            ParameterSpec::new("comment", ParamLocation::Body, DeclaredType::String),
        ]);

        let request = builder.build(&op);
        assert_eq!(request.values.len(), 2);
        assert_eq!(request.values[0].1, TestValue::Int(1));
        assert_eq!(request.values[1].1, TestValue::str("test comment"));
    }

    #[test]
    fn test_path_and_header_parameters_untouched() {
        let builder = RequestBuilder::new();
        let op = operation(vec![
            ParameterSpec::new("thingId", ParamLocation::Path, DeclaredType::Integer),
            ParameterSpec::new("X-Request-Id", ParamLocation::Header, DeclaredType::String),
            ParameterSpec::new("upload", ParamLocation::FormData, DeclaredType::String),
        ]);

        let request = builder.build(&op);
        assert!(request.values.is_empty());
        // The template segment survives into the request path.
        assert_eq!(request.operation.path, "/things/{thingId}");
    }

    #[test]
    fn test_original_names_kept_as_keys() {
        let builder = RequestBuilder::new();
        let op = operation(vec![ParameterSpec::new(
            "PageSize",
            ParamLocation::Query,
            DeclaredType::Integer,
        )]);

        let request = builder.build(&op);
        assert_eq!(request.values[0].0, "PageSize");
        // Matching is done on the normalized name.
        assert_eq!(request.values[0].1, TestValue::Int(1));
    }
}
