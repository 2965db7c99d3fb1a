use serde_json::Value;
use std::fs;

use crate::error::AuditError;
use crate::models::{DeclaredType, HttpMethod, OperationSpec, ParamLocation, ParameterSpec};

/// Extracts the operations a Swagger v2 / OpenAPI v3 document declares.
/// Operations come back in document order, one per (path, method) pair.
pub struct OpenApiParser;

impl OpenApiParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_file(&self, path: &str) -> Result<Vec<OperationSpec>, AuditError> {
        let content = fs::read_to_string(path)
            .map_err(|e| AuditError::spec_load(format!("cannot read {}: {}", path, e)))?;

        self.parse_content(&content)
    }

    pub fn parse_content(&self, content: &str) -> Result<Vec<OperationSpec>, AuditError> {
        let spec: Value = serde_json::from_str(content)
            .map_err(|e| AuditError::spec_load(format!("not valid JSON: {}", e)))?;

        self.parse_value(&spec)
    }

    pub fn parse_value(&self, spec: &Value) -> Result<Vec<OperationSpec>, AuditError> {
        let version = Self::detect_version(spec);
        if matches!(version, SpecVersion::Unknown) {
            return Err(AuditError::spec_load(
                "document declares neither 'swagger' nor 'openapi'",
            ));
        }

        let paths = spec
            .get("paths")
            .and_then(|p| p.as_object())
            .ok_or_else(|| AuditError::spec_load("no 'paths' object found"))?;

        let mut operations = Vec::new();

        for (path, methods) in paths {
            let methods_obj = match methods.as_object() {
                Some(m) => m,
                None => continue,
            };

            for (method_str, operation) in methods_obj {
                // Path items also carry non-method keys like "parameters".
                let method = match HttpMethod::parse(method_str) {
                    Some(m) => m,
                    None => continue,
                };

                let mut op = OperationSpec::new(method, path.clone());

                if let Some(params) = operation.get("parameters").and_then(|p| p.as_array()) {
                    op.parameters = Self::parse_parameters(params, version);
                }

                if matches!(version, SpecVersion::V3) {
                    op.parameters.extend(Self::parse_request_body_v3(operation));
                }

                operations.push(op);
            }
        }

        Ok(operations)
    }

    fn detect_version(spec: &Value) -> SpecVersion {
        if spec.get("openapi").is_some() {
            SpecVersion::V3
        } else if spec.get("swagger").is_some() {
            SpecVersion::V2
        } else {
            SpecVersion::Unknown
        }
    }

    fn parse_parameters(params: &[Value], version: SpecVersion) -> Vec<ParameterSpec> {
        let mut parsed = Vec::new();

        for param in params {
            let name = match param.get("name").and_then(|v| v.as_str()) {
                Some(n) => n.to_string(),
                None => continue,
            };

            let location = param
                .get("in")
                .and_then(|v| v.as_str())
                .map(ParamLocation::parse)
                .unwrap_or(ParamLocation::Other);

            // v2 declares the type on the parameter itself, v3 nests it
            // under a schema. A missing type counts as string.
            let type_field = match version {
                SpecVersion::V3 => param.get("schema").and_then(|s| s.get("type")),
                _ => param.get("type"),
            };
            let declared_type = type_field
                .and_then(|v| v.as_str())
                .map(DeclaredType::parse)
                .unwrap_or(DeclaredType::String);

            parsed.push(ParameterSpec::new(name, location, declared_type));
        }

        parsed
    }

    fn parse_request_body_v3(operation: &Value) -> Vec<ParameterSpec> {
        operation
            .get("requestBody")
            .and_then(|rb| rb.get("content"))
            .and_then(|c| c.get("application/json"))
            .and_then(|j| j.get("schema"))
            .and_then(|s| s.get("properties"))
            .and_then(|p| p.as_object())
            .map(|properties| {
                properties
                    .iter()
                    .map(|(name, schema)| {
                        let declared_type = schema
                            .get("type")
                            .and_then(|v| v.as_str())
                            .map(DeclaredType::parse)
                            .unwrap_or(DeclaredType::String);
                        ParameterSpec::new(name.clone(), ParamLocation::Body, declared_type)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for OpenApiParser {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
enum SpecVersion {
    V3,
    V2,
    Unknown,
}
