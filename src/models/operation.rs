use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        };
        write!(f, "{}", s)
    }
}

impl HttpMethod {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "PATCH" => Some(HttpMethod::Patch),
            "DELETE" => Some(HttpMethod::Delete),
            "HEAD" => Some(HttpMethod::Head),
            "OPTIONS" => Some(HttpMethod::Options),
            _ => None,
        }
    }

    /// Methods the audit actually dispatches. Everything else is declared
    /// in specs often enough to parse, but gets a skip entry instead of a
    /// request.
    pub fn is_dispatchable(&self) -> bool {
        matches!(
            self,
            HttpMethod::Get | HttpMethod::Post | HttpMethod::Put | HttpMethod::Delete
        )
    }

    pub fn requires_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Delete)
    }

    pub fn is_destructive(&self) -> bool {
        matches!(self, HttpMethod::Delete)
    }
}

/// Where a parameter is declared to live. `Other` covers a missing or
/// unrecognized `in` field; such parameters are still visible to the
/// sensitivity check but never placed into a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamLocation {
    Query,
    Path,
    Header,
    Body,
    FormData,
    Other,
}

impl ParamLocation {
    pub fn parse(s: &str) -> Self {
        match s {
            "query" => ParamLocation::Query,
            "path" => ParamLocation::Path,
            "header" => ParamLocation::Header,
            "body" => ParamLocation::Body,
            "formData" => ParamLocation::FormData,
            _ => ParamLocation::Other,
        }
    }

    pub fn is_substitutable(&self) -> bool {
        matches!(self, ParamLocation::Query | ParamLocation::Body)
    }
}

/// Declared parameter type. A missing `type` field decodes as `String`,
/// an unrecognized one as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclaredType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    Unknown,
}

impl DeclaredType {
    pub fn parse(s: &str) -> Self {
        match s {
            "string" => DeclaredType::String,
            "integer" => DeclaredType::Integer,
            "number" => DeclaredType::Number,
            "boolean" => DeclaredType::Boolean,
            "array" => DeclaredType::Array,
            "object" => DeclaredType::Object,
            _ => DeclaredType::Unknown,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub location: ParamLocation,
    pub declared_type: DeclaredType,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, location: ParamLocation, declared_type: DeclaredType) -> Self {
        Self {
            name: name.into(),
            location,
            declared_type,
        }
    }
}

/// One (path, method) pair declared in the specification, with its
/// parameter list in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationSpec {
    pub path: String,
    pub method: HttpMethod,
    pub parameters: Vec<ParameterSpec>,
}

impl OperationSpec {
    pub fn new(method: HttpMethod, path: String) -> Self {
        Self {
            path,
            method,
            parameters: Vec::new(),
        }
    }

    pub fn display_path(&self) -> String {
        format!("{:6} {}", self.method, self.path)
    }
}
