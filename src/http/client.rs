use reqwest::{Client, Method, Proxy};
use std::time::{Duration, Instant};

use crate::error::AuditError;
use crate::models::{HttpMethod, TestRequest};

/// Raw transport result for one dispatched request. Classification
/// happens elsewhere; this layer only moves bytes.
#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub duration_ms: u64,
}

pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: String, timeout_secs: u64, proxy: Option<&str>) -> Result<Self, AuditError> {
        // Certificate verification stays off: the tool is pointed at
        // self-signed internal hosts as a matter of course.
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .danger_accept_invalid_certs(true);

        if let Some(proxy_url) = proxy {
            let proxy = Proxy::all(proxy_url)
                .map_err(|e| AuditError::configuration(format!("invalid proxy '{}': {}", proxy_url, e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| AuditError::configuration(format!("failed to build HTTP client: {}", e)))?;

        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn dispatch(&self, request: &TestRequest) -> Result<RawResponse, reqwest::Error> {
        let start = Instant::now();
        let method = Self::to_reqwest_method(request.operation.method);

        let url = if request.operation.method.requires_body() {
            self.endpoint_url(&request.operation.path)
        } else {
            format!(
                "{}{}",
                self.endpoint_url(&request.operation.path),
                Self::query_string(&request.query_pairs())
            )
        };

        let mut builder = self
            .client
            .request(method, &url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json");

        if request.operation.method.requires_body() {
            builder = builder.json(&request.body_json());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await.unwrap_or_default().to_vec();

        Ok(RawResponse {
            status,
            body,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn query_string(pairs: &[(String, String)]) -> String {
        if pairs.is_empty() {
            return String::new();
        }

        let encoded: Vec<String> = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();

        format!("?{}", encoded.join("&"))
    }

    fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpClient::new("http://host:8080/".to_string(), 5, None).unwrap();
        assert_eq!(client.endpoint_url("/users"), "http://host:8080/users");
    }

    #[test]
    fn test_query_string_encodes_values() {
        let pairs = vec![
            ("redirect".to_string(), "http://example.com/redirect".to_string()),
            ("page".to_string(), "1".to_string()),
        ];
        assert_eq!(
            HttpClient::query_string(&pairs),
            "?redirect=http%3A%2F%2Fexample.com%2Fredirect&page=1"
        );
    }

    #[test]
    fn test_empty_query_string() {
        assert_eq!(HttpClient::query_string(&[]), "");
    }

    #[test]
    fn test_invalid_proxy_is_configuration_error() {
        let result = HttpClient::new("http://host".to_string(), 5, Some("not a proxy"));
        assert!(matches!(result, Err(AuditError::Configuration { .. })));
    }
}
