use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use specprobe::scanner::{AuditConfig, AuditOrchestrator, AuditPhase, OpenApiParser};

/// Serves the same canned HTTP/1.1 response to every connection.
async fn spawn_server(status: &'static str, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };

            tokio::spawn(async move {
                let mut data = Vec::new();
                let mut buf = [0u8; 4096];
                let mut header_end = None;

                loop {
                    let n = match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => n,
                    };
                    data.extend_from_slice(&buf[..n]);

                    if header_end.is_none() {
                        header_end = data
                            .windows(4)
                            .position(|w| w == b"\r\n\r\n")
                            .map(|p| p + 4);
                    }

                    if let Some(end) = header_end {
                        let headers = String::from_utf8_lossy(&data[..end]).to_lowercase();
                        let content_length = headers
                            .lines()
                            .find_map(|line| line.strip_prefix("content-length:"))
                            .and_then(|v| v.trim().parse::<usize>().ok())
                            .unwrap_or(0);
                        if data.len() >= end + content_length {
                            break;
                        }
                    }
                }

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// An address nothing is listening on.
async fn refused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

fn orchestrator_for(addr: SocketAddr, include_destructive: bool) -> AuditOrchestrator {
    AuditOrchestrator::new(AuditConfig {
        base_url: format!("http://{}", addr),
        proxy: None,
        timeout_secs: 5,
        concurrency: 4,
        include_destructive,
    })
    .unwrap()
}

#[tokio::test]
async fn open_endpoint_is_flagged_unauthorized() {
    let addr = spawn_server("200 OK", r#"{"ok": true}"#).await;

    let doc = serde_json::json!({
        "swagger": "2.0",
        "paths": { "/users": { "get": {} } }
    });
    let operations = OpenApiParser::new().parse_value(&doc).unwrap();

    let mut orchestrator = orchestrator_for(addr, false);
    let results = orchestrator.run(operations, false).await;

    assert_eq!(results.unauthorized.len(), 1);
    assert_eq!(results.sensitive.len(), 0);
    assert_eq!(results.failed.len(), 0);

    let finding = &results.unauthorized[0];
    assert_eq!(finding.status, 200);
    assert_eq!(finding.response, serde_json::json!({"ok": true}));
    assert!(finding.url.ends_with("/users"));
    assert_eq!(orchestrator.phase(), AuditPhase::Done);
}

#[tokio::test]
async fn unreachable_host_yields_failed_and_sensitive() {
    let addr = refused_addr().await;

    let doc = serde_json::json!({
        "swagger": "2.0",
        "paths": {
            "/login": {
                "post": {
                    "parameters": [
                        {"name": "password", "in": "query", "type": "string"}
                    ]
                }
            }
        }
    });
    let operations = OpenApiParser::new().parse_value(&doc).unwrap();

    let mut orchestrator = orchestrator_for(addr, false);
    let results = orchestrator.run(operations, false).await;

    assert_eq!(results.failed.len(), 1);
    assert!(!results.failed[0].error.is_empty());
    assert_eq!(results.unauthorized.len(), 0);

    assert_eq!(results.sensitive.len(), 1);
    assert!(results.sensitive[0].params.contains("password"));
}

#[tokio::test]
async fn disabled_delete_leaves_no_trace() {
    let addr = refused_addr().await;

    let doc = serde_json::json!({
        "swagger": "2.0",
        "paths": {
            "/item/{id}": {
                "delete": {
                    "parameters": [
                        {"name": "id", "in": "path", "type": "integer"}
                    ]
                }
            }
        }
    });
    let operations = OpenApiParser::new().parse_value(&doc).unwrap();

    let mut orchestrator = orchestrator_for(addr, false);
    let results = orchestrator.run(operations, false).await;

    assert_eq!(results.unauthorized.len(), 0);
    assert_eq!(results.sensitive.len(), 0);
    assert_eq!(results.failed.len(), 0);
    assert_eq!(results.skipped, 1);
}

#[tokio::test]
async fn enabled_delete_is_dispatched() {
    let addr = spawn_server("200 OK", r#"{"deleted": 1}"#).await;

    let doc = serde_json::json!({
        "swagger": "2.0",
        "paths": { "/item": { "delete": {} } }
    });
    let operations = OpenApiParser::new().parse_value(&doc).unwrap();

    let mut orchestrator = orchestrator_for(addr, true);
    let results = orchestrator.run(operations, false).await;

    assert_eq!(results.unauthorized.len(), 1);
    assert_eq!(results.skipped, 0);
}

#[tokio::test]
async fn rejection_produces_no_entries() {
    let addr = spawn_server("401 Unauthorized", r#"{"error": "auth required"}"#).await;

    let doc = serde_json::json!({
        "swagger": "2.0",
        "paths": { "/admin": { "get": {} } }
    });
    let operations = OpenApiParser::new().parse_value(&doc).unwrap();

    let mut orchestrator = orchestrator_for(addr, false);
    let results = orchestrator.run(operations, false).await;

    assert!(results.is_clean());
    assert_eq!(results.rejected, 1);
}

#[tokio::test]
async fn unauthorized_and_sensitive_are_independent_checks() {
    let addr = spawn_server("200 OK", r#"{"session": "abc"}"#).await;

    let doc = serde_json::json!({
        "swagger": "2.0",
        "paths": {
            "/login": {
                "post": {
                    "parameters": [
                        {"name": "password", "in": "query", "type": "string"},
                        {"name": "remember", "in": "query", "type": "boolean"}
                    ]
                }
            }
        }
    });
    let operations = OpenApiParser::new().parse_value(&doc).unwrap();

    let mut orchestrator = orchestrator_for(addr, false);
    let results = orchestrator.run(operations, false).await;

    assert_eq!(results.unauthorized.len(), 1);
    assert_eq!(results.sensitive.len(), 1);
    assert_eq!(results.failed.len(), 0);

    // The request payload the server saw is recorded verbatim.
    let request = &results.unauthorized[0].request;
    assert_eq!(request["password"], serde_json::json!("P@$$wOrd"));
    assert_eq!(request["remember"], serde_json::json!(true));
}

#[tokio::test]
async fn findings_keep_specification_order() {
    let addr = spawn_server("200 OK", r#"{}"#).await;

    let doc = serde_json::json!({
        "swagger": "2.0",
        "paths": {
            "/zebra": { "get": {} },
            "/apple": { "get": {} },
            "/mango": { "get": {} }
        }
    });
    let operations = OpenApiParser::new().parse_value(&doc).unwrap();

    let mut orchestrator = orchestrator_for(addr, false);
    let results = orchestrator.run(operations, false).await;

    assert_eq!(results.unauthorized.len(), 3);
    assert!(results.unauthorized[0].url.ends_with("/zebra"));
    assert!(results.unauthorized[1].url.ends_with("/apple"));
    assert!(results.unauthorized[2].url.ends_with("/mango"));
}
