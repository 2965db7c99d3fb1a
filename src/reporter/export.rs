use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use tera::{Context as TeraContext, Tera};

use crate::models::{AuditResults, AuditSummary};

pub struct JsonExporter;

impl JsonExporter {
    pub fn export(results: &AuditResults, summary: &AuditSummary, path: &str) -> Result<()> {
        let output = ExportData {
            scan_time: Utc::now().to_rfc3339(),
            summary: summary.clone(),
            results: results.clone(),
        };

        let json = serde_json::to_string_pretty(&output)?;
        fs::write(path, json).with_context(|| format!("Failed to write to {}", path))?;
        Ok(())
    }

    pub fn load(path: &str) -> Result<ExportData> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;

        let data: ExportData = serde_json::from_str(&content)?;
        Ok(data)
    }
}

pub struct HtmlExporter;

impl HtmlExporter {
    pub fn export(results: &AuditResults, summary: &AuditSummary, path: &str) -> Result<()> {
        let mut tera = Tera::default();
        tera.add_raw_template("report.html", Self::get_template())?;

        let mut context = TeraContext::new();
        context.insert(
            "scan_time",
            &Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        );
        context.insert("total_operations", &summary.total_operations);
        context.insert("unauthorized_count", &summary.unauthorized_count);
        context.insert("sensitive_count", &summary.sensitive_count);
        context.insert("failed_count", &summary.failed_count);
        context.insert("rejected_count", &summary.rejected_count);
        context.insert("skipped_count", &summary.skipped_count);

        let unauthorized: Vec<UnauthorizedRow> = results
            .unauthorized
            .iter()
            .map(|f| UnauthorizedRow {
                method: f.method.to_string(),
                method_class: f.method.to_string().to_lowercase(),
                url: f.url.clone(),
                status: f.status,
                request: Self::pretty(&f.request),
                response: Self::pretty(&f.response),
            })
            .collect();

        let sensitive: Vec<SensitiveRow> = results
            .sensitive
            .iter()
            .map(|f| SensitiveRow {
                method: f.method.to_string(),
                method_class: f.method.to_string().to_lowercase(),
                url: f.url.clone(),
                params: f.params.iter().cloned().collect::<Vec<_>>().join(", "),
            })
            .collect();

        let failed: Vec<FailedRow> = results
            .failed
            .iter()
            .map(|f| FailedRow {
                method: f.method.to_string(),
                method_class: f.method.to_string().to_lowercase(),
                url: f.url.clone(),
                error: f.error.clone(),
            })
            .collect();

        context.insert("unauthorized", &unauthorized);
        context.insert("sensitive", &sensitive);
        context.insert("failed", &failed);

        let html = tera.render("report.html", &context)?;
        fs::write(path, html).with_context(|| format!("Failed to write to {}", path))?;
        Ok(())
    }

    fn pretty(value: &serde_json::Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }

    fn get_template() -> &'static str {
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Specprobe Audit Report</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #0d1117; color: #c9d1d9; line-height: 1.6; }
        .container { max-width: 1200px; margin: 0 auto; padding: 2rem; }
        h1 { color: #58a6ff; margin-bottom: 0.5rem; }
        h2 { margin: 2rem 0 1rem; }
        .subtitle { color: #8b949e; margin-bottom: 2rem; }
        .summary { display: grid; grid-template-columns: repeat(auto-fit, minmax(150px, 1fr)); gap: 1rem; margin-bottom: 2rem; }
        .stat { background: #161b22; border: 1px solid #30363d; border-radius: 6px; padding: 1rem; text-align: center; }
        .stat-value { font-size: 2rem; font-weight: bold; }
        .stat-label { color: #8b949e; font-size: 0.875rem; }
        .unauthorized-stat .stat-value { color: #f85149; }
        .sensitive-stat .stat-value { color: #d29922; }
        .failed-stat .stat-value { color: #8b949e; }
        .rejected-stat .stat-value { color: #3fb950; }
        .endpoint { background: #161b22; border: 1px solid #30363d; border-radius: 6px; padding: 1rem; margin: 0.75rem 0; word-wrap: break-word; }
        .endpoint.unauthorized { border-left: 4px solid #f85149; }
        .endpoint.sensitive { border-left: 4px solid #d29922; }
        .endpoint.failed { border-left: 4px solid #8b949e; }
        .endpoint h3 { display: inline; font-size: 1rem; font-weight: 500; }
        .endpoint h4 { margin-top: 0.75rem; color: #8b949e; font-size: 0.875rem; }
        pre { background: #0d1117; border: 1px solid #30363d; padding: 0.75rem; border-radius: 4px; overflow-x: auto; white-space: pre-wrap; word-wrap: break-word; font-size: 0.8125rem; margin-top: 0.25rem; }
        .method { display: inline-block; padding: 0.2rem 0.5rem; margin-right: 0.5rem; border-radius: 4px; color: #0d1117; font-weight: 700; font-size: 0.75rem; }
        .get { background-color: #61affe; }
        .post { background-color: #49cc90; }
        .put { background-color: #fca130; }
        .delete { background-color: #f93e3e; }
        .status-line { color: #8b949e; margin-top: 0.5rem; font-size: 0.875rem; }
        .empty { color: #8b949e; font-style: italic; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Specprobe Audit Report</h1>
        <p class="subtitle">Generated: {{ scan_time }}</p>

        <div class="summary">
            <div class="stat">
                <div class="stat-value">{{ total_operations }}</div>
                <div class="stat-label">Operations</div>
            </div>
            <div class="stat unauthorized-stat">
                <div class="stat-value">{{ unauthorized_count }}</div>
                <div class="stat-label">Unauthorized</div>
            </div>
            <div class="stat sensitive-stat">
                <div class="stat-value">{{ sensitive_count }}</div>
                <div class="stat-label">Sensitive</div>
            </div>
            <div class="stat failed-stat">
                <div class="stat-value">{{ failed_count }}</div>
                <div class="stat-label">Failed</div>
            </div>
            <div class="stat rejected-stat">
                <div class="stat-value">{{ rejected_count }}</div>
                <div class="stat-label">Rejected</div>
            </div>
            <div class="stat">
                <div class="stat-value">{{ skipped_count }}</div>
                <div class="stat-label">Skipped</div>
            </div>
        </div>

        <h2>Unauthorized Endpoints</h2>
        {% for row in unauthorized %}
        <div class="endpoint unauthorized">
            <span class="method {{ row.method_class }}">{{ row.method }}</span>
            <h3>{{ row.url }}</h3>
            <h4>Request</h4>
            <pre>{{ row.request }}</pre>
            <h4>Response</h4>
            <pre>{{ row.response }}</pre>
            <p class="status-line">Status Code: {{ row.status }}</p>
        </div>
        {% else %}
        <p class="empty">None.</p>
        {% endfor %}

        <h2>Sensitive Parameters</h2>
        {% for row in sensitive %}
        <div class="endpoint sensitive">
            <span class="method {{ row.method_class }}">{{ row.method }}</span>
            <h3>{{ row.url }}</h3>
            <p class="status-line">Parameters: {{ row.params }}</p>
        </div>
        {% else %}
        <p class="empty">None.</p>
        {% endfor %}

        <h2>Failed Requests</h2>
        {% for row in failed %}
        <div class="endpoint failed">
            <span class="method {{ row.method_class }}">{{ row.method }}</span>
            <h3>{{ row.url }}</h3>
            <p class="status-line">Error: {{ row.error }}</p>
        </div>
        {% else %}
        <p class="empty">None.</p>
        {% endfor %}
    </div>
</body>
</html>"#
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
pub struct ExportData {
    pub scan_time: String,
    pub summary: AuditSummary,
    pub results: AuditResults,
}

#[derive(serde::Serialize)]
struct UnauthorizedRow {
    method: String,
    method_class: String,
    url: String,
    status: u16,
    request: String,
    response: String,
}

#[derive(serde::Serialize)]
struct SensitiveRow {
    method: String,
    method_class: String,
    url: String,
    params: String,
}

#[derive(serde::Serialize)]
struct FailedRow {
    method: String,
    method_class: String,
    url: String,
    error: String,
}
