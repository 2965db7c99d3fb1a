use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::sync::atomic::Ordering;

use specprobe::cli::{Cli, Commands};
use specprobe::error::AuditError;
use specprobe::reporter::{ConsoleReporter, HtmlExporter, JsonExporter};
use specprobe::scanner::{AuditConfig, AuditOrchestrator, OpenApiParser};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Audit {
            spec,
            url,
            host,
            proxy,
            delete,
            concurrency,
            timeout,
            output,
            json,
            verbose,
        } => {
            run_audit(
                spec, url, host, proxy, delete, concurrency, timeout, output, json, verbose,
            )
            .await?;
        }

        Commands::Parse { spec } => {
            let operations = OpenApiParser::new().parse_file(&spec)?;
            println!("{} operations declared:\n", operations.len());
            for op in &operations {
                println!("  {}", op.display_path());
            }
        }

        Commands::Report { input, output } => {
            let data = JsonExporter::load(&input)?;
            HtmlExporter::export(&data.results, &data.summary, &output)?;
            println!("{}", format!("Report written to {}", output).green());
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn run_audit(
    spec: Option<String>,
    url: Option<String>,
    host: Option<String>,
    proxy: Option<String>,
    delete: bool,
    concurrency: usize,
    timeout: u64,
    output: Option<String>,
    json: Option<String>,
    verbose: bool,
) -> Result<()> {
    let parser = OpenApiParser::new();

    let (operations, base_url) = match (&spec, &url) {
        (_, Some(spec_url)) => {
            let document = fetch_spec(spec_url).await?;
            let operations = parser.parse_value(&document)?;
            let base_url = match host {
                Some(h) => h,
                None => origin_of(spec_url)?,
            };
            (operations, base_url)
        }
        (Some(spec_path), None) => {
            let operations = parser.parse_file(spec_path)?;
            let base_url = host.ok_or_else(|| {
                AuditError::configuration("--host is required when auditing from a local spec file")
            })?;
            (operations, base_url)
        }
        (None, None) => {
            return Err(AuditError::configuration("either --spec or --url is required").into());
        }
    };

    if delete {
        println!(
            "{}",
            "DELETE operations enabled - this may destroy server data".yellow()
        );
    }

    println!(
        "{}",
        format!(
            "Auditing {} operations against {}",
            operations.len(),
            base_url
        )
        .cyan()
    );

    let config = AuditConfig {
        base_url,
        proxy,
        timeout_secs: timeout,
        concurrency,
        include_destructive: delete,
    };
    let mut orchestrator = AuditOrchestrator::new(config)?;

    let cancel = orchestrator.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.store(true, Ordering::Relaxed);
        }
    });

    let results = orchestrator.run(operations, verbose).await;
    let summary = orchestrator
        .summary()
        .cloned()
        .context("audit produced no summary")?;

    let reporter = ConsoleReporter::new();
    reporter.print_report(&results);
    reporter.print_summary(&summary);

    if let Some(path) = output {
        HtmlExporter::export(&results, &summary, &path)?;
        println!("{}", format!("HTML report written to {}", path).green());
    }

    if let Some(path) = json {
        JsonExporter::export(&results, &summary, &path)?;
        println!("{}", format!("JSON export written to {}", path).green());
    }

    Ok(())
}

async fn fetch_spec(url: &str) -> Result<serde_json::Value, AuditError> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| AuditError::spec_load(format!("cannot fetch {}: {}", url, e)))?;

    response
        .json()
        .await
        .map_err(|e| AuditError::spec_load(format!("response from {} is not JSON: {}", url, e)))
}

fn origin_of(url: &str) -> Result<String, AuditError> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| AuditError::configuration(format!("invalid spec URL '{}': {}", url, e)))?;

    let host = parsed
        .host_str()
        .ok_or_else(|| AuditError::configuration(format!("spec URL '{}' has no host", url)))?;

    Ok(match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    })
}
