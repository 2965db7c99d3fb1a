use colored::Colorize;
use tabled::{Table, Tabled, settings::{Style, Modify, object::Rows, Alignment}};

use crate::models::{AuditResults, AuditSummary};

pub struct ConsoleReporter;

#[derive(Tabled)]
struct UnauthorizedRow {
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Status")]
    status: u16,
}

#[derive(Tabled)]
struct SensitiveRow {
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Parameters")]
    params: String,
}

#[derive(Tabled)]
struct FailedRow {
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Error")]
    error: String,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn print_report(&self, results: &AuditResults) {
        if !results.unauthorized.is_empty() {
            println!("\n{}", "Unauthorized Endpoints".red().bold().underline());

            let rows: Vec<UnauthorizedRow> = results
                .unauthorized
                .iter()
                .map(|f| UnauthorizedRow {
                    method: f.method.to_string(),
                    url: f.url.clone(),
                    status: f.status,
                })
                .collect();

            println!("{}", Self::render(rows));
        }

        if !results.sensitive.is_empty() {
            println!("\n{}", "Sensitive Parameters".yellow().bold().underline());

            let rows: Vec<SensitiveRow> = results
                .sensitive
                .iter()
                .map(|f| SensitiveRow {
                    method: f.method.to_string(),
                    url: f.url.clone(),
                    params: f.params.iter().cloned().collect::<Vec<_>>().join(", "),
                })
                .collect();

            println!("{}", Self::render(rows));
        }

        if !results.failed.is_empty() {
            println!("\n{}", "Failed Requests".bold().underline());

            let rows: Vec<FailedRow> = results
                .failed
                .iter()
                .map(|f| FailedRow {
                    method: f.method.to_string(),
                    url: f.url.clone(),
                    error: f.error.clone(),
                })
                .collect();

            println!("{}", Self::render(rows));
        }

        if results.is_clean() {
            println!("\n{}", "No findings.".green());
        }
    }

    pub fn print_summary(&self, summary: &AuditSummary) {
        println!("\n{}", "Summary".bold().underline());
        println!(
            "{} operations audited in {:.2}s",
            summary.total_operations,
            summary.duration_ms as f64 / 1000.0
        );

        if summary.unauthorized_count > 0 {
            println!(
                "  {}: {}",
                "Unauthorized".red().bold(),
                summary.unauthorized_count
            );
        }
        if summary.sensitive_count > 0 {
            println!("  {}: {}", "Sensitive".yellow(), summary.sensitive_count);
        }
        if summary.failed_count > 0 {
            println!("  {}: {}", "Failed".magenta(), summary.failed_count);
        }
        println!("  {}: {}", "Rejected".green(), summary.rejected_count);
        if summary.skipped_count > 0 {
            println!("  {}: {}", "Skipped".cyan(), summary.skipped_count);
        }
        println!();
    }

    fn render<R: Tabled>(rows: Vec<R>) -> String {
        Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .to_string()
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
