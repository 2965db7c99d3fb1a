use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;

use crate::analyzer::{ResponseClassifier, SensitivityClassifier};
use crate::error::AuditError;
use crate::http::HttpClient;
use crate::models::{
    AccessOutcome, AuditResults, AuditSummary, OperationOutcome, OperationSpec, SkipReason,
};
use crate::scanner::RequestBuilder;

#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub base_url: String,
    pub proxy: Option<String>,
    pub timeout_secs: u64,
    pub concurrency: usize,
    pub include_destructive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditPhase {
    Idle,
    Running,
    Reporting,
    Done,
}

/// Drives one audit run: enumerates operations in specification order,
/// applies the destructive-method gate, fans requests out over a bounded
/// pool and folds the outcomes into the three result buckets. A transport
/// failure on one operation never stops the run.
pub struct AuditOrchestrator {
    client: HttpClient,
    builder: RequestBuilder,
    classifier: SensitivityClassifier,
    semaphore: Arc<Semaphore>,
    include_destructive: bool,
    cancelled: Arc<AtomicBool>,
    phase: AuditPhase,
    last_run: Option<AuditSummary>,
}

impl AuditOrchestrator {
    pub fn new(config: AuditConfig) -> Result<Self, AuditError> {
        if config.base_url.trim().is_empty() {
            return Err(AuditError::configuration("base host is required"));
        }

        let client = HttpClient::new(config.base_url, config.timeout_secs, config.proxy.as_deref())?;

        Ok(Self {
            client,
            builder: RequestBuilder::new(),
            classifier: SensitivityClassifier::new(),
            semaphore: Arc::new(Semaphore::new(config.concurrency.max(1))),
            include_destructive: config.include_destructive,
            cancelled: Arc::new(AtomicBool::new(false)),
            phase: AuditPhase::Idle,
            last_run: None,
        })
    }

    pub fn phase(&self) -> AuditPhase {
        self.phase
    }

    /// Flip to stop dispatching new requests; in-flight ones finish or
    /// time out on their own.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    pub fn summary(&self) -> Option<&AuditSummary> {
        self.last_run.as_ref()
    }

    pub async fn run(&mut self, operations: Vec<OperationSpec>, verbose: bool) -> AuditResults {
        self.phase = AuditPhase::Running;
        let start = Instant::now();
        let total = operations.len();
        let pb = Self::create_progress_bar(total, verbose);

        let futures: Vec<_> = operations
            .iter()
            .map(|op| self.audit_operation(op, &pb))
            .collect();

        let outcomes = join_all(futures).await;

        pb.finish_with_message("Audit complete");

        self.phase = AuditPhase::Reporting;
        let results = AuditResults::from_outcomes(outcomes);
        self.last_run = Some(AuditSummary::from_results(
            &results,
            total,
            start.elapsed().as_millis() as u64,
        ));
        self.phase = AuditPhase::Done;

        results
    }

    async fn audit_operation(&self, operation: &OperationSpec, pb: &ProgressBar) -> OperationOutcome {
        let _permit = self.semaphore.acquire().await.expect("Semaphore closed");
        let url = self.client.endpoint_url(&operation.path);

        pb.set_message(format!("{} {}", operation.method, operation.path));

        if self.cancelled.load(Ordering::Relaxed) {
            pb.inc(1);
            return OperationOutcome::skipped(
                operation.method,
                operation.path.clone(),
                url,
                SkipReason::Cancelled,
            );
        }

        // The destructive gate comes before everything else: a skipped
        // DELETE leaves no trace in any bucket.
        if operation.method.is_destructive() && !self.include_destructive {
            pb.println(format!(
                "Skipping {} {}: {}",
                operation.method,
                operation.path,
                SkipReason::DestructiveDisabled
            ));
            pb.inc(1);
            return OperationOutcome::skipped(
                operation.method,
                operation.path.clone(),
                url,
                SkipReason::DestructiveDisabled,
            );
        }

        let sensitive = self.classifier.classify(&operation.parameters);

        let access = if !operation.method.is_dispatchable() {
            pb.println(format!(
                "Skipping {} {}: {}",
                operation.method,
                operation.path,
                SkipReason::UnsupportedMethod
            ));
            AccessOutcome::Skipped {
                reason: SkipReason::UnsupportedMethod,
            }
        } else {
            let request = self.builder.build(operation);
            let payload = request.body_json();

            match self.client.dispatch(&request).await {
                Ok(raw) => ResponseClassifier::classify(raw.status, &raw.body, payload, raw.duration_ms),
                Err(e) => AccessOutcome::Failed {
                    error: e.to_string(),
                },
            }
        };

        pb.inc(1);

        OperationOutcome {
            method: operation.method,
            path: operation.path.clone(),
            url,
            sensitive,
            access,
        }
    }

    fn create_progress_bar(total: usize, verbose: bool) -> ProgressBar {
        let pb = ProgressBar::new(total as u64);

        if verbose {
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .expect("Invalid progress bar template")
                    .progress_chars("#>-"),
            );
        } else {
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len}")
                    .expect("Invalid progress bar template")
                    .progress_chars("#>-"),
            );
        }

        pb
    }
}
