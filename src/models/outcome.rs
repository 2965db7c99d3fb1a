use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

use super::HttpMethod;

/// Why an operation was skipped without a request being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    DestructiveDisabled,
    UnsupportedMethod,
    Cancelled,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::DestructiveDisabled => "destructive operations disabled",
            SkipReason::UnsupportedMethod => "unsupported method",
            SkipReason::Cancelled => "run cancelled",
        };
        write!(f, "{}", s)
    }
}

/// Access classification for one dispatched (or deliberately not
/// dispatched) operation. Rejected and Skipped never reach a report
/// bucket; they exist so the no-entry outcomes are explicit values
/// rather than implicit absences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AccessOutcome {
    Unauthorized {
        status: u16,
        request: Value,
        response: Value,
        duration_ms: u64,
    },
    Rejected {
        status: u16,
    },
    Failed {
        error: String,
    },
    Skipped {
        reason: SkipReason,
    },
}

/// Everything observed for one operation, in specification order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationOutcome {
    pub method: HttpMethod,
    pub path: String,
    pub url: String,
    pub sensitive: BTreeSet<String>,
    pub access: AccessOutcome,
}

impl OperationOutcome {
    pub fn skipped(method: HttpMethod, path: String, url: String, reason: SkipReason) -> Self {
        Self {
            method,
            path,
            url,
            sensitive: BTreeSet::new(),
            access: AccessOutcome::Skipped { reason },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnauthorizedFinding {
    pub method: HttpMethod,
    pub url: String,
    pub status: u16,
    pub request: Value,
    pub response: Value,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitiveFinding {
    pub method: HttpMethod,
    pub url: String,
    pub params: BTreeSet<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedFinding {
    pub method: HttpMethod,
    pub url: String,
    pub error: String,
}

/// The three report buckets, appended in specification order, plus
/// counters for the outcomes that never produce an entry. Owned by the
/// orchestrator for the lifetime of one run, read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditResults {
    pub unauthorized: Vec<UnauthorizedFinding>,
    pub sensitive: Vec<SensitiveFinding>,
    pub failed: Vec<FailedFinding>,
    pub rejected: usize,
    pub skipped: usize,
}

impl AuditResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one outcome into the buckets. A non-empty sensitive set
    /// yields exactly one sensitive entry; the access variant yields at
    /// most one unauthorized or failed entry, never both.
    pub fn record(&mut self, outcome: OperationOutcome) {
        if !outcome.sensitive.is_empty() {
            self.sensitive.push(SensitiveFinding {
                method: outcome.method,
                url: outcome.url.clone(),
                params: outcome.sensitive,
            });
        }

        match outcome.access {
            AccessOutcome::Unauthorized {
                status,
                request,
                response,
                duration_ms,
            } => self.unauthorized.push(UnauthorizedFinding {
                method: outcome.method,
                url: outcome.url,
                status,
                request,
                response,
                duration_ms,
            }),
            AccessOutcome::Failed { error } => self.failed.push(FailedFinding {
                method: outcome.method,
                url: outcome.url,
                error,
            }),
            AccessOutcome::Rejected { .. } => self.rejected += 1,
            AccessOutcome::Skipped { .. } => self.skipped += 1,
        }
    }

    pub fn from_outcomes(outcomes: Vec<OperationOutcome>) -> Self {
        let mut results = Self::new();
        for outcome in outcomes {
            results.record(outcome);
        }
        results
    }

    pub fn is_clean(&self) -> bool {
        self.unauthorized.is_empty() && self.sensitive.is_empty() && self.failed.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSummary {
    pub total_operations: usize,
    pub unauthorized_count: usize,
    pub sensitive_count: usize,
    pub failed_count: usize,
    pub rejected_count: usize,
    pub skipped_count: usize,
    pub duration_ms: u64,
}

impl AuditSummary {
    pub fn from_results(results: &AuditResults, total_operations: usize, duration_ms: u64) -> Self {
        Self {
            total_operations,
            unauthorized_count: results.unauthorized.len(),
            sensitive_count: results.sensitive.len(),
            failed_count: results.failed.len(),
            rejected_count: results.rejected,
            skipped_count: results.skipped,
            duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(access: AccessOutcome, sensitive: &[&str]) -> OperationOutcome {
        OperationOutcome {
            method: HttpMethod::Get,
            path: "/users".to_string(),
            url: "http://host/users".to_string(),
            sensitive: sensitive.iter().map(|s| s.to_string()).collect(),
            access,
        }
    }

    #[test]
    fn test_unauthorized_and_sensitive_are_independent() {
        let mut results = AuditResults::new();
        results.record(outcome(
            AccessOutcome::Unauthorized {
                status: 200,
                request: serde_json::json!({}),
                response: serde_json::json!({"ok": true}),
                duration_ms: 5,
            },
            &["password"],
        ));

        assert_eq!(results.unauthorized.len(), 1);
        assert_eq!(results.sensitive.len(), 1);
        assert_eq!(results.failed.len(), 0);
    }

    #[test]
    fn test_failed_excludes_unauthorized() {
        let mut results = AuditResults::new();
        results.record(outcome(
            AccessOutcome::Failed {
                error: "connection refused".to_string(),
            },
            &[],
        ));

        assert_eq!(results.failed.len(), 1);
        assert_eq!(results.unauthorized.len(), 0);
        assert_eq!(results.sensitive.len(), 0);
    }

    #[test]
    fn test_rejected_and_skipped_produce_no_entries() {
        let mut results = AuditResults::new();
        results.record(outcome(AccessOutcome::Rejected { status: 401 }, &[]));
        results.record(outcome(
            AccessOutcome::Skipped {
                reason: SkipReason::DestructiveDisabled,
            },
            &[],
        ));

        assert!(results.is_clean());
        assert_eq!(results.rejected, 1);
        assert_eq!(results.skipped, 1);
    }

    #[test]
    fn test_sensitive_recorded_for_unsupported_method() {
        let mut results = AuditResults::new();
        results.record(outcome(
            AccessOutcome::Skipped {
                reason: SkipReason::UnsupportedMethod,
            },
            &["redirect"],
        ));

        assert_eq!(results.sensitive.len(), 1);
        assert_eq!(results.skipped, 1);
    }
}
