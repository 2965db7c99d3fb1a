use serde_json::Value;

use crate::models::AccessOutcome;

/// Classifies one observed HTTP response. Any success or redirect status
/// means the server served a request that carried no authentication
/// material; everything else is a benign rejection. Transport failures
/// never reach this point, the orchestrator converts them to Failed.
pub struct ResponseClassifier;

impl ResponseClassifier {
    pub fn classify(status: u16, body: &[u8], request: Value, duration_ms: u64) -> AccessOutcome {
        if (200..400).contains(&status) {
            AccessOutcome::Unauthorized {
                status,
                request,
                response: Self::decode_body(body),
                duration_ms,
            }
        } else {
            AccessOutcome::Rejected { status }
        }
    }

    /// Best-effort body decode: structured JSON when it parses, raw text
    /// otherwise. Never errors.
    fn decode_body(body: &[u8]) -> Value {
        serde_json::from_slice(body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
    }
}
