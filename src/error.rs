use thiserror::Error;

/// The two fatal error categories. Both abort before any operation is
/// attempted; per-operation transport failures are recovered into Failed
/// entries instead and never surface here.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("failed to load API specification: {reason}")]
    SpecLoad { reason: String },

    #[error("configuration error: {reason}")]
    Configuration { reason: String },
}

impl AuditError {
    pub fn spec_load(reason: impl Into<String>) -> Self {
        AuditError::SpecLoad {
            reason: reason.into(),
        }
    }

    pub fn configuration(reason: impl Into<String>) -> Self {
        AuditError::Configuration {
            reason: reason.into(),
        }
    }
}
