pub mod analyzer;
pub mod cli;
pub mod error;
pub mod http;
pub mod models;
pub mod reporter;
pub mod scanner;
pub mod synth;

pub use analyzer::{ResponseClassifier, SensitivityClassifier};
pub use error::AuditError;
pub use models::{
    AccessOutcome, AuditResults, AuditSummary, HttpMethod, OperationSpec, ParameterSpec,
    TestRequest, TestValue,
};
pub use reporter::{ConsoleReporter, HtmlExporter, JsonExporter};
pub use scanner::{AuditConfig, AuditOrchestrator, AuditPhase, OpenApiParser, RequestBuilder};
pub use synth::ValueSynthesizer;
