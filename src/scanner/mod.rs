mod builder;
mod engine;
mod openapi;

pub use builder::RequestBuilder;
pub use engine::{AuditConfig, AuditOrchestrator, AuditPhase};
pub use openapi::OpenApiParser;
