mod operation;
mod outcome;
mod request;
mod value;

pub use operation::{DeclaredType, HttpMethod, OperationSpec, ParamLocation, ParameterSpec};
pub use outcome::{
    AccessOutcome, AuditResults, AuditSummary, FailedFinding, OperationOutcome, SensitiveFinding,
    SkipReason, UnauthorizedFinding,
};
pub use request::TestRequest;
pub use value::TestValue;
