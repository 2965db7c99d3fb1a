mod response;
mod sensitive;

pub use response::ResponseClassifier;
pub use sensitive::SensitivityClassifier;
