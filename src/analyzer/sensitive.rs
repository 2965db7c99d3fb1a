use regex::Regex;
use std::collections::BTreeSet;

use crate::models::ParameterSpec;

const SENSITIVE_KEYWORDS: &[&str] = &[
    "token",
    "password",
    "secret",
    "api_key",
    "apikey",
    "access_token",
    "url",
    "link",
    "redirect",
    "path",
    "file",
    "domain",
    "callback",
    "forward",
    "from",
    "location",
    "uri",
];

/// Flags parameters whose names suggest they carry credentials, secrets,
/// or redirect/file-path data. Pure over the parameter names: the input
/// order never affects membership. Runs before any network call; this is
/// a property of the specification, not of the response.
pub struct SensitivityClassifier {
    patterns: Vec<Regex>,
}

impl SensitivityClassifier {
    pub fn new() -> Self {
        let patterns = SENSITIVE_KEYWORDS
            .iter()
            .map(|keyword| Regex::new(&format!("(?i){}", regex::escape(keyword))).unwrap())
            .collect();

        Self { patterns }
    }

    pub fn classify(&self, parameters: &[ParameterSpec]) -> BTreeSet<String> {
        parameters
            .iter()
            .filter(|param| self.is_sensitive(&param.name))
            .map(|param| param.name.clone())
            .collect()
    }

    pub fn is_sensitive(&self, name: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(name))
    }
}

impl Default for SensitivityClassifier {
    fn default() -> Self {
        Self::new()
    }
}
