use chrono::{Local, Utc};

use crate::models::{DeclaredType, TestValue};

type Generator = fn() -> TestValue;

/// Synthesizes a plausible test value for a parameter from its name and
/// declared type. Total: every input yields a value.
///
/// The hint table is scanned in order and the first keyword that is a
/// substring of the lowercased name wins. The relative order is load
/// bearing: `id` sits ahead of `ids`, `name` ahead of `username`, so the
/// short generic keywords decide whenever they overlap. Reordering the
/// table changes which value a given name receives.
///
/// Date and time generators read the clock at call time; two calls within
/// the same second agree, across seconds they may not.
pub struct ValueSynthesizer {
    hints: Vec<(&'static str, Generator)>,
}

impl ValueSynthesizer {
    pub fn new() -> Self {
        let hints: Vec<(&'static str, Generator)> = vec![
            ("id", || TestValue::Int(123)),
            ("ids", || {
                TestValue::List(vec!["1".to_string(), "2".to_string(), "3".to_string()])
            }),
            ("name", || TestValue::str("test_name")),
            ("username", || TestValue::str("testuser")),
            ("email", || TestValue::str("test@example.com")),
            ("path", || TestValue::str("/example/path")),
            ("category", || TestValue::str("default")),
            ("tag", || TestValue::str("example_tag")),
            ("description", || TestValue::str("test description")),
            ("phone", || TestValue::str("123-456-7890")),
            ("address", || TestValue::str("123 Main St")),
            ("city", || TestValue::str("Anytown")),
            ("country", || TestValue::str("USA")),
            ("code", || TestValue::str("ABC123XYZ")),
            ("status", || TestValue::str("active")),
            ("type", || TestValue::str("example_type")),
            ("value", || TestValue::str("test_value")),
            ("key", || TestValue::str("test_key")),
            ("date", || {
                TestValue::Str(Local::now().format("%Y-%m-%d").to_string())
            }),
            ("time", || {
                TestValue::Str(Local::now().format("%H:%M:%S").to_string())
            }),
            ("datetime", || {
                TestValue::Str(Local::now().format("%Y-%m-%d %H:%M:%S").to_string())
            }),
            ("timestamp", || TestValue::Int(Utc::now().timestamp())),
            ("flag", || TestValue::Bool(true)),
            ("count", || TestValue::Int(10)),
            ("page", || TestValue::Int(1)),
            ("size", || TestValue::Int(20)),
            ("sort", || TestValue::str("name")),
            ("order", || TestValue::str("asc")),
            ("filter", || TestValue::str("example_filter")),
            ("search", || TestValue::str("example_search")),
            ("keyword", || TestValue::str("example_keyword")),
            ("version", || TestValue::str("v1")),
            ("group", || TestValue::str("example_group")),
            ("role", || TestValue::str("user")),
            ("permission", || TestValue::str("read")),
            ("setting", || TestValue::str("default_setting")),
            ("config", || TestValue::map("key", "value")),
            ("data", || TestValue::map("item", "value")),
            ("info", || TestValue::str("example info")),
            ("message", || TestValue::str("test message")),
            ("content", || TestValue::str("example content")),
            ("text", || TestValue::str("example text")),
            ("title", || TestValue::str("Test Title")),
            ("subject", || TestValue::str("Test Subject")),
            ("body", || TestValue::str("example body")),
            ("comment", || TestValue::str("test comment")),
            ("note", || TestValue::str("example note")),
            ("reason", || TestValue::str("test reason")),
            // Sensitive names still need plausible values so the request
            // exercises the endpoint.
            ("token", || TestValue::str("test_token")),
            ("password", || TestValue::str("P@$$wOrd")),
            ("secret", || TestValue::str("secret_value")),
            ("api_key", || TestValue::str("api_key_value")),
            ("apikey", || TestValue::str("apikey_value")),
            ("access_token", || TestValue::str("access_token_value")),
            ("url", || TestValue::str("http://example.com")),
            ("link", || TestValue::str("http://example.com/link")),
            ("redirect", || TestValue::str("http://example.com/redirect")),
            ("path_param", || TestValue::str("/example/path_param")),
            ("file", || TestValue::str("example.txt")),
            ("domain", || TestValue::str("example.com")),
            ("callback", || TestValue::str("http://example.com/callback")),
            ("forward", || TestValue::str("http://example.com/forward")),
            ("from_param", || TestValue::str("example_from")),
            ("location", || TestValue::str("example_location")),
            ("uri", || TestValue::str("/example/uri")),
        ];

        Self { hints }
    }

    pub fn synthesize(&self, name: &str, declared_type: DeclaredType) -> TestValue {
        let normalized = name.to_lowercase();

        for (keyword, generator) in &self.hints {
            if normalized.contains(keyword) {
                return generator();
            }
        }

        Self::type_default(declared_type)
    }

    fn type_default(declared_type: DeclaredType) -> TestValue {
        match declared_type {
            DeclaredType::String => TestValue::str("test"),
            DeclaredType::Integer => TestValue::Int(1),
            DeclaredType::Boolean => TestValue::Bool(true),
            DeclaredType::Number => TestValue::Float(1.0),
            DeclaredType::Array => {
                TestValue::List(vec!["item1".to_string(), "item2".to_string()])
            }
            DeclaredType::Object => TestValue::map("key", "value"),
            DeclaredType::Unknown => TestValue::str("default_value"),
        }
    }
}

impl Default for ValueSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_names_yield_addresses() {
        let synth = ValueSynthesizer::new();
        for name in ["email", "user_email", "EMAIL"] {
            match synth.synthesize(name, DeclaredType::String) {
                TestValue::Str(s) => assert!(s.contains('@'), "{} -> {}", name, s),
                other => panic!("expected string for {}, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_count_yields_positive_integer() {
        let synth = ValueSynthesizer::new();
        match synth.synthesize("item_count", DeclaredType::Integer) {
            TestValue::Int(n) => assert!(n > 0),
            other => panic!("expected integer, got {:?}", other),
        }
    }

    #[test]
    fn test_first_match_wins_over_later_entries() {
        let synth = ValueSynthesizer::new();
        // "ids" contains "id", which sits earlier in the table.
        assert_eq!(synth.synthesize("ids", DeclaredType::Array), TestValue::Int(123));
        // "username" contains "name", which sits earlier than "username".
        assert_eq!(
            synth.synthesize("username", DeclaredType::String),
            TestValue::str("test_name")
        );
    }

    #[test]
    fn test_date_shape() {
        let synth = ValueSynthesizer::new();
        match synth.synthesize("start_date", DeclaredType::String) {
            TestValue::Str(s) => {
                let parts: Vec<&str> = s.split('-').collect();
                assert_eq!(parts.len(), 3);
                assert_eq!(parts[0].len(), 4);
            }
            other => panic!("expected date string, got {:?}", other),
        }
    }

    #[test]
    fn test_sensitive_names_still_get_values() {
        let synth = ValueSynthesizer::new();
        assert_eq!(
            synth.synthesize("callback", DeclaredType::String),
            TestValue::str("http://example.com/callback")
        );
        assert_eq!(
            synth.synthesize("password", DeclaredType::String),
            TestValue::str("P@$$wOrd")
        );
    }

    #[test]
    fn test_type_defaults_when_no_keyword_matches() {
        let synth = ValueSynthesizer::new();
        assert_eq!(synth.synthesize("xyz", DeclaredType::String), TestValue::str("test"));
        assert_eq!(synth.synthesize("xyz", DeclaredType::Integer), TestValue::Int(1));
        assert_eq!(synth.synthesize("xyz", DeclaredType::Boolean), TestValue::Bool(true));
        assert_eq!(synth.synthesize("xyz", DeclaredType::Number), TestValue::Float(1.0));
        assert_eq!(
            synth.synthesize("xyz", DeclaredType::Array),
            TestValue::List(vec!["item1".to_string(), "item2".to_string()])
        );
        assert_eq!(
            synth.synthesize("xyz", DeclaredType::Object),
            TestValue::map("key", "value")
        );
        assert_eq!(
            synth.synthesize("xyz", DeclaredType::Unknown),
            TestValue::str("default_value")
        );
    }

    #[test]
    fn test_defaults_stable_across_calls() {
        let synth = ValueSynthesizer::new();
        let first = synth.synthesize("zebra", DeclaredType::String);
        let second = synth.synthesize("zebra", DeclaredType::String);
        assert_eq!(first, second);
    }
}
