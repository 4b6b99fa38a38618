//! Immutable snapshot of the configuration supplied by the host document.

use std::time::Duration;

use serde_json::{Map, Value};
use thiserror::Error;

pub const API_BASE_URL_KEY: &str = "apiBaseUrl";
pub const TOAST_LIFE_KEY: &str = "toastLife";
pub const TITLE_KEY: &str = "title";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TOAST_LIFE: Duration = Duration::from_millis(3000);
pub const DEFAULT_TITLE: &str = "Chatbot";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("runtime configuration must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("runtime configuration is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Opaque key-value bundle. Read-only once constructed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuntimeConfig {
    values: Map<String, Value>,
}

impl RuntimeConfig {
    /// Takes a snapshot of `value`. `null` counts as "not supplied".
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            Value::Null => Ok(Self::default()),
            Value::Bool(_) => Err(ConfigError::NotAnObject("a boolean")),
            Value::Number(_) => Err(ConfigError::NotAnObject("a number")),
            Value::String(_) => Err(ConfigError::NotAnObject("a string")),
            Value::Array(_) => Err(ConfigError::NotAnObject("an array")),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Base URL of the chatbot API, without a trailing slash.
    pub fn api_base_url(&self) -> &str {
        self.get_str(API_BASE_URL_KEY)
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn app_title(&self) -> &str {
        self.get_str(TITLE_KEY).unwrap_or(DEFAULT_TITLE)
    }

    /// How long a toast stays visible when the caller gives no life of its own.
    pub fn toast_life(&self) -> Duration {
        self.get(TOAST_LIFE_KEY)
            .and_then(Value::as_u64)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TOAST_LIFE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_when_nothing_is_supplied() {
        let config = RuntimeConfig::from_value(Value::Null).unwrap();
        assert!(config.is_empty());
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(config.toast_life(), DEFAULT_TOAST_LIFE);
        assert_eq!(config.app_title(), DEFAULT_TITLE);
    }

    #[test]
    fn reads_known_keys() {
        let config = RuntimeConfig::from_value(json!({
            "apiBaseUrl": "https://chat.example.org/api/",
            "toastLife": 5000,
            "title": "AI Act assistant",
        }))
        .unwrap();
        assert_eq!(config.app_title(), "AI Act assistant");
        assert_eq!(config.api_base_url(), "https://chat.example.org/api");
        assert_eq!(config.toast_life(), Duration::from_secs(5));
    }

    #[test]
    fn unknown_keys_are_kept_verbatim() {
        let config = RuntimeConfig::from_json_str(r#"{"featureFlags": {"sources": true}, "title": "Chatbot"}"#).unwrap();
        assert_eq!(config.get("featureFlags"), Some(&json!({"sources": true})));
        assert_eq!(config.get_str("title"), Some("Chatbot"));
    }

    #[test]
    fn wrongly_typed_known_keys_fall_back_to_defaults() {
        let config = RuntimeConfig::from_value(json!({"apiBaseUrl": 42, "toastLife": "long"})).unwrap();
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(config.toast_life(), DEFAULT_TOAST_LIFE);

        let config = RuntimeConfig::from_value(json!({"apiBaseUrl": "/"})).unwrap();
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn rejects_non_objects() {
        assert!(matches!(
            RuntimeConfig::from_value(json!([1, 2])),
            Err(ConfigError::NotAnObject("an array"))
        ));
        assert!(matches!(RuntimeConfig::from_json_str("{"), Err(ConfigError::Json(_))));
    }
}
