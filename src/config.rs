use std::path::PathBuf;

use llmapi::{GenerationConfig, LLMClient};

use crate::constants::{
    API_KEY_ENV, BIND_ADDR_ENV, DEFAULT_BIND_ADDR, DEFAULT_GEMINI_ENDPOINT, DEFAULT_REPORT_MODEL,
    DEFAULT_TEMPERATURE, DEFAULT_TOP_K, ENDPOINT_ENV, OUTPUT_PATH_ENV, REPORT_FILE_NAME,
};

/// Process-wide settings, read once at start-up.
///
/// A missing credential is not a start-up error: the Gemini call fails when
/// a report is actually requested.
#[derive(Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub generation: GenerationConfig,
    pub bind_addr: String,
    pub output_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            model: DEFAULT_REPORT_MODEL.to_string(),
            generation: GenerationConfig {
                temperature: DEFAULT_TEMPERATURE,
                top_k: DEFAULT_TOP_K,
            },
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            output_path: PathBuf::from(REPORT_FILE_NAME),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            api_key: read(API_KEY_ENV),
            endpoint: read(ENDPOINT_ENV).unwrap_or(defaults.endpoint),
            bind_addr: read(BIND_ADDR_ENV).unwrap_or(defaults.bind_addr),
            output_path: read(OUTPUT_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            ..defaults
        }
    }

    pub fn llm_client(&self) -> LLMClient {
        LLMClient::new(
            self.api_key.clone().unwrap_or_default(),
            self.endpoint.clone(),
            self.model.clone(),
            self.generation,
        )
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("generation", &self.generation)
            .field("bind_addr", &self.bind_addr)
            .field("output_path", &self.output_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_fixed_model_and_sampling() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config.model, "gemini-2.5-flash-lite");
        assert_eq!(config.generation.temperature, 0.7);
        assert_eq!(config.generation.top_k, 0);
        assert_eq!(config.output_path, PathBuf::from("structural_defect_report.txt"));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn blank_values_are_treated_as_unset() {
        let config = AppConfig::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "   "),
            ("REPORT_BIND_ADDR", ""),
        ]));
        assert!(config.api_key.is_none());
        assert_eq!(config.bind_addr, "127.0.0.1:8501");
    }

    #[test]
    fn overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "abc"),
            ("GEMINI_ENDPOINT", "http://localhost:9000/v1beta/models"),
            ("REPORT_OUTPUT_PATH", "/tmp/out.txt"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.endpoint, "http://localhost:9000/v1beta/models");
        assert_eq!(config.output_path, PathBuf::from("/tmp/out.txt"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = AppConfig::from_lookup(lookup(&[("GOOGLE_API_KEY", "very-secret")]));
        assert!(!format!("{config:?}").contains("very-secret"));
    }
}
