//! Immutable configuration snapshot handed to the chat simulator and the
//! importer at construction time.
//!
//! Values come from the environment; a `.env` file is read for local runs
//! but skipped under test so tests stay hermetic.

use crate::error::ConfigError;
use crate::latency::Latency;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Chatbot behaviour toggles
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatbotSettings {
    pub enabled: bool,
    /// Upper bound of the simulated reply delay, in seconds
    pub response_time_secs: u64,
    pub language: String,
    pub personality: String,
}

impl Default for ChatbotSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            response_time_secs: 3,
            language: "es".to_string(),
            personality: "friendly".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImporterSettings {
    /// Base URL of the fetch-and-relay proxy serving `/api/proxy`
    pub proxy_url: String,
    pub import_delay_ms: u64,
    pub fetch_timeout_secs: u64,
}

impl Default for ImporterSettings {
    fn default() -> Self {
        Self {
            proxy_url: "http://localhost:3000".to_string(),
            import_delay_ms: 2000,
            fetch_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AssistantConfig {
    pub chatbot: ChatbotSettings,
    pub importer: ImporterSettings,
}

impl AssistantConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let chatbot = ChatbotSettings {
            enabled: parse_var(&lookup, "HOST_ASSISTANT_CHATBOT_ENABLED")?
                .unwrap_or(defaults.chatbot.enabled),
            response_time_secs: parse_var(&lookup, "HOST_ASSISTANT_RESPONSE_TIME")?
                .unwrap_or(defaults.chatbot.response_time_secs),
            language: lookup("HOST_ASSISTANT_LANGUAGE").unwrap_or(defaults.chatbot.language),
            personality: lookup("HOST_ASSISTANT_PERSONALITY")
                .unwrap_or(defaults.chatbot.personality),
        };

        let proxy_url = match lookup("HOST_ASSISTANT_PROXY_URL") {
            Some(raw) => {
                url::Url::parse(&raw).map_err(|e| {
                    ConfigError::InvalidValue("HOST_ASSISTANT_PROXY_URL".to_string(), e.to_string())
                })?;
                raw.trim_end_matches('/').to_string()
            }
            None => defaults.importer.proxy_url,
        };

        let importer = ImporterSettings {
            proxy_url,
            import_delay_ms: parse_var(&lookup, "HOST_ASSISTANT_IMPORT_DELAY_MS")?
                .unwrap_or(defaults.importer.import_delay_ms),
            fetch_timeout_secs: parse_var(&lookup, "HOST_ASSISTANT_FETCH_TIMEOUT")?
                .unwrap_or(defaults.importer.fetch_timeout_secs),
        };

        Ok(Self { chatbot, importer })
    }

    /// Delay before a bot reply: uniform between 1s and the configured maximum
    pub fn reply_latency(&self) -> Latency {
        Latency::Uniform {
            min: Duration::from_secs(1),
            max: Duration::from_secs(self.chatbot.response_time_secs.max(1)),
        }
    }

    pub fn quick_question_latency(&self) -> Latency {
        Latency::Fixed(Duration::from_millis(500))
    }

    pub fn import_latency(&self) -> Latency {
        Latency::Fixed(Duration::from_millis(self.importer.import_delay_ms))
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AssistantConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AssistantConfig::default());
        assert!(config.chatbot.enabled);
        assert_eq!(config.importer.proxy_url, "http://localhost:3000");
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = AssistantConfig::from_lookup(lookup_from(&[
            ("HOST_ASSISTANT_CHATBOT_ENABLED", "false"),
            ("HOST_ASSISTANT_RESPONSE_TIME", "5"),
            ("HOST_ASSISTANT_PROXY_URL", "https://proxy.internal/"),
            ("HOST_ASSISTANT_LANGUAGE", "en"),
            ("HOST_ASSISTANT_PERSONALITY", "formal"),
        ]))
        .unwrap();
        assert!(!config.chatbot.enabled);
        assert_eq!(config.chatbot.response_time_secs, 5);
        assert_eq!(config.importer.proxy_url, "https://proxy.internal");
        assert_eq!(config.chatbot.language, "en");
        assert_eq!(config.chatbot.personality, "formal");
    }

    #[test]
    fn test_invalid_value_is_rejected() {
        let err = AssistantConfig::from_lookup(lookup_from(&[(
            "HOST_ASSISTANT_IMPORT_DELAY_MS",
            "soon",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("HOST_ASSISTANT_IMPORT_DELAY_MS"));
    }

    #[test]
    fn test_reply_latency_bounds() {
        let config = AssistantConfig::default();
        assert_eq!(
            config.reply_latency(),
            Latency::Uniform {
                min: Duration::from_secs(1),
                max: Duration::from_secs(3),
            }
        );
    }
}
