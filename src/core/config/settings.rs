//! Effective runtime settings: command-line flags, then environment, then
//! the config file, then built-in defaults.

use std::time::Duration;

use crate::core::config::data::Config;

pub const BASE_URL_ENV: &str = "IOTRIX_BASE_URL";

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub request_timeout: Duration,
    pub theme: String,
    pub show_suggestions: bool,
}

impl Settings {
    pub fn resolve(config: &Config, overrides: &SettingsOverrides) -> Self {
        Self::resolve_with_env(config, overrides, std::env::var(BASE_URL_ENV).ok())
    }

    pub fn resolve_with_env(
        config: &Config,
        overrides: &SettingsOverrides,
        env_base_url: Option<String>,
    ) -> Self {
        let base_url = non_blank(overrides.base_url.clone())
            .or_else(|| non_blank(env_base_url))
            .unwrap_or_else(|| config.base_url().to_string());

        let request_timeout = overrides
            .timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or_else(|| config.request_timeout());

        Self {
            base_url,
            request_timeout,
            theme: config.theme_name().to_string(),
            show_suggestions: config.suggestions_enabled(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
