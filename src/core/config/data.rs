use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Keys accepted by `iotrix set` / `iotrix unset`.
pub const CONFIG_KEYS: [&str; 4] = ["base-url", "timeout", "theme", "suggestions"];

pub const THEME_NAMES: [&str; 2] = ["dark", "light"];

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root URL of the IoTrix backend (the chat endpoint is `{base_url}/api/chat`)
    pub base_url: Option<String>,
    /// Seconds to wait for a reply before showing the fallback message
    pub request_timeout_secs: Option<u64>,
    /// UI theme name ("dark" or "light")
    pub theme: Option<String>,
    /// Show suggested questions on the welcome screen
    pub show_suggestions: Option<bool>,
}

/// Rejections from [`Config::set_value`] and [`Config::unset_value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigKeyError {
    UnknownKey(String),
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl fmt::Display for ConfigKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigKeyError::UnknownKey(key) => write!(
                f,
                "Unknown config key: {key} (expected one of: {})",
                CONFIG_KEYS.join(", ")
            ),
            ConfigKeyError::InvalidValue {
                key,
                value,
                expected,
            } => write!(f, "Invalid value for {key}: '{value}' (expected {expected})"),
        }
    }
}

impl std::error::Error for ConfigKeyError {}

pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Config {
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn theme_name(&self) -> &str {
        self.theme.as_deref().unwrap_or("dark")
    }

    pub fn suggestions_enabled(&self) -> bool {
        self.show_suggestions.unwrap_or(true)
    }

    /// Apply `iotrix set <key> <value>` and return a confirmation line.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<String, ConfigKeyError> {
        let value = value.trim();
        match key {
            "base-url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(ConfigKeyError::InvalidValue {
                        key: "base-url",
                        value: value.to_string(),
                        expected: "an http:// or https:// URL",
                    });
                }
                self.base_url = Some(value.to_string());
                Ok(format!("Set base-url to: {value}"))
            }
            "timeout" => {
                let secs = value
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| ConfigKeyError::InvalidValue {
                        key: "timeout",
                        value: value.to_string(),
                        expected: "a positive number of seconds",
                    })?;
                self.request_timeout_secs = Some(secs);
                Ok(format!("Set timeout to: {secs}s"))
            }
            "theme" => {
                let name = value.to_ascii_lowercase();
                if !THEME_NAMES.contains(&name.as_str()) {
                    return Err(ConfigKeyError::InvalidValue {
                        key: "theme",
                        value: value.to_string(),
                        expected: "dark or light",
                    });
                }
                let message = format!("Set theme to: {name}");
                self.theme = Some(name);
                Ok(message)
            }
            "suggestions" => {
                let enabled = match value.to_ascii_lowercase().as_str() {
                    "on" | "true" | "yes" => true,
                    "off" | "false" | "no" => false,
                    _ => {
                        return Err(ConfigKeyError::InvalidValue {
                            key: "suggestions",
                            value: value.to_string(),
                            expected: "on or off",
                        })
                    }
                };
                self.show_suggestions = Some(enabled);
                Ok(format!(
                    "Set suggestions to: {}",
                    if enabled { "on" } else { "off" }
                ))
            }
            other => Err(ConfigKeyError::UnknownKey(other.to_string())),
        }
    }

    /// Apply `iotrix unset <key>` and return a confirmation line.
    pub fn unset_value(&mut self, key: &str) -> Result<String, ConfigKeyError> {
        match key {
            "base-url" => self.base_url = None,
            "timeout" => self.request_timeout_secs = None,
            "theme" => self.theme = None,
            "suggestions" => self.show_suggestions = None,
            other => return Err(ConfigKeyError::UnknownKey(other.to_string())),
        }
        Ok(format!("Unset {key}"))
    }
}
