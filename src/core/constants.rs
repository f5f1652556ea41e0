//! Shared constants used across the application

use std::time::Duration;

/// Reply shown in place of an answer whenever a request fails for any reason.
pub const FALLBACK_MESSAGE: &str = "Sorry, I'm having trouble connecting. Please try again.";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

pub fn default_request_timeout() -> Duration {
    Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
}

/// Starter prompts offered on the welcome screen.
pub const SUGGESTED_QUESTIONS: [&str; 4] = [
    "How do I configure a WiFi router?",
    "What's the difference between IoT protocols?",
    "Help me troubleshoot my smart home device",
    "Explain network security best practices",
];

/// Space reserved for the pending indicator + margin in the input area.
pub const INDICATOR_SPACE: u16 = 4;
