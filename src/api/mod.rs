//! Wire types and plain request helpers for the IoTrix backend.
//!
//! The chat call itself lives in [`crate::core::chat_client`] because its
//! failures feed the exchange lifecycle. The helpers here back the
//! read-only `health` and `history` subcommands.

pub mod health;
pub mod history;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Path of the chat endpoint, relative to the configured base URL.
pub const CHAT_ENDPOINT: &str = "api/chat";
/// Path of the health probe.
pub const HEALTH_ENDPOINT: &str = "api/health";
/// Path of the server-side transcript listing.
pub const HISTORY_ENDPOINT: &str = "api/history";

/// Name of the query parameter that carries the user's text.
pub const USER_MESSAGE_PARAM: &str = "user_message";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// One row of the backend's stored chat log.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub user_message: String,
    pub bot_response: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}
