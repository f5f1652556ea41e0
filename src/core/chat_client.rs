use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{CHAT_ENDPOINT, USER_MESSAGE_PARAM};
use crate::utils::url::construct_api_url;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Upper bound on how much of an error body is kept for diagnostics.
const ERROR_BODY_LIMIT: usize = 512;

/// Every way a chat request can fail.
///
/// The exchange controller collapses all of these into one fallback reply;
/// the distinction only feeds logs and [`ChatError::is_transient`].
#[derive(Debug)]
pub enum ChatError {
    /// The configured base URL does not form a valid request URL.
    InvalidUrl(String),
    /// The request never produced a response (DNS, refused, reset, TLS).
    Connect(reqwest::Error),
    /// No settlement within the request timeout.
    Timeout(Duration),
    /// The server answered with a non-2xx status.
    Status { code: u16, body: String },
    /// The response body could not be read as text.
    Body(reqwest::Error),
    /// A 2xx response with nothing in it.
    EmptyReply,
    /// The request task ended without reporting back.
    Aborted,
}

impl ChatError {
    /// Whether a later attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ChatError::Connect(_) | ChatError::Timeout(_) | ChatError::Aborted => true,
            ChatError::Status { code, .. } => *code >= 500 || *code == 429,
            ChatError::InvalidUrl(_) | ChatError::Body(_) | ChatError::EmptyReply => false,
        }
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::InvalidUrl(url) => write!(f, "invalid chat endpoint URL: {url}"),
            ChatError::Connect(source) => write!(f, "could not reach chat endpoint: {source}"),
            ChatError::Timeout(after) => {
                write!(f, "chat request timed out after {}s", after.as_secs_f32())
            }
            ChatError::Status { code, body } if body.is_empty() => {
                write!(f, "chat endpoint returned HTTP {code}")
            }
            ChatError::Status { code, body } => {
                write!(f, "chat endpoint returned HTTP {code}: {body}")
            }
            ChatError::Body(source) => write!(f, "could not read chat response: {source}"),
            ChatError::EmptyReply => write!(f, "chat endpoint returned an empty reply"),
            ChatError::Aborted => write!(f, "chat request was abandoned before settling"),
        }
    }
}

impl std::error::Error for ChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChatError::Connect(source) | ChatError::Body(source) => Some(source),
            _ => None,
        }
    }
}

/// The network collaborator behind the exchange controller.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Deliver `user_message` and return the raw reply text.
    async fn send_message(&self, user_message: &str) -> Result<String, ChatError>;
}

/// `POST {base}/api/chat?user_message=...` over HTTP.
#[derive(Clone)]
pub struct HttpChatClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn chat_url(&self) -> Result<reqwest::Url, ChatError> {
        let raw = construct_api_url(&self.base_url, CHAT_ENDPOINT);
        reqwest::Url::parse(&raw).map_err(|_| ChatError::InvalidUrl(raw))
    }
}

#[async_trait]
impl ChatTransport for HttpChatClient {
    async fn send_message(&self, user_message: &str) -> Result<String, ChatError> {
        let url = self.chat_url()?;
        tracing::debug!(%url, chars = user_message.chars().count(), "sending chat request");

        let response = self
            .client
            .post(url)
            .query(&[(USER_MESSAGE_PARAM, user_message)])
            .send()
            .await
            .map_err(ChatError::Connect)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status {
                code: status.as_u16(),
                body: truncate_error_body(body.trim()),
            });
        }

        let body = response.text().await.map_err(ChatError::Body)?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "chat reply received");
        Ok(body)
    }
}

fn truncate_error_body(body: &str) -> String {
    if body.len() <= ERROR_BODY_LIMIT {
        return body.to_string();
    }
    let mut end = ERROR_BODY_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &body[..end])
}
