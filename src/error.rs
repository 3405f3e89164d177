//! Error types for the nulz mail client.

use reqwest::StatusCode;
use thiserror::Error;

/// Stored error bodies are capped so a misbehaving server cannot bloat errors.
const MAX_BODY_BYTES: usize = 4096;
/// Characters of raw body shown in `Display`.
const DISPLAY_BODY_CHARS: usize = 200;

pub(crate) const WAIT_TIMEOUT_MESSAGE: &str = "timeout waiting for message";

/// Error type for all nulz mail client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying HTTP transport error (connect, TLS, request timeout).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// The API answered with a non-2xx status.
    ///
    /// `code` and `message` are filled in when the response body is JSON with
    /// either a string or a `{code, message}` object under an `error` key;
    /// `body` always keeps a raw snippet for everything else.
    #[error("{}", api_display(.status, .message, .body))]
    Api {
        /// HTTP status of the response.
        status: StatusCode,
        /// Machine-readable error code, when the server sent one.
        code: Option<String>,
        /// Human-readable error message, when the server sent one.
        message: Option<String>,
        /// Raw response body snippet.
        body: String,
    },
}

impl Error {
    /// HTTP status associated with this error, if any.
    ///
    /// Always present for [`Error::Api`]; for [`Error::Http`] only when the
    /// underlying reqwest error carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(err) => err.status(),
        }
    }

    /// Whether this is the synthetic 408 returned when
    /// [`Client::wait_for_message`](crate::Client::wait_for_message) reaches
    /// its deadline without any message arriving.
    pub fn is_wait_timeout(&self) -> bool {
        matches!(
            self,
            Error::Api { status, message, .. }
                if *status == StatusCode::REQUEST_TIMEOUT
                    && message.as_deref() == Some(WAIT_TIMEOUT_MESSAGE)
        )
    }

    pub(crate) fn wait_timeout() -> Self {
        Error::Api {
            status: StatusCode::REQUEST_TIMEOUT,
            code: None,
            message: Some(WAIT_TIMEOUT_MESSAGE.to_string()),
            body: String::new(),
        }
    }

    /// Drain a failed response into an [`Error::Api`].
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        match response.text().await {
            Ok(body) => Self::from_status_body(status, &body),
            Err(err) => Error::Http(err),
        }
    }

    /// Map a status and raw body to an [`Error::Api`], probing the body for
    /// the API's JSON error shapes.
    pub(crate) fn from_status_body(status: StatusCode, body: &str) -> Self {
        let mut code = None;
        let mut message = None;
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            match value.get("error") {
                Some(serde_json::Value::String(text)) => {
                    message = Some(text.clone());
                }
                Some(serde_json::Value::Object(fields)) => {
                    code = fields
                        .get("code")
                        .and_then(|v| v.as_str())
                        .map(str::to_string);
                    message = fields
                        .get("message")
                        .and_then(|v| v.as_str())
                        .map(str::to_string);
                }
                _ => {}
            }
        }
        Error::Api {
            status,
            code,
            message,
            body: cap_bytes(body.trim(), MAX_BODY_BYTES).to_string(),
        }
    }
}

fn api_display(status: &StatusCode, message: &Option<String>, body: &str) -> String {
    if let Some(message) = message.as_deref().filter(|m| !m.is_empty()) {
        return format!("nulz mail api: {message} (status {})", status.as_u16());
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return format!("nulz mail api: status {}", status.as_u16());
    }
    format!(
        "nulz mail api: status {}: {}",
        status.as_u16(),
        ellipsize(trimmed, DISPLAY_BODY_CHARS)
    )
}

fn ellipsize(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}

fn cap_bytes(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
