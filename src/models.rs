//! Public data models mirroring the nulz mail API JSON payloads.

use serde::{Deserialize, Serialize};

/// A disposable inbox (alias) issued by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inbox {
    /// Server-assigned alias identifier.
    pub id: String,
    /// Full email address of the inbox.
    pub address: String,
}

/// A full message, including bodies when the server has them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message identifier.
    pub id: String,
    /// Subject line.
    pub subject: String,
    /// Sender address.
    pub from_addr: String,
    /// Recipient address.
    pub to_addr: String,
    /// Plaintext body, if the server stored one.
    pub body_text: Option<String>,
    /// HTML body, if the server stored one.
    pub body_html: Option<String>,
    /// Receive timestamp, as formatted by the server.
    pub received_at: String,
}

/// A message as it appears in inbox listings (no bodies).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSummary {
    /// Message identifier.
    pub id: String,
    /// Subject line.
    pub subject: String,
    /// Sender address.
    pub from_addr: String,
    /// Recipient address.
    pub to_addr: String,
    /// Receive timestamp, as formatted by the server.
    pub received_at: String,
}

/// One page of an inbox listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesPage {
    /// Messages on this page, newest first.
    #[serde(default)]
    pub messages: Vec<MessageSummary>,
    /// Total number of messages in the inbox.
    #[serde(default)]
    pub total: i64,
    /// Opaque pagination token; pass it back to
    /// [`Client::list_messages`](crate::Client::list_messages) to fetch the
    /// next page. The API treats it as an offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl From<MessageSummary> for Message {
    /// Promote a listing entry to a bodiless full message.
    fn from(summary: MessageSummary) -> Self {
        Message {
            id: summary.id,
            subject: summary.subject,
            from_addr: summary.from_addr,
            to_addr: summary.to_addr,
            body_text: None,
            body_html: None,
            received_at: summary.received_at,
        }
    }
}
