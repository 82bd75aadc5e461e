//! Canonical inbound message and the bot reply model.
//!
//! Adapters normalize every platform event into a [`CanonicalMessage`] and
//! hand it to the bot. Whatever the bot answers is expressed as a
//! [`BotReply`], which the adapter's responder turns into platform payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Platform tag
// ============================================================================

/// The platform an inbound message originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// LINE Messaging API.
    Line,
}

impl Platform {
    /// Returns the wire tag of the platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "line",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CanonicalMessage
// ============================================================================

/// One inbound event, normalized.
///
/// Created once per event and passed by value to the bot; never mutated
/// afterwards. Serializes to the record shape bots expect:
///
/// ```json
/// {"sender":"1234","text":"Hello","replyToken":"123as","originalRequest":{...},"type":"line"}
/// ```
///
/// `replyToken` and `postback` are omitted entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalMessage {
    /// User, group or room id of the conversation.
    pub sender: String,

    /// Message text, postback data, or the empty string.
    pub text: String,

    /// One-time reply token, when the event has a reply channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_token: Option<String>,

    /// Set when `text` came from postback data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postback: Option<bool>,

    /// The untouched platform event.
    pub original_request: Value,

    /// Originating platform.
    #[serde(rename = "type")]
    pub platform: Platform,
}

impl CanonicalMessage {
    /// Returns whether the text came from a postback.
    pub fn is_postback(&self) -> bool {
        self.postback.unwrap_or(false)
    }

    /// Returns whether the event carried no text at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

// ============================================================================
// BotReply
// ============================================================================

/// One element of a batch reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyItem {
    /// Plain text, chunked by the responder.
    Text(String),
    /// An already-built platform payload, passed through unchanged.
    Payload(Value),
}

impl From<&str> for ReplyItem {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ReplyItem {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for ReplyItem {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            other => Self::Payload(other),
        }
    }
}

/// What the bot answered for one inbound message.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BotReply {
    /// No reply; nothing is sent.
    #[default]
    Empty,
    /// A single text, chunked into as many bubbles as allowed.
    Text(String),
    /// A single pre-built payload.
    Payload(Value),
    /// A mixed list of texts and payloads.
    Batch(Vec<ReplyItem>),
}

impl BotReply {
    /// Creates a batch reply from anything convertible to reply items.
    pub fn batch<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ReplyItem>,
    {
        Self::Batch(items.into_iter().map(Into::into).collect())
    }

    /// Returns whether this reply sends nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<()> for BotReply {
    fn from(_: ()) -> Self {
        Self::Empty
    }
}

impl From<&str> for BotReply {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for BotReply {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<ReplyItem> for BotReply {
    fn from(item: ReplyItem) -> Self {
        match item {
            ReplyItem::Text(text) => Self::Text(text),
            ReplyItem::Payload(value) => Self::Payload(value),
        }
    }
}

impl<T: Into<ReplyItem>> From<Vec<T>> for BotReply {
    fn from(items: Vec<T>) -> Self {
        Self::batch(items)
    }
}

impl<T: Into<BotReply>> From<Option<T>> for BotReply {
    fn from(reply: Option<T>) -> Self {
        reply.map_or(Self::Empty, Into::into)
    }
}

/// Maps a dynamically-typed JSON answer onto a reply.
///
/// `null`, `false` and `0` mean "no reply"; strings are text; arrays are
/// batches; anything else is a single payload.
impl From<Value> for BotReply {
    fn from(value: Value) -> Self {
        match value {
            Value::Null | Value::Bool(false) => Self::Empty,
            Value::Number(ref n) if n.as_f64() == Some(0.0) => Self::Empty,
            Value::String(text) => Self::Text(text),
            Value::Array(items) => Self::batch(items),
            other => Self::Payload(other),
        }
    }
}
