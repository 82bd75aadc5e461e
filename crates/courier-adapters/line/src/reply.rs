//! Delivering bot replies through the reply endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use courier_core::{BotReply, JsonPoster, ReplyItem, ReplyResult, Responder};
use serde_json::{Value, json};
use tracing::{debug, trace};

use crate::chunk::{MAX_CHUNK_LENGTH, chunk_text};
use crate::message::OutboundMessage;

/// The LINE reply endpoint.
pub const REPLY_ENDPOINT: &str = "https://api.line.me/v2/bot/message/reply";

/// Most messages one reply call may carry.
pub const MAX_MESSAGES_PER_REPLY: usize = 5;

fn text_chunks(text: &str, budget: usize) -> impl Iterator<Item = Value> + '_ {
    chunk_text(text, MAX_CHUNK_LENGTH)
        .take(budget)
        .map(|chunk| OutboundMessage::text_unchecked(chunk).to_json())
}

/// Turns a bot reply into the `messages` array of one reply call.
///
/// Texts are chunked into bubbles, payloads pass through unchanged. In a
/// batch, every text gets a budget of `max(1, 5 - batch_len + 1)` chunks.
/// The result never holds more than [`MAX_MESSAGES_PER_REPLY`] entries.
pub fn build_messages(reply: BotReply) -> Vec<Value> {
    let mut messages: Vec<Value> = match reply {
        BotReply::Empty => Vec::new(),
        BotReply::Text(text) => text_chunks(&text, MAX_MESSAGES_PER_REPLY).collect(),
        BotReply::Payload(payload) => vec![payload],
        BotReply::Batch(items) => {
            let budget = (MAX_MESSAGES_PER_REPLY + 1).saturating_sub(items.len()).max(1);
            let mut messages = Vec::new();
            for item in items {
                match item {
                    ReplyItem::Text(text) => messages.extend(text_chunks(&text, budget)),
                    ReplyItem::Payload(payload) => messages.push(payload),
                }
            }
            messages
        }
    };
    messages.truncate(MAX_MESSAGES_PER_REPLY);
    messages
}

/// The default [`Responder`]: one POST to the reply endpoint per reply.
#[derive(Clone)]
pub struct LineResponder {
    poster: Arc<dyn JsonPoster>,
    endpoint: String,
}

impl LineResponder {
    /// Creates a responder posting to [`REPLY_ENDPOINT`].
    pub fn new(poster: Arc<dyn JsonPoster>) -> Self {
        Self::with_endpoint(poster, REPLY_ENDPOINT)
    }

    /// Creates a responder posting to `endpoint`.
    pub fn with_endpoint(poster: Arc<dyn JsonPoster>, endpoint: impl Into<String>) -> Self {
        Self {
            poster,
            endpoint: endpoint.into(),
        }
    }

    /// Returns the endpoint replies are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for LineResponder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineResponder")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Responder for LineResponder {
    async fn reply(
        &self,
        reply_token: Option<&str>,
        reply: BotReply,
        access_token: &str,
    ) -> ReplyResult<()> {
        let messages = build_messages(reply);
        let Some(reply_token) = reply_token.filter(|token| !token.is_empty()) else {
            debug!("Event has no reply token, skipping reply");
            return Ok(());
        };
        if messages.is_empty() {
            debug!(reply_token = %reply_token, "Nothing to reply");
            return Ok(());
        }

        trace!(reply_token = %reply_token, messages = messages.len(), "Sending reply");
        let body = json!({
            "replyToken": reply_token,
            "messages": messages,
        });
        self.poster
            .post_json(&self.endpoint, access_token, &body)
            .await?;
        Ok(())
    }
}
