//! Collaborator traits.
//!
//! Each step of the webhook pipeline is a seam: the adapter wires concrete
//! implementations together, and tests swap any of them for fakes.
//!
//! ```text
//! WebhookRequest ─▶ EventParser ─▶ BotHandler ─▶ Responder ─▶ JsonPoster
//!                                       │             │
//!                                       └─ ErrorSink ◀┘
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::error;

use crate::error::{
    BotResult, CredentialResult, PipelineError, ReplyResult, TransportResult,
};
use crate::message::{BotReply, CanonicalMessage};
use crate::webhook::{WebhookRequest, WebhookResponse};

// =============================================================================
// Bot logic
// =============================================================================

/// The user-supplied bot.
///
/// Receives one normalized message plus the webhook request it arrived in,
/// and answers with a [`BotReply`]. Any async closure with a matching
/// signature is a `BotHandler`:
///
/// ```rust,ignore
/// let bot = |msg: CanonicalMessage, _req: Arc<WebhookRequest>| async move {
///     Ok::<_, anyhow::Error>(format!("you said: {}", msg.text))
/// };
/// ```
#[async_trait]
pub trait BotHandler: Send + Sync {
    /// Handles one message.
    async fn handle(&self, message: CanonicalMessage, request: Arc<WebhookRequest>) -> BotResult;
}

#[async_trait]
impl<F, Fut, R> BotHandler for F
where
    F: Fn(CanonicalMessage, Arc<WebhookRequest>) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
    R: Into<BotReply> + Send + 'static,
{
    async fn handle(&self, message: CanonicalMessage, request: Arc<WebhookRequest>) -> BotResult {
        (self)(message, request).await.map(Into::into)
    }
}

// =============================================================================
// Pipeline stages
// =============================================================================

/// Normalizes one platform event.
///
/// Returns `None` for events that carry nothing a bot can answer.
pub trait EventParser: Send + Sync {
    /// Parses a single event object.
    fn parse(&self, event: &Value) -> Option<CanonicalMessage>;
}

/// Delivers a bot reply back to the platform.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Sends `reply` using the one-time `reply_token`.
    ///
    /// Implementations must succeed without contacting the platform when
    /// there is no token or nothing to send.
    async fn reply(
        &self,
        reply_token: Option<&str>,
        reply: BotReply,
        access_token: &str,
    ) -> ReplyResult<()>;
}

/// Decodes stored credentials into their plain form.
pub trait CredentialDecoder: Send + Sync {
    /// Decodes one stored value.
    fn decode(&self, encoded: &str) -> CredentialResult<String>;
}

/// Receives pipeline failures.
///
/// Failures are reported here and never propagate to the webhook caller.
pub trait ErrorSink: Send + Sync {
    /// Reports one failure.
    fn report(&self, error: &PipelineError);
}

impl<F> ErrorSink for F
where
    F: Fn(&PipelineError) + Send + Sync,
{
    fn report(&self, error: &PipelineError) {
        (self)(error)
    }
}

/// Logs every pipeline failure at `error` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn report(&self, err: &PipelineError) {
        error!(error = %err, "Failed to handle webhook event");
    }
}

// =============================================================================
// Transport seams
// =============================================================================

/// Posts a JSON body with bearer authentication.
#[async_trait]
pub trait JsonPoster: Send + Sync {
    /// Posts `body` to `url`, failing on any non-success status.
    async fn post_json(&self, url: &str, bearer: &str, body: &Value) -> TransportResult<()>;
}

/// An adapter-side handler for inbound webhook calls.
#[async_trait]
pub trait WebhookHandler: Send + Sync {
    /// Handles one webhook call.
    async fn on_request(&self, request: WebhookRequest) -> WebhookResponse;
}

/// Shared webhook handler.
pub type BoxedWebhookHandler = Arc<dyn WebhookHandler>;
