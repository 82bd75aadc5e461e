//! The webhook pipeline.
//!
//! One inbound delivery goes through these steps:
//!
//! 1. the signature is checked when a channel secret is configured;
//! 2. the `events` batch is flattened;
//! 3. every event runs parse → bot → reply, all events concurrently;
//! 4. once every event has settled the delivery is acknowledged with `"ok"`.
//!
//! A failing event is reported to the [`ErrorSink`] and never affects its
//! siblings or the acknowledgement. A panicking bot counts as a failing
//! event.
//!
//! Events whose bot returns an empty reply stop before the [`Responder`]: a
//! custom responder only ever receives replies with something to send.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use courier_core::{
    BotHandler, CanonicalMessage, CredentialDecoder, CredentialError, ErrorSink, EventParser,
    JsonPoster, PipelineError, Responder, TracingErrorSink, WebhookRequest, settle_all,
};
use futures::FutureExt;
use serde_json::Value;
use thiserror::Error;
use tracing::{Instrument, debug, info_span, trace, warn};

use crate::credentials::Base64Credentials;
use crate::parse::LineEventParser;
use crate::reply::{LineResponder, REPLY_ENDPOINT};
use crate::signature::{SIGNATURE_HEADER, validate_signature};

/// Body returned to the platform for every accepted delivery.
pub const ACKNOWLEDGEMENT: &str = "ok";

/// Why a delivery was rejected as a whole.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WebhookError {
    /// The signature header was missing or wrong.
    #[error("X-Line-Signature does not match")]
    SignatureMismatch,

    /// The body was not a webhook payload.
    #[error("malformed webhook body: {0}")]
    MalformedBody(String),

    /// The channel secret could not be decoded.
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl WebhookError {
    /// HTTP status answered to the platform.
    pub fn status(&self) -> u16 {
        match self {
            Self::SignatureMismatch => 401,
            Self::MalformedBody(_) => 400,
            Self::Credential(_) => 500,
        }
    }
}

// =============================================================================
// LineWebhook
// =============================================================================

/// Handles LINE webhook deliveries for one bot.
pub struct LineWebhook {
    bot: Arc<dyn BotHandler>,
    parser: Arc<dyn EventParser>,
    responder: Arc<dyn Responder>,
    credentials: Arc<dyn CredentialDecoder>,
    errors: Arc<dyn ErrorSink>,
    channel_secret: Option<String>,
    channel_access_token: Option<String>,
}

impl std::fmt::Debug for LineWebhook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineWebhook")
            .field("verifies_signature", &self.channel_secret.is_some())
            .finish_non_exhaustive()
    }
}

impl LineWebhook {
    /// Creates a builder. `poster` backs the default responder.
    pub fn builder(bot: Arc<dyn BotHandler>, poster: Arc<dyn JsonPoster>) -> LineWebhookBuilder {
        LineWebhookBuilder {
            bot,
            poster,
            parser: None,
            responder: None,
            credentials: None,
            errors: None,
            channel_secret: None,
            channel_access_token: None,
            reply_endpoint: REPLY_ENDPOINT.to_string(),
        }
    }

    /// Handles one delivery.
    ///
    /// Resolves with [`ACKNOWLEDGEMENT`] once every event has been handled,
    /// whatever the individual outcomes.
    pub async fn handle(&self, request: WebhookRequest) -> Result<&'static str, WebhookError> {
        self.verify_signature(&request)?;
        let events = collect_events(request.body.as_ref())?;
        trace!(bytes = request.raw_body.len(), "Accepted webhook body");

        let request = Arc::new(request);
        let span = info_span!("line_webhook", events = events.len());

        async {
            let tasks = events.iter().filter_map(|event| match self.parser.parse(event) {
                Some(message) => Some(self.run_event(message, Arc::clone(&request))),
                None => {
                    debug!("Ignoring event without a usable source");
                    None
                }
            });

            let settled = settle_all(tasks).await;
            debug!(
                succeeded = settled.succeeded(),
                failed = settled.failed(),
                "Webhook batch settled"
            );
        }
        .instrument(span)
        .await;

        Ok(ACKNOWLEDGEMENT)
    }

    fn verify_signature(&self, request: &WebhookRequest) -> Result<(), WebhookError> {
        let Some(encoded) = self.channel_secret.as_deref() else {
            return Ok(());
        };
        let secret = self.credentials.decode(encoded)?;

        let valid = request
            .header(SIGNATURE_HEADER)
            .is_some_and(|signature| {
                validate_signature(&request.raw_body, secret.as_bytes(), signature)
            });
        if !valid {
            warn!("Rejected webhook with a bad signature");
            return Err(WebhookError::SignatureMismatch);
        }
        Ok(())
    }

    async fn run_event(
        &self,
        message: CanonicalMessage,
        request: Arc<WebhookRequest>,
    ) -> Result<(), PipelineError> {
        let result = AssertUnwindSafe(self.pipeline(message, request))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| {
                Err(PipelineError::Panicked(panic_message(payload.as_ref())))
            });
        if let Err(err) = &result {
            self.errors.report(err);
        }
        result
    }

    async fn pipeline(
        &self,
        message: CanonicalMessage,
        request: Arc<WebhookRequest>,
    ) -> Result<(), PipelineError> {
        let reply_token = message.reply_token.clone();
        debug!(
            sender = %message.sender,
            postback = message.is_postback(),
            "Dispatching event to bot"
        );

        let reply = self
            .bot
            .handle(message, request)
            .await
            .map_err(PipelineError::Bot)?;
        if reply.is_empty() {
            return Ok(());
        }

        let access_token = self.access_token()?;
        self.responder
            .reply(reply_token.as_deref(), reply, &access_token)
            .await?;
        Ok(())
    }

    fn access_token(&self) -> Result<String, CredentialError> {
        let encoded = self
            .channel_access_token
            .as_deref()
            .ok_or(CredentialError::Missing {
                name: "channel_access_token",
            })?;
        self.credentials.decode(encoded)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Returns the events of a delivery, splicing nested arrays in place.
fn collect_events(body: Option<&Value>) -> Result<Vec<Value>, WebhookError> {
    let body = body.ok_or_else(|| WebhookError::MalformedBody("body is not JSON".to_string()))?;

    match body.get("events") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(events)) => Ok(events
            .iter()
            .flat_map(|event| match event {
                Value::Array(nested) => nested.clone(),
                other => vec![other.clone()],
            })
            .collect()),
        Some(_) => Err(WebhookError::MalformedBody(
            "events is not an array".to_string(),
        )),
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`LineWebhook`].
///
/// Every collaborator defaults to the standard implementation.
pub struct LineWebhookBuilder {
    bot: Arc<dyn BotHandler>,
    poster: Arc<dyn JsonPoster>,
    parser: Option<Arc<dyn EventParser>>,
    responder: Option<Arc<dyn Responder>>,
    credentials: Option<Arc<dyn CredentialDecoder>>,
    errors: Option<Arc<dyn ErrorSink>>,
    channel_secret: Option<String>,
    channel_access_token: Option<String>,
    reply_endpoint: String,
}

impl LineWebhookBuilder {
    /// Sets the encoded channel secret, enabling signature checks.
    pub fn channel_secret(mut self, secret: impl Into<String>) -> Self {
        self.channel_secret = Some(secret.into());
        self
    }

    /// Sets the encoded channel access token.
    pub fn channel_access_token(mut self, token: impl Into<String>) -> Self {
        self.channel_access_token = Some(token.into());
        self
    }

    /// Sets the endpoint used by the default responder.
    pub fn reply_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.reply_endpoint = endpoint.into();
        self
    }

    pub fn parser(mut self, parser: Arc<dyn EventParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Replaces the default responder.
    ///
    /// It is only called for non-empty replies.
    pub fn responder(mut self, responder: Arc<dyn Responder>) -> Self {
        self.responder = Some(responder);
        self
    }

    pub fn credentials(mut self, credentials: Arc<dyn CredentialDecoder>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn error_sink(mut self, errors: Arc<dyn ErrorSink>) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn build(self) -> LineWebhook {
        let poster = self.poster;
        let reply_endpoint = self.reply_endpoint;
        LineWebhook {
            bot: self.bot,
            parser: self.parser.unwrap_or_else(|| Arc::new(LineEventParser)),
            responder: self
                .responder
                .unwrap_or_else(|| Arc::new(LineResponder::with_endpoint(poster, reply_endpoint))),
            credentials: self.credentials.unwrap_or_else(|| Arc::new(Base64Credentials)),
            errors: self.errors.unwrap_or_else(|| Arc::new(TracingErrorSink)),
            channel_secret: self.channel_secret.filter(|secret| !secret.is_empty()),
            channel_access_token: self.channel_access_token,
        }
    }
}
