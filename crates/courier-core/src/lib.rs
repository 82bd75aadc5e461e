//! # Courier Core
//!
//! Platform-independent building blocks for the Courier bot bridge.
//!
//! Courier sits between a chat platform's webhook and a user-supplied bot:
//! every inbound event is normalized into a [`CanonicalMessage`], handed to a
//! [`BotHandler`], and whatever the bot answers ([`BotReply`]) is delivered by
//! the adapter's [`Responder`].
//!
//! ```text
//! ┌──────────┐     ┌──────────────┐     ┌──────────┐
//! │ Platform │────▶│   Adapter    │────▶│   Bot    │
//! │ webhook  │◀────│ (LINE, ...)  │◀────│ (yours)  │
//! └──────────┘     └──────────────┘     └──────────┘
//! ```
//!
//! This crate holds the shared data model, the collaborator traits the
//! adapters are assembled from, and the error types crossing those seams.

pub mod adapter;
pub mod error;
pub mod message;
pub mod settle;
pub mod traits;
pub mod webhook;

pub use adapter::{AdapterContext, ConfigurableAdapter};
pub use error::{
    AdapterError, AdapterResult, BotResult, CredentialError, CredentialResult, PipelineError,
    ReplyError, ReplyResult, TransportError, TransportResult,
};
pub use message::{BotReply, CanonicalMessage, Platform, ReplyItem};
pub use settle::{Settled, settle_all};
pub use traits::{
    BotHandler, BoxedWebhookHandler, CredentialDecoder, ErrorSink, EventParser, JsonPoster,
    Responder, TracingErrorSink, WebhookHandler,
};
pub use webhook::{WebhookRequest, WebhookResponse};
