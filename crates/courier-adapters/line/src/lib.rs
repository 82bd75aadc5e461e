//! # Courier Adapter for the LINE Messaging API
//!
//! Connects a Courier bot to a LINE channel.
//!
//! ## Overview
//!
//! LINE delivers events to a webhook and accepts answers through a one-time
//! reply token. This adapter handles:
//!
//! - Webhook signature checks ([`signature`])
//! - Event normalization into [`CanonicalMessage`](courier_core::CanonicalMessage) ([`parse`])
//! - Validated construction of outbound messages ([`message`])
//! - Splitting long texts into bubbles ([`chunk`])
//! - Posting replies to the reply endpoint ([`reply`])
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier_adapter_line::LineAdapter;
//! use courier_runtime::CourierRuntime;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime = CourierRuntime::new()?;
//!     runtime
//!         .register_adapter::<LineAdapter>(|msg: CanonicalMessage, _req| async move {
//!             Ok::<_, anyhow::Error>(msg.text)
//!         })
//!         .await?;
//!     runtime.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Replies
//!
//! A bot answers with anything convertible into a
//! [`BotReply`](courier_core::BotReply). Texts are chunked into bubbles of
//! at most 320 characters, built messages are sent as they are, and no reply
//! ever carries more than five messages:
//!
//! ```rust,ignore
//! use courier_adapter_line::message::OutboundMessage;
//!
//! let pin = OutboundMessage::location("Office", "1-1 Chiyoda", 35.68, 139.76)?;
//! Ok(BotReply::batch(["Here it is:".into(), ReplyItem::from(pin)]))
//! ```

mod adapter;
pub mod chunk;
pub mod config;
pub mod credentials;
pub mod message;
pub mod parse;
pub mod reply;
pub mod signature;
pub mod webhook;

pub use adapter::LineAdapter;
pub use chunk::{Chunks, MAX_CHUNK_LENGTH, chunk_text};
pub use config::LineConfig;
pub use credentials::{Base64Credentials, CredentialEncoding, PlainCredentials};
pub use message::{OutboundMessage, ValidationError, ValidationResult};
pub use parse::{LineEventParser, parse_event};
pub use reply::{LineResponder, MAX_MESSAGES_PER_REPLY, REPLY_ENDPOINT, build_messages};
pub use signature::{SIGNATURE_HEADER, sign, validate_signature};
pub use webhook::{ACKNOWLEDGEMENT, LineWebhook, LineWebhookBuilder, WebhookError};
