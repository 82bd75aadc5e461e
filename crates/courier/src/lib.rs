//! # Courier
//!
//! Bridge a conversational bot to chat platform webhooks.
//!
//! ## Overview
//!
//! Courier receives webhook deliveries from a chat platform, normalizes every
//! event into a [`CanonicalMessage`](courier_core::CanonicalMessage), hands it
//! to your bot, and sends whatever the bot answers back through the platform's
//! reply API.
//!
//! ```text
//! ┌──────────┐     ┌────────────┐     ┌─────────────┐     ┌─────────┐
//! │ Platform │────▶│  Listener  │────▶│   Adapter   │────▶│   Bot   │
//! │ webhook  │     │  (axum)    │     │ (LINE, ...) │◀────│ (yours) │
//! └──────────┘     └────────────┘     └─────────────┘     └─────────┘
//!       ▲                                    │
//!       └────────── reply API (reqwest) ─────┘
//! ```
//!
//! - **Runtime**: loads configuration, sets up logging, serves the adapters
//! - **Adapters**: platform implementations (LINE)
//! - **Bots**: user-defined async functions
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier::prelude::*;
//!
//! async fn echo(msg: CanonicalMessage, _req: Arc<WebhookRequest>) -> anyhow::Result<String> {
//!     Ok(msg.text)
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime = CourierRuntime::new()?;
//!     runtime.register_adapter::<LineAdapter>(echo).await?;
//!     runtime.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `adapter-line`: Enable the LINE adapter (default)
//! - `toml-config` / `yaml-config`: Configuration file formats
//! - `json-log`: JSON log output

pub use courier_core as core;
pub use courier_runtime as runtime;
pub use courier_transport as transport;

#[cfg(feature = "adapter-line")]
pub use courier_adapter_line as line;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use courier::prelude::*;
/// ```
pub mod prelude {
    pub use std::sync::Arc;

    // Runtime - main entry point
    pub use courier_runtime::{CourierRuntime, RuntimeBuilder};

    // Bot model
    pub use courier_core::{BotHandler, BotReply, CanonicalMessage, ReplyItem, WebhookRequest};

    // LINE adapter and message builders
    #[cfg(feature = "adapter-line")]
    pub use courier_adapter_line::LineAdapter;
    #[cfg(feature = "adapter-line")]
    pub use courier_adapter_line::message::{
        ButtonsBuilder, CarouselBuilder, ConfirmBuilder, ImagemapArea, ImagemapBuilder,
        OutboundMessage, TemplateAction,
    };
}
