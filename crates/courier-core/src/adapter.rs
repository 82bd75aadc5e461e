//! Adapter construction.
//!
//! An adapter is a [`WebhookHandler`] the runtime can build from its
//! configuration section and mount at a path:
//!
//! ```toml
//! [adapters.line]   # <- ConfigurableAdapter::name()
//! channel_secret = "..."
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::AdapterResult;
use crate::traits::{BotHandler, JsonPoster, WebhookHandler};

/// Collaborators the runtime hands to an adapter at construction.
#[derive(Clone)]
pub struct AdapterContext {
    /// The user's bot.
    pub bot: Arc<dyn BotHandler>,
    /// Outbound HTTP client shared by every adapter.
    pub poster: Arc<dyn JsonPoster>,
}

impl AdapterContext {
    /// Creates a new adapter context.
    pub fn new(bot: Arc<dyn BotHandler>, poster: Arc<dyn JsonPoster>) -> Self {
        Self { bot, poster }
    }
}

impl std::fmt::Debug for AdapterContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterContext").finish_non_exhaustive()
    }
}

/// An adapter the runtime can build from configuration.
pub trait ConfigurableAdapter: WebhookHandler + Sized + 'static {
    /// The configuration type, deserialized from `adapters.<name>`.
    type Config: DeserializeOwned + Default;

    /// Returns the adapter name used as the config key.
    fn name() -> &'static str;

    /// Creates an adapter instance from its configuration.
    fn from_config(config: Self::Config, ctx: AdapterContext) -> AdapterResult<Self>;

    /// The webhook path this adapter is mounted at.
    fn path(&self) -> &str;
}
