//! HTTP transport.
//!
//! The client posts replies to the platform; the server receives webhook
//! calls and forwards them to an adapter's [`WebhookHandler`](courier_core::WebhookHandler).

#[cfg(feature = "http-client")]
mod client;
#[cfg(feature = "http-client")]
pub use client::{DEFAULT_TIMEOUT, HttpClient};

#[cfg(feature = "http-server")]
mod server;
#[cfg(feature = "http-server")]
pub use server::{ListenerHandle, listen, listen_routes};
