//! # Courier Transport
//!
//! Network transport implementations for the Courier bot bridge.
//!
//! ## Features
//!
//! - `http-client`: pooled JSON client implementing [`JsonPoster`](courier_core::JsonPoster)
//! - `http-server`: webhook listener driving a [`WebhookHandler`](courier_core::WebhookHandler)
//! - `full`: both
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  Adapter Layer      │  (LINE, ...)
//! ├─────────────────────┤
//! │  courier-core       │  (collaborator traits)
//! ├─────────────────────┤
//! │  courier-transport  │  <- This crate
//! ├─────────────────────┤
//! │  Network (TCP/HTTP) │
//! └─────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier_transport::http::{HttpClient, listen};
//!
//! let handle = listen("0.0.0.0:8080", "/line", adapter).await?;
//! let client = HttpClient::new()?;
//! client.post_json(url, &token, &body).await?;
//! ```

#[cfg(any(feature = "http-client", feature = "http-server"))]
pub mod http;

#[cfg(feature = "http-client")]
pub use http::HttpClient;

#[cfg(feature = "http-server")]
pub use http::{ListenerHandle, listen, listen_routes};
