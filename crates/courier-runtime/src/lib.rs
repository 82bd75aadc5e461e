//! Courier Runtime - orchestration layer for the Courier bot bridge.
//!
//! This crate provides:
//! - Layered configuration loading and validation ([`config`])
//! - Logging setup ([`logging`])
//! - The [`CourierRuntime`], which builds adapters from configuration and
//!   serves them from one webhook listener
//!
//! ```ignore
//! use courier_runtime::CourierRuntime;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime = CourierRuntime::new()?;
//!     runtime.register_adapter::<LineAdapter>(my_bot).await?;
//!     runtime.run().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;

// Re-exports
pub use config::{ConfigError, ConfigLoader, ConfigResult, CourierConfig, LoggingConfig};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{LoggingBuilder, SpanEvents};
pub use runtime::{CourierRuntime, RuntimeBuilder};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
