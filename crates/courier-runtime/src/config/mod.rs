//! Configuration module for the Courier runtime.
//!
//! This module provides layered configuration loading (files, environment,
//! programmatic overrides) and validation for the server, logging and
//! per-adapter settings.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{
    CourierConfig, LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig, NetworkConfig,
    ServerConfig, SpanEventConfig,
};
pub use validation::validate_config;
