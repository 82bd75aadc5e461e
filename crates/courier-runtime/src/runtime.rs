//! Main runtime orchestration.
//!
//! The runtime owns the configuration, builds adapters from their
//! `adapters.<name>` sections, and serves all of them from one webhook
//! listener until shutdown.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use courier_runtime::CourierRuntime;
//! use courier_adapter_line::LineAdapter;
//!
//! let runtime = CourierRuntime::new()?;
//! runtime.register_adapter::<LineAdapter>(my_bot).await?;
//! runtime.run().await?;
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use courier_core::{
    AdapterContext, BotHandler, BoxedWebhookHandler, ConfigurableAdapter, JsonPoster,
};
use courier_transport::{HttpClient, ListenerHandle, listen_routes};

use crate::config::validation::validate_path;
use crate::config::{ConfigLoader, CourierConfig};
use crate::error::{RuntimeError, RuntimeResult};
use crate::logging;

/// An adapter mounted on the listener.
struct MountedAdapter {
    name: &'static str,
    path: String,
    handler: BoxedWebhookHandler,
}

/// The Courier runtime.
pub struct CourierRuntime {
    config: CourierConfig,
    poster: Arc<dyn JsonPoster>,
    adapters: RwLock<Vec<MountedAdapter>>,
    listener: RwLock<Option<ListenerHandle>>,
}

impl CourierRuntime {
    /// Creates a runtime from the default configuration locations.
    ///
    /// Falls back to defaults when no configuration can be loaded.
    pub fn new() -> RuntimeResult<Self> {
        let config = ConfigLoader::new()
            .with_current_dir()
            .load()
            .unwrap_or_else(|e| {
                eprintln!("Warning: Failed to load config ({e}), using defaults");
                CourierConfig::default()
            });

        Self::from_config(&config)
    }

    /// Creates a runtime builder for custom configuration.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Creates a runtime from configuration.
    ///
    /// Initializes logging and the shared outbound HTTP client.
    pub fn from_config(config: &CourierConfig) -> RuntimeResult<Self> {
        let client = HttpClient::with_timeout(config.network.timeout())?;
        Ok(Self::with_poster(config, Arc::new(client)))
    }

    /// Creates a runtime that sends platform calls through `poster`.
    pub fn with_poster(config: &CourierConfig, poster: Arc<dyn JsonPoster>) -> Self {
        logging::init_from_config(&config.logging);

        info!(
            log_level = %config.logging.level,
            log_format = ?config.logging.format,
            addr = %config.server.addr(),
            "Runtime initialized from configuration"
        );

        Self {
            config: config.clone(),
            poster,
            adapters: RwLock::new(Vec::new()),
            listener: RwLock::new(None),
        }
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &CourierConfig {
        &self.config
    }

    /// Builds adapter `A` from `adapters.<A::name()>` and mounts it.
    ///
    /// A missing section falls back to `A::Config::default()`.
    pub async fn register_adapter<A>(&self, bot: impl BotHandler + 'static) -> RuntimeResult<()>
    where
        A: ConfigurableAdapter,
    {
        let adapter_name = A::name();

        let config: A::Config = if let Some(value) = self.config.adapters.get(adapter_name) {
            value.deserialize::<A::Config>().map_err(|e| {
                RuntimeError::AdapterConfigDeserialize(format!(
                    "Failed to deserialize config for adapter '{adapter_name}': {e}"
                ))
            })?
        } else {
            warn!(
                adapter = adapter_name,
                "No configuration found for adapter, using default"
            );
            Default::default()
        };

        let ctx = AdapterContext::new(Arc::new(bot), Arc::clone(&self.poster));
        let adapter = A::from_config(config, ctx)?;
        let path = adapter.path().to_string();
        validate_path(&path)?;

        let mut adapters = self.adapters.write().await;
        if adapters.iter().any(|a| a.name == adapter_name) {
            return Err(RuntimeError::AdapterExists(adapter_name.to_string()));
        }
        adapters.push(MountedAdapter {
            name: adapter_name,
            path: path.clone(),
            handler: Arc::new(adapter),
        });

        info!(adapter = adapter_name, path = %path, "Registered adapter");
        Ok(())
    }

    /// Returns the number of registered adapters.
    pub async fn adapter_count(&self) -> usize {
        self.adapters.read().await.len()
    }

    /// Returns whether the runtime is currently running.
    pub async fn is_running(&self) -> bool {
        self.listener.read().await.is_some()
    }

    /// Returns the bound listener address while running.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.read().await.as_ref().map(|l| l.local_addr())
    }

    /// Starts the webhook listener.
    pub async fn start(&self) -> RuntimeResult<()> {
        let mut listener = self.listener.write().await;
        if listener.is_some() {
            warn!("Runtime is already running");
            return Ok(());
        }

        info!("Starting Courier runtime");

        let routes = {
            let adapters = self.adapters.read().await;
            for adapter in adapters.iter() {
                debug!(adapter = adapter.name, path = %adapter.path, "Mounting adapter");
            }
            adapters
                .iter()
                .map(|a| (a.path.clone(), Arc::clone(&a.handler)))
                .collect::<Vec<_>>()
        };

        let handle = listen_routes(&self.config.server.addr(), routes).await?;
        info!(addr = %handle.local_addr(), "Runtime started");
        *listener = Some(handle);

        Ok(())
    }

    /// Stops the webhook listener.
    pub async fn stop(&self) -> RuntimeResult<()> {
        match self.listener.write().await.take() {
            Some(handle) => {
                info!("Stopping Courier runtime");
                handle.stop();
                info!("Runtime stopped");
            }
            None => warn!("Runtime is not running"),
        }
        Ok(())
    }

    /// Runs the runtime until a shutdown signal is received.
    pub async fn run(&self) -> RuntimeResult<()> {
        self.start().await?;

        info!("Courier runtime is now running. Press Ctrl+C to stop.");
        wait_for_shutdown().await;

        self.stop().await
    }

    /// Runs the runtime with a custom shutdown future.
    pub async fn run_until<F>(&self, shutdown: F) -> RuntimeResult<()>
    where
        F: std::future::Future<Output = ()>,
    {
        self.start().await?;
        shutdown.await;
        self.stop().await
    }
}

/// Waits for shutdown signals (Ctrl+C or SIGTERM).
async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = signal::ctrl_c() => {
                        info!("Received Ctrl+C, shutting down");
                    }
                    _ = sigterm.recv() => {
                        info!("Received SIGTERM, shutting down");
                    }
                }
                return;
            }
            Err(e) => warn!(error = %e, "Failed to register SIGTERM handler"),
        }
    }

    match signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(e) => warn!(error = %e, "Failed to listen for Ctrl+C, shutting down"),
    }
}

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Builder for creating a [`CourierRuntime`] with custom configuration.
///
/// ```rust,ignore
/// let runtime = CourierRuntime::builder()
///     .config_file("config/courier.toml")
///     .profile("production")
///     .build()?;
/// ```
pub struct RuntimeBuilder {
    config_loader: ConfigLoader,
    poster: Option<Arc<dyn JsonPoster>>,
}

impl RuntimeBuilder {
    /// Creates a new runtime builder.
    pub fn new() -> Self {
        Self {
            config_loader: ConfigLoader::new().with_current_dir(),
            poster: None,
        }
    }

    /// Sets a specific configuration file to load.
    pub fn config_file<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.file(path);
        self
    }

    /// Sets the configuration profile (e.g., "development", "production").
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.config_loader = self.config_loader.profile(profile);
        self
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.search_path(path);
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.config_loader = self.config_loader.without_env();
        self
    }

    /// Merges additional configuration programmatically.
    pub fn merge(mut self, config: CourierConfig) -> Self {
        self.config_loader = self.config_loader.merge(config);
        self
    }

    /// Replaces the outbound HTTP client.
    pub fn poster(mut self, poster: Arc<dyn JsonPoster>) -> Self {
        self.poster = Some(poster);
        self
    }

    /// Builds the runtime.
    pub fn build(self) -> RuntimeResult<CourierRuntime> {
        let config = self.config_loader.load()?;
        match self.poster {
            Some(poster) => Ok(CourierRuntime::with_poster(&config, poster)),
            None => CourierRuntime::from_config(&config),
        }
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use courier_core::{
        AdapterError, AdapterResult, BotReply, CanonicalMessage, Platform, TransportResult,
        WebhookHandler, WebhookRequest, WebhookResponse,
    };
    use serde::{Deserialize, Serialize};
    use serde_json::{Value, json};

    #[derive(Default)]
    struct NullPoster;

    #[async_trait]
    impl JsonPoster for NullPoster {
        async fn post_json(&self, _url: &str, _bearer: &str, _body: &Value) -> TransportResult<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingPoster {
        calls: Mutex<Vec<(String, Value)>>,
    }

    #[async_trait]
    impl JsonPoster for RecordingPoster {
        async fn post_json(&self, url: &str, _bearer: &str, body: &Value) -> TransportResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), body.clone()));
            Ok(())
        }
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct EchoConfig {
        #[serde(default = "default_path")]
        path: String,
        #[serde(default)]
        reject: bool,
    }

    fn default_path() -> String {
        "/echo".to_string()
    }

    /// Forwards every body's `text` to the bot and posts the answer back.
    struct EchoAdapter {
        path: String,
        ctx: AdapterContext,
    }

    #[async_trait]
    impl WebhookHandler for EchoAdapter {
        async fn on_request(&self, request: WebhookRequest) -> WebhookResponse {
            let text = request
                .body
                .as_ref()
                .and_then(|b| b["text"].as_str())
                .unwrap_or_default()
                .to_string();
            let message = CanonicalMessage {
                sender: "tester".to_string(),
                text,
                reply_token: None,
                postback: None,
                original_request: Value::Null,
                platform: Platform::Line,
            };
            let request = Arc::new(request);
            if let Ok(BotReply::Text(answer)) = self.ctx.bot.handle(message, request).await {
                let _ = self
                    .ctx
                    .poster
                    .post_json("http://platform/reply", "token", &json!({ "text": answer }))
                    .await;
            }
            WebhookResponse::ok()
        }
    }

    impl ConfigurableAdapter for EchoAdapter {
        type Config = EchoConfig;

        fn name() -> &'static str {
            "echo"
        }

        fn from_config(config: EchoConfig, ctx: AdapterContext) -> AdapterResult<Self> {
            if config.reject {
                return Err(AdapterError::InvalidConfig("rejected".to_string()));
            }
            Ok(Self {
                path: config.path,
                ctx,
            })
        }

        fn path(&self) -> &str {
            &self.path
        }
    }

    fn shout(
        msg: CanonicalMessage,
        _req: Arc<WebhookRequest>,
    ) -> impl Future<Output = anyhow::Result<String>> {
        async move { Ok(msg.text.to_uppercase()) }
    }

    fn local_config() -> CourierConfig {
        let mut config = CourierConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config
    }

    #[tokio::test]
    async fn test_register_uses_adapter_section() {
        let mut config = local_config();
        config.adapters.insert(
            "echo".to_string(),
            figment::value::Value::serialize(json!({"path": "/hooks/echo"})).unwrap(),
        );
        let runtime = CourierRuntime::with_poster(&config, Arc::new(NullPoster));

        runtime.register_adapter::<EchoAdapter>(shout).await.unwrap();
        assert_eq!(runtime.adapter_count().await, 1);

        let adapters = runtime.adapters.read().await;
        assert_eq!(adapters[0].path, "/hooks/echo");
    }

    #[tokio::test]
    async fn test_duplicate_adapter_rejected() {
        let runtime = CourierRuntime::with_poster(&local_config(), Arc::new(NullPoster));
        runtime.register_adapter::<EchoAdapter>(shout).await.unwrap();

        let err = runtime
            .register_adapter::<EchoAdapter>(shout)
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::AdapterExists(name) if name == "echo"));
    }

    #[tokio::test]
    async fn test_adapter_errors_surface() {
        let mut config = local_config();
        config.adapters.insert(
            "echo".to_string(),
            figment::value::Value::serialize(json!({"reject": true})).unwrap(),
        );
        let runtime = CourierRuntime::with_poster(&config, Arc::new(NullPoster));

        let err = runtime
            .register_adapter::<EchoAdapter>(shout)
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Adapter(_)));
    }

    #[tokio::test]
    async fn test_start_serves_registered_adapters() {
        let poster = Arc::new(RecordingPoster::default());
        let runtime = CourierRuntime::with_poster(&local_config(), poster.clone());
        runtime.register_adapter::<EchoAdapter>(shout).await.unwrap();

        runtime.start().await.unwrap();
        assert!(runtime.is_running().await);
        let addr = runtime.local_addr().await.unwrap();

        let client = HttpClient::new().unwrap();
        client
            .post_json(&format!("http://{addr}/echo"), "any", &json!({"text": "hi"}))
            .await
            .unwrap();

        assert_eq!(
            poster.calls.lock().unwrap().as_slice(),
            [("http://platform/reply".to_string(), json!({"text": "HI"}))]
        );

        runtime.stop().await.unwrap();
        assert!(!runtime.is_running().await);
    }

    #[tokio::test]
    async fn test_start_without_adapters_fails() {
        let runtime = CourierRuntime::with_poster(&local_config(), Arc::new(NullPoster));
        assert!(runtime.start().await.is_err());
        assert!(!runtime.is_running().await);
    }
}
