//! LINE adapter for the Courier runtime.
//!
//! The adapter is built from the `adapters.line` configuration section and
//! mounted on the runtime's webhook listener:
//!
//! ```rust,ignore
//! use courier_adapter_line::LineAdapter;
//! use courier_runtime::CourierRuntime;
//!
//! let runtime = CourierRuntime::new()?;
//! runtime.register_adapter::<LineAdapter>(bot).await?;
//! runtime.run().await?;
//! ```
//!
//! # Programmatic Usage
//!
//! ```rust,ignore
//! let adapter = LineAdapter::new(config, Arc::new(bot), poster);
//! let handle = courier_transport::listen("0.0.0.0:8080", adapter.path(), Arc::new(adapter)).await?;
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use courier_core::{
    AdapterContext, AdapterError, AdapterResult, BotHandler, ConfigurableAdapter, JsonPoster,
    WebhookHandler, WebhookRequest, WebhookResponse,
};
use courier_transport::HttpClient;
use tracing::{debug, info};

use crate::config::LineConfig;
use crate::webhook::LineWebhook;

/// The LINE Messaging API adapter.
#[derive(Debug)]
pub struct LineAdapter {
    path: String,
    webhook: LineWebhook,
}

impl LineAdapter {
    /// Creates an adapter replying through `poster`.
    pub fn new(config: LineConfig, bot: Arc<dyn BotHandler>, poster: Arc<dyn JsonPoster>) -> Self {
        let mut builder = LineWebhook::builder(bot, poster)
            .credentials(config.credential_encoding.decoder())
            .reply_endpoint(config.reply_endpoint);
        if let Some(secret) = config.channel_secret {
            builder = builder.channel_secret(secret);
        }
        if let Some(token) = config.channel_access_token {
            builder = builder.channel_access_token(token);
        }

        Self {
            path: config.path,
            webhook: builder.build(),
        }
    }

    /// Returns the webhook pipeline.
    pub fn webhook(&self) -> &LineWebhook {
        &self.webhook
    }
}

impl ConfigurableAdapter for LineAdapter {
    type Config = LineConfig;

    fn name() -> &'static str {
        "line"
    }

    fn from_config(config: LineConfig, ctx: AdapterContext) -> AdapterResult<Self> {
        if config.path.is_empty() {
            return Err(AdapterError::InvalidConfig(
                "adapters.line.path must not be empty".to_string(),
            ));
        }
        if config.channel_secret.is_none() {
            info!("No channel secret configured, webhook signatures will not be checked");
        }

        let poster = match config.timeout() {
            Some(timeout) => Arc::new(HttpClient::with_timeout(timeout)?) as Arc<dyn JsonPoster>,
            None => ctx.poster,
        };
        Ok(Self::new(config, ctx.bot, poster))
    }

    fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl WebhookHandler for LineAdapter {
    async fn on_request(&self, request: WebhookRequest) -> WebhookResponse {
        match self.webhook.handle(request).await {
            Ok(ack) => WebhookResponse::with_status(200, ack),
            Err(err) => {
                debug!(error = %err, "Webhook delivery rejected");
                WebhookResponse::with_status(err.status(), err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::{CanonicalMessage, TransportResult};
    use serde_json::{Value, json};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingPoster {
        calls: Mutex<Vec<(String, String, Value)>>,
    }

    #[async_trait]
    impl JsonPoster for RecordingPoster {
        async fn post_json(&self, url: &str, bearer: &str, body: &Value) -> TransportResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), bearer.to_string(), body.clone()));
            Ok(())
        }
    }

    fn context(poster: Arc<RecordingPoster>) -> AdapterContext {
        let bot = |msg: CanonicalMessage, _req: Arc<WebhookRequest>| async move {
            Ok::<_, anyhow::Error>(format!("echo: {}", msg.text))
        };
        AdapterContext::new(Arc::new(bot), poster)
    }

    #[test]
    fn test_from_config() {
        let adapter =
            LineAdapter::from_config(LineConfig::default(), context(Arc::default())).unwrap();
        assert_eq!(LineAdapter::name(), "line");
        assert_eq!(adapter.path(), "/line");

        let config = LineConfig {
            path: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            LineAdapter::from_config(config, context(Arc::default())),
            Err(AdapterError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_responses() {
        let poster = Arc::new(RecordingPoster::default());
        let config: LineConfig = serde_yaml::from_str(
            r#"
channel_secret: QUJD
channel_access_token: token
credential_encoding: plain
reply_endpoint: http://127.0.0.1:9/reply
"#,
        )
        .unwrap();
        // Plain credentials: the secret is used as-is.
        let secret = "QUJD";
        let adapter = LineAdapter::from_config(config, context(poster.clone())).unwrap();

        let body = json!({"events": [{
            "type": "message",
            "replyToken": "r1",
            "source": {"userId": "U1"},
            "message": {"type": "text", "text": "hi"}
        }]})
        .to_string();
        let signature = crate::signature::sign(secret.as_bytes(), body.as_bytes());

        let request = WebhookRequest::new(body.clone()).with_header("X-Line-Signature", signature);
        let response = adapter.on_request(request).await;
        assert_eq!(response, WebhookResponse::ok());

        let calls = poster.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "http://127.0.0.1:9/reply");
        assert_eq!(calls[0].1, "token");
        assert_eq!(calls[0].2["messages"][0]["text"], "echo: hi");

        let response = adapter.on_request(WebhookRequest::new(body)).await;
        assert_eq!(response.status, 401);
        assert_eq!(response.body, "X-Line-Signature does not match");
    }
}
