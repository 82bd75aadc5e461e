//! Configuration types for the LINE adapter.
//!
//! Read from the `adapters.line` section of the global configuration:
//!
//! ```toml
//! [adapters.line]
//! path = "/line"
//! # Stored base64-encoded unless credential_encoding = "plain".
//! channel_secret = "QUJD"
//! channel_access_token = "MTIzNDU="
//! ```
//!
//! Both credentials can also come from the environment, e.g.
//! `COURIER_ADAPTERS__LINE__CHANNEL_SECRET`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::credentials::CredentialEncoding;
use crate::reply::REPLY_ENDPOINT;

/// LINE adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    /// Webhook path the adapter is mounted at.
    pub path: String,

    /// Channel secret used to check webhook signatures.
    ///
    /// Signature checks are skipped when unset.
    pub channel_secret: Option<String>,

    /// Channel access token used to authenticate replies.
    pub channel_access_token: Option<String>,

    /// How the two credentials above are stored.
    pub credential_encoding: CredentialEncoding,

    /// Reply endpoint; only changed to point at a test double.
    pub reply_endpoint: String,

    /// Timeout for reply calls in milliseconds, overriding the runtime's
    /// network timeout.
    pub timeout_ms: Option<u64>,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            path: "/line".to_string(),
            channel_secret: None,
            channel_access_token: None,
            credential_encoding: CredentialEncoding::default(),
            reply_endpoint: REPLY_ENDPOINT.to_string(),
            timeout_ms: None,
        }
    }
}

impl LineConfig {
    /// Returns the reply timeout override, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: LineConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.path, "/line");
        assert_eq!(config.reply_endpoint, REPLY_ENDPOINT);
        assert_eq!(config.credential_encoding, CredentialEncoding::Base64);
        assert!(config.channel_secret.is_none());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
path: /webhooks/line
channel_secret: QUJD
channel_access_token: "12345"
credential_encoding: plain
reply_endpoint: http://127.0.0.1:9000/reply
timeout_ms: 2500
"#;

        let config: LineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.path, "/webhooks/line");
        assert_eq!(config.channel_secret.as_deref(), Some("QUJD"));
        assert_eq!(config.channel_access_token.as_deref(), Some("12345"));
        assert_eq!(config.credential_encoding, CredentialEncoding::Plain);
        assert_eq!(config.reply_endpoint, "http://127.0.0.1:9000/reply");
        assert_eq!(config.timeout(), Some(Duration::from_millis(2500)));
    }
}
