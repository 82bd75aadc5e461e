//! Webhook request/response types shared by transports and adapters.

use std::collections::HashMap;

use serde_json::Value;

// =============================================================================
// WebhookRequest
// =============================================================================

/// An inbound webhook call, as seen by an adapter.
///
/// Header names are stored lowercased so lookups are case-insensitive.
/// The raw body is kept byte-exact for signature verification; `body` holds
/// the parsed JSON when the transport could parse it.
#[derive(Debug, Clone, Default)]
pub struct WebhookRequest {
    headers: HashMap<String, String>,
    /// The body exactly as received.
    pub raw_body: Vec<u8>,
    /// The body parsed as JSON, or `None` when it was not valid JSON.
    pub body: Option<Value>,
}

impl WebhookRequest {
    /// Creates a request from a raw body, parsing it as JSON if possible.
    pub fn new(raw_body: impl Into<Vec<u8>>) -> Self {
        let raw_body = raw_body.into();
        let body = serde_json::from_slice(&raw_body).ok();
        Self {
            headers: HashMap::new(),
            raw_body,
            body,
        }
    }

    /// Creates a request from an already-parsed JSON body.
    ///
    /// The raw body is the compact serialization of `body`.
    pub fn from_json(body: Value) -> Self {
        Self {
            headers: HashMap::new(),
            raw_body: body.to_string().into_bytes(),
            body: Some(body),
        }
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert_header(name, value);
        self
    }

    /// Inserts a header, replacing any previous value.
    pub fn insert_header(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Looks up a header by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns every header, keyed by lowercased name.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

// =============================================================================
// WebhookResponse
// =============================================================================

/// What the adapter answers to the webhook caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    /// HTTP status code.
    pub status: u16,
    /// Plain-text body.
    pub body: String,
}

impl WebhookResponse {
    /// The acknowledgement sent after every accepted batch.
    pub fn ok() -> Self {
        Self {
            status: 200,
            body: "ok".to_string(),
        }
    }

    /// Creates a response with an arbitrary status.
    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_lookup_ignores_case() {
        let req = WebhookRequest::new(b"{}".to_vec()).with_header("X-Line-Signature", "abc");
        assert_eq!(req.header("x-line-signature"), Some("abc"));
        assert_eq!(req.header("X-LINE-SIGNATURE"), Some("abc"));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn test_new_parses_json_when_possible() {
        let req = WebhookRequest::new(br#"{"events":[]}"#.to_vec());
        assert_eq!(req.body, Some(json!({"events": []})));

        let req = WebhookRequest::new(b"not json".to_vec());
        assert!(req.body.is_none());
        assert_eq!(req.raw_body, b"not json");
    }

    #[test]
    fn test_from_json_keeps_compact_raw_body() {
        let req = WebhookRequest::from_json(json!({"events": [1]}));
        assert_eq!(req.raw_body, br#"{"events":[1]}"#);
    }
}
