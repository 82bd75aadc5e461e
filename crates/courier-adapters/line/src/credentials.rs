//! Decoding of stored channel credentials.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use courier_core::{CredentialDecoder, CredentialError, CredentialResult};
use serde::{Deserialize, Serialize};

/// Credentials stored base64-encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Credentials;

impl Base64Credentials {
    /// Encodes a plain value the way it is expected in configuration.
    pub fn encode(plain: &str) -> String {
        STANDARD.encode(plain)
    }
}

impl CredentialDecoder for Base64Credentials {
    fn decode(&self, encoded: &str) -> CredentialResult<String> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| CredentialError::Decode(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| CredentialError::Decode(e.to_string()))
    }
}

/// Credentials stored as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCredentials;

impl CredentialDecoder for PlainCredentials {
    fn decode(&self, encoded: &str) -> CredentialResult<String> {
        Ok(encoded.to_string())
    }
}

/// How credentials are stored in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialEncoding {
    #[default]
    Base64,
    Plain,
}

impl CredentialEncoding {
    /// Returns the matching decoder.
    pub fn decoder(self) -> Arc<dyn CredentialDecoder> {
        match self {
            Self::Base64 => Arc::new(Base64Credentials),
            Self::Plain => Arc::new(PlainCredentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_round_trip() {
        assert_eq!(Base64Credentials::encode("12345"), "MTIzNDU=");
        assert_eq!(Base64Credentials.decode("MTIzNDU=").unwrap(), "12345");
        assert_eq!(Base64Credentials.decode("QUJD\n").unwrap(), "ABC");
    }

    #[test]
    fn test_base64_rejects_garbage() {
        assert!(matches!(
            Base64Credentials.decode("%%%"),
            Err(CredentialError::Decode(_))
        ));
        // Valid base64, invalid UTF-8.
        assert!(Base64Credentials.decode("/w==").is_err());
    }

    #[test]
    fn test_encoding_selects_decoder() {
        assert_eq!(CredentialEncoding::Plain.decoder().decode("QUJD").unwrap(), "QUJD");
        assert_eq!(CredentialEncoding::Base64.decoder().decode("QUJD").unwrap(), "ABC");
    }
}
