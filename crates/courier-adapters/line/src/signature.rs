//! Webhook signature checks.
//!
//! LINE signs every webhook body with HMAC-SHA256 keyed by the channel
//! secret and sends the base64 digest in the `X-Line-Signature` header.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the body signature, lowercased.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

fn mac(secret: &[u8], body: &[u8]) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(body);
    mac
}

/// Signs `body` and returns the base64 signature.
pub fn sign(secret: &[u8], body: &[u8]) -> String {
    STANDARD.encode(mac(secret, body).finalize().into_bytes())
}

/// Returns `true` if `signature` is the signature of `body` under `secret`.
///
/// The digest comparison runs in constant time.
pub fn validate_signature(body: &[u8], secret: &[u8], signature: &str) -> bool {
    let Ok(claimed) = STANDARD.decode(signature.trim()) else {
        return false;
    };
    mac(secret, body).verify_slice(&claimed).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{"events":[{"object":"message","replyToken":"a98h","source":{"userId":"biho98yh","type":"user"},"timestamp":1485969178383,"message":{"type":"text","id":"9fh9u9","text":"hello"}}]}"#;
    const SIGNATURE: &str = "BYFRpP6w8/KWYMKjL90uFK/pJsAdnL5/B8TY8i0GD5w=";

    #[test]
    fn test_known_signature() {
        assert_eq!(sign(b"ABC", BODY.as_bytes()), SIGNATURE);
        assert!(validate_signature(BODY.as_bytes(), b"ABC", SIGNATURE));
    }

    #[test]
    fn test_wrong_secret_or_body() {
        assert!(!validate_signature(BODY.as_bytes(), b"ABD", SIGNATURE));

        let mut body = BODY.as_bytes().to_vec();
        body[20] ^= 1;
        assert!(!validate_signature(&body, b"ABC", SIGNATURE));
    }

    #[test]
    fn test_malformed_signature() {
        assert!(!validate_signature(BODY.as_bytes(), b"ABC", "not base64!"));
        assert!(!validate_signature(BODY.as_bytes(), b"ABC", ""));
        assert!(!validate_signature(BODY.as_bytes(), b"ABC", "QUJD"));
    }
}
