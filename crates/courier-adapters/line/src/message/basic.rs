//! Single-constructor message kinds.

use serde::Serialize;
use serde_json::Number;

use super::validate::{self, IntoNumber};
use super::{OutboundMessage, ValidationResult};

/// Longest text message.
pub const MAX_TEXT_LENGTH: usize = 2000;

const MAX_LOCATION_FIELD_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextMessage {
    text: String,
}

impl TextMessage {
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMessage {
    original_content_url: String,
    preview_image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMessage {
    original_content_url: String,
    preview_image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioMessage {
    original_content_url: String,
    /// Length in milliseconds.
    duration: Number,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationMessage {
    title: String,
    address: String,
    latitude: Number,
    longitude: Number,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerMessage {
    package_id: String,
    sticker_id: String,
}

impl OutboundMessage {
    /// A text message of at most 2000 characters.
    pub fn text(text: &str) -> ValidationResult<Self> {
        Ok(Self::Text(TextMessage {
            text: validate::text("text", text, MAX_TEXT_LENGTH)?,
        }))
    }

    /// Wraps an already bounded chunk without re-validating it.
    pub(crate) fn text_unchecked(text: impl Into<String>) -> Self {
        Self::Text(TextMessage { text: text.into() })
    }

    /// An image. The preview defaults to the original image.
    pub fn image(
        original_content_url: &str,
        preview_image_url: Option<&str>,
    ) -> ValidationResult<Self> {
        let original_content_url = validate::url("originalContentUrl", original_content_url)?;
        let preview_image_url = match preview_image_url {
            Some(preview) => validate::url("previewImageUrl", preview)?,
            None => original_content_url.clone(),
        };
        Ok(Self::Image(ImageMessage {
            original_content_url,
            preview_image_url,
        }))
    }

    /// A video with its preview image.
    pub fn video(original_content_url: &str, preview_image_url: &str) -> ValidationResult<Self> {
        Ok(Self::Video(VideoMessage {
            original_content_url: validate::url("originalContentUrl", original_content_url)?,
            preview_image_url: validate::url("previewImageUrl", preview_image_url)?,
        }))
    }

    /// An audio clip. `duration` is in milliseconds.
    pub fn audio(original_content_url: &str, duration: impl IntoNumber) -> ValidationResult<Self> {
        Ok(Self::Audio(AudioMessage {
            original_content_url: validate::url("originalContentUrl", original_content_url)?,
            duration: validate::number("duration", duration)?,
        }))
    }

    /// A map pin.
    pub fn location(
        title: &str,
        address: &str,
        latitude: impl IntoNumber,
        longitude: impl IntoNumber,
    ) -> ValidationResult<Self> {
        Ok(Self::Location(LocationMessage {
            title: validate::text("title", title, MAX_LOCATION_FIELD_LENGTH)?,
            address: validate::text("address", address, MAX_LOCATION_FIELD_LENGTH)?,
            latitude: validate::number("latitude", latitude)?,
            longitude: validate::number("longitude", longitude)?,
        }))
    }

    /// A sticker from one of the platform's sticker packages.
    pub fn sticker(package_id: &str, sticker_id: &str) -> ValidationResult<Self> {
        validate::required("packageId", package_id)?;
        validate::required("stickerId", sticker_id)?;
        Ok(Self::Sticker(StickerMessage {
            package_id: package_id.to_string(),
            sticker_id: sticker_id.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ValidationError;
    use serde_json::json;

    const IMAGE: &str = "https://example.com/image.png";
    const PREVIEW: &str = "https://example.com/preview.png";

    fn too_long_url() -> String {
        format!("https://example.com/{}/", "a".repeat(980))
    }

    #[test]
    fn test_text() {
        let message = OutboundMessage::text("Hello").unwrap();
        assert_eq!(message.to_json(), json!({"type": "text", "text": "Hello"}));

        let err = OutboundMessage::text("").unwrap_err();
        assert!(err.to_string().contains("required"));

        let err = OutboundMessage::text(&"a".repeat(2001)).unwrap_err();
        assert!(err.to_string().contains("2000 characters"));
        assert!(OutboundMessage::text(&"a".repeat(2000)).is_ok());
    }

    #[test]
    fn test_image_preview_defaults_to_original() {
        let message = OutboundMessage::image(IMAGE, None).unwrap();
        assert_eq!(
            message.to_json(),
            json!({"type": "image", "originalContentUrl": IMAGE, "previewImageUrl": IMAGE})
        );

        let message = OutboundMessage::image(IMAGE, Some(PREVIEW)).unwrap();
        assert_eq!(message.to_json()["previewImageUrl"], PREVIEW);
    }

    #[test]
    fn test_image_rejects_bad_urls() {
        assert_eq!(
            OutboundMessage::image("not a url", None).unwrap_err(),
            ValidationError::InvalidUrl {
                field: "originalContentUrl"
            }
        );
        assert_eq!(
            OutboundMessage::image(IMAGE, Some(&too_long_url())).unwrap_err(),
            ValidationError::TooLong {
                field: "previewImageUrl",
                max: 1000
            }
        );
    }

    #[test]
    fn test_video_requires_preview() {
        let message = OutboundMessage::video(IMAGE, PREVIEW).unwrap();
        assert_eq!(
            message.to_json(),
            json!({"type": "video", "originalContentUrl": IMAGE, "previewImageUrl": PREVIEW})
        );
        assert_eq!(
            OutboundMessage::video(IMAGE, "").unwrap_err(),
            ValidationError::Required {
                field: "previewImageUrl"
            }
        );
    }

    #[test]
    fn test_audio_duration_is_numeric() {
        let message = OutboundMessage::audio(IMAGE, "20").unwrap();
        assert_eq!(
            message.to_json(),
            json!({"type": "audio", "originalContentUrl": IMAGE, "duration": 20})
        );
        assert_eq!(
            OutboundMessage::audio(IMAGE, "long").unwrap_err(),
            ValidationError::NotANumber { field: "duration" }
        );
    }

    #[test]
    fn test_location() {
        let message = OutboundMessage::location("Title", "Address", 20, "20").unwrap();
        assert_eq!(
            message.to_json(),
            json!({
                "type": "location",
                "title": "Title",
                "address": "Address",
                "latitude": 20,
                "longitude": 20
            })
        );

        let err = OutboundMessage::location(&"t".repeat(101), "Address", 20, 20).unwrap_err();
        assert_eq!(err.to_string(), "title can not be more than 100 characters");

        let err = OutboundMessage::location("Title", "", 20, 20).unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "address" });

        let err = OutboundMessage::location("Title", "Address", 20, "north").unwrap_err();
        assert_eq!(err, ValidationError::NotANumber { field: "longitude" });
    }

    #[test]
    fn test_sticker_requires_ids() {
        assert!(OutboundMessage::sticker("1", "1").is_ok());
        assert_eq!(
            OutboundMessage::sticker("", "1").unwrap_err(),
            ValidationError::Required { field: "packageId" }
        );
        assert_eq!(
            OutboundMessage::sticker("1", "").unwrap_err(),
            ValidationError::Required { field: "stickerId" }
        );
    }
}
