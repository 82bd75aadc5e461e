//! Image map messages: one base image with tappable regions.

use serde::Serialize;
use serde_json::Number;

use super::validate::{self, IntoNumber, MAX_ALT_TEXT_LENGTH};
use super::{OutboundMessage, ValidationError, ValidationResult};

/// Most actions a single image map can carry.
pub const MAX_IMAGEMAP_ACTIONS: usize = 50;

const MAX_MESSAGE_ACTION_TEXT_LENGTH: usize = 400;

/// Width and height of the base image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseSize {
    pub width: Number,
    pub height: Number,
}

/// A tappable rectangle, in base image pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagemapArea {
    x: Number,
    y: Number,
    width: Number,
    height: Number,
}

impl ImagemapArea {
    pub fn new(
        x: impl IntoNumber,
        y: impl IntoNumber,
        width: impl IntoNumber,
        height: impl IntoNumber,
    ) -> ValidationResult<Self> {
        Ok(Self {
            x: validate::number("area.x", x)?,
            y: validate::number("area.y", y)?,
            width: validate::number("area.width", width)?,
            height: validate::number("area.height", height)?,
        })
    }
}

/// What happens when an area is tapped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ImagemapAction {
    /// Opens a link.
    #[serde(rename_all = "camelCase")]
    Uri { link_uri: String, area: ImagemapArea },
    /// Sends a message on behalf of the user.
    Message { text: String, area: ImagemapArea },
}

impl ImagemapAction {
    pub fn uri(link_uri: &str, area: ImagemapArea) -> ValidationResult<Self> {
        Ok(Self::Uri {
            link_uri: validate::url("linkUri", link_uri)?,
            area,
        })
    }

    pub fn message(text: &str, area: ImagemapArea) -> ValidationResult<Self> {
        Ok(Self::Message {
            text: validate::text("text", text, MAX_MESSAGE_ACTION_TEXT_LENGTH)?,
            area,
        })
    }
}

/// A finished image map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagemapMessage {
    base_url: String,
    alt_text: String,
    base_size: BaseSize,
    actions: Vec<ImagemapAction>,
}

/// Collects the actions of an image map.
///
/// ```rust,ignore
/// let mut map = ImagemapBuilder::new("https://example.com/map", 1040, 1040, "Map")?;
/// map.add_uri_action("https://example.com", ImagemapArea::new(0, 0, 520, 1040)?)?
///     .add_message_action("right side", ImagemapArea::new(520, 0, 520, 1040)?)?;
/// let message = map.build()?;
/// ```
#[derive(Debug, Clone)]
pub struct ImagemapBuilder {
    message: ImagemapMessage,
}

impl ImagemapBuilder {
    /// Starts an image map over the image at `base_url`.
    pub fn new(
        base_url: &str,
        width: impl IntoNumber,
        height: impl IntoNumber,
        alt_text: &str,
    ) -> ValidationResult<Self> {
        let base_url = validate::url("baseUrl", base_url)?;
        let base_size = BaseSize {
            width: validate::number("width", width)?,
            height: validate::number("height", height)?,
        };
        let alt_text = validate::text("altText", alt_text, MAX_ALT_TEXT_LENGTH)?;

        Ok(Self {
            message: ImagemapMessage {
                base_url,
                alt_text,
                base_size,
                actions: Vec::new(),
            },
        })
    }

    /// Adds an already built action.
    pub fn add_action(&mut self, action: ImagemapAction) -> ValidationResult<&mut Self> {
        if self.message.actions.len() >= MAX_IMAGEMAP_ACTIONS {
            return Err(ValidationError::TooMany {
                items: "actions",
                max: MAX_IMAGEMAP_ACTIONS,
            });
        }
        self.message.actions.push(action);
        Ok(self)
    }

    /// Adds an area that opens `link_uri`.
    pub fn add_uri_action(
        &mut self,
        link_uri: &str,
        area: ImagemapArea,
    ) -> ValidationResult<&mut Self> {
        self.add_action(ImagemapAction::uri(link_uri, area)?)
    }

    /// Adds an area that sends `text`.
    pub fn add_message_action(
        &mut self,
        text: &str,
        area: ImagemapArea,
    ) -> ValidationResult<&mut Self> {
        self.add_action(ImagemapAction::message(text, area)?)
    }

    /// Finishes the image map. At least one action is required.
    pub fn build(self) -> ValidationResult<OutboundMessage> {
        if self.message.actions.is_empty() {
            return Err(ValidationError::Empty { item: "action" });
        }
        Ok(OutboundMessage::Imagemap(self.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "https://example.com/bot/images/rm001";

    fn area() -> ImagemapArea {
        ImagemapArea::new(0, 0, 520, "1040").unwrap()
    }

    #[test]
    fn test_imagemap_wire_form() {
        let mut map = ImagemapBuilder::new(BASE, 1040, "1040", "this is an imagemap").unwrap();
        map.add_uri_action("https://example.com/", area())
            .unwrap()
            .add_message_action("hello", area())
            .unwrap();

        let area = json!({"x": 0, "y": 0, "width": 520, "height": 1040});
        assert_eq!(
            map.build().unwrap().to_json(),
            json!({
                "type": "imagemap",
                "baseUrl": BASE,
                "altText": "this is an imagemap",
                "baseSize": {"width": 1040, "height": 1040},
                "actions": [
                    {"type": "uri", "linkUri": "https://example.com/", "area": area},
                    {"type": "message", "text": "hello", "area": area}
                ]
            })
        );
    }

    #[test]
    fn test_imagemap_constructor_validation() {
        assert_eq!(
            ImagemapBuilder::new("rm001", 1040, 1040, "alt").unwrap_err(),
            ValidationError::InvalidUrl { field: "baseUrl" }
        );
        assert_eq!(
            ImagemapBuilder::new(BASE, "wide", 1040, "alt").unwrap_err(),
            ValidationError::NotANumber { field: "width" }
        );
        assert_eq!(
            ImagemapBuilder::new(BASE, 1040, 1040, &"a".repeat(401)).unwrap_err(),
            ValidationError::TooLong {
                field: "altText",
                max: 400
            }
        );
    }

    #[test]
    fn test_area_must_be_numeric() {
        assert_eq!(
            ImagemapArea::new(0, "top", 10, 10).unwrap_err(),
            ValidationError::NotANumber { field: "area.y" }
        );
    }

    #[test]
    fn test_imagemap_needs_an_action() {
        let map = ImagemapBuilder::new(BASE, 1040, 1040, "alt").unwrap();
        assert_eq!(
            map.build().unwrap_err(),
            ValidationError::Empty { item: "action" }
        );
    }

    #[test]
    fn test_imagemap_action_cap() {
        let mut map = ImagemapBuilder::new(BASE, 1040, 1040, "alt").unwrap();
        for _ in 0..MAX_IMAGEMAP_ACTIONS {
            map.add_message_action("tap", area()).unwrap();
        }
        let err = map.add_message_action("tap", area()).unwrap_err();
        assert_eq!(err.to_string(), "there can not be more than 50 actions");
        assert!(map.build().is_ok());
    }

    #[test]
    fn test_action_validation() {
        assert_eq!(
            ImagemapAction::uri("example", area()).unwrap_err(),
            ValidationError::InvalidUrl { field: "linkUri" }
        );
        assert_eq!(
            ImagemapAction::message(&"a".repeat(401), area()).unwrap_err(),
            ValidationError::TooLong {
                field: "text",
                max: 400
            }
        );
    }
}
