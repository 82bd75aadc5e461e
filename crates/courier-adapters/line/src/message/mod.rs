//! Outbound LINE messages.
//!
//! Every message is validated when it is built, so an [`OutboundMessage`]
//! always satisfies the platform's field and count limits. Simple kinds are
//! built by a single constructor; image maps and templates collect their
//! actions in a builder first.
//!
//! ```rust,ignore
//! use courier_adapter_line::message::{ButtonsBuilder, OutboundMessage, TemplateAction};
//!
//! let hello = OutboundMessage::text("Hello")?;
//!
//! let mut menu = ButtonsBuilder::new("What next?", "Main menu")?;
//! menu.title("Menu")?
//!     .add_action(TemplateAction::postback("Start", "start", None)?)?
//!     .add_action(TemplateAction::uri("Docs", "https://example.com/docs")?)?;
//! let menu = menu.build()?;
//! ```

mod basic;
mod imagemap;
mod template;
pub(crate) mod validate;

use courier_core::{BotReply, ReplyItem};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use basic::{
    AudioMessage, ImageMessage, LocationMessage, MAX_TEXT_LENGTH, StickerMessage, TextMessage,
    VideoMessage,
};
pub use imagemap::{
    BaseSize, ImagemapAction, ImagemapArea, ImagemapBuilder, ImagemapMessage, MAX_IMAGEMAP_ACTIONS,
};
pub use template::{
    ButtonsBuilder, CarouselBuilder, CarouselColumn, ConfirmBuilder, Template, TemplateAction,
    TemplateMessage,
};
pub use validate::{IntoNumber, MAX_ALT_TEXT_LENGTH, MAX_URL_LENGTH};

// =============================================================================
// Errors
// =============================================================================

/// A violated message constraint.
///
/// Field names are the wire names, so errors read the way the platform
/// documents its limits.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// A field exceeded its maximum length.
    #[error("{field} can not be more than {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// A field exceeded the tighter limit applied when a title or image is set.
    #[error("{field} can not be more than {max} characters when with an image or title")]
    TooLongWithMedia { field: &'static str, max: usize },

    /// A field was not an absolute URL.
    #[error("{field} must be a valid URL")]
    InvalidUrl { field: &'static str },

    /// A field was not a finite number.
    #[error("{field} must be a finite number")]
    NotANumber { field: &'static str },

    /// Adding one more element would exceed the container's cap.
    #[error("there can not be more than {max} {items}")]
    TooMany { items: &'static str, max: usize },

    /// A builder was finalized or mutated before its first element was added.
    #[error("add at least one {item} first")]
    Empty { item: &'static str },
}

/// Result type for message construction.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// OutboundMessage
// =============================================================================

/// One platform-ready message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundMessage {
    Text(TextMessage),
    Image(ImageMessage),
    Video(VideoMessage),
    Audio(AudioMessage),
    Location(LocationMessage),
    Sticker(StickerMessage),
    Imagemap(ImagemapMessage),
    Template(TemplateMessage),
}

impl OutboundMessage {
    /// Returns the wire `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Image(_) => "image",
            Self::Video(_) => "video",
            Self::Audio(_) => "audio",
            Self::Location(_) => "location",
            Self::Sticker(_) => "sticker",
            Self::Imagemap(_) => "imagemap",
            Self::Template(_) => "template",
        }
    }

    /// Returns the message as its JSON wire form.
    pub fn to_json(&self) -> Value {
        // Every field is a string, a number, or a list of those.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<OutboundMessage> for ReplyItem {
    fn from(message: OutboundMessage) -> Self {
        ReplyItem::Payload(message.to_json())
    }
}

impl From<OutboundMessage> for BotReply {
    fn from(message: OutboundMessage) -> Self {
        BotReply::Payload(message.to_json())
    }
}
