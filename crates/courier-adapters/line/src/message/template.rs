//! Template messages: buttons, confirm dialogs and carousels.
//!
//! All three share the same [`TemplateAction`] kinds. Buttons and confirm
//! templates take their actions directly; a carousel takes them per column,
//! always on the column added last.

use serde::Serialize;

use super::validate::{self, MAX_ALT_TEXT_LENGTH};
use super::{OutboundMessage, ValidationError, ValidationResult};

const MAX_LABEL_LENGTH: usize = 20;
const MAX_ACTION_TEXT_LENGTH: usize = 300;
const MAX_TITLE_LENGTH: usize = 40;
/// Text limit once a title or image takes part of the card.
const MAX_TEXT_WITH_MEDIA_LENGTH: usize = 60;

const MAX_BUTTONS_TEXT_LENGTH: usize = 160;
const MAX_BUTTONS_ACTIONS: usize = 4;

const MAX_CONFIRM_TEXT_LENGTH: usize = 240;
const MAX_CONFIRM_ACTIONS: usize = 2;

const MAX_COLUMN_TEXT_LENGTH: usize = 120;
const MAX_COLUMN_ACTIONS: usize = 3;
const MAX_CAROUSEL_COLUMNS: usize = 5;

// =============================================================================
// Actions
// =============================================================================

/// A button on a template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TemplateAction {
    /// Sends `text` as the user.
    Message { label: String, text: String },
    /// Sends `data` back to the bot as a postback event.
    Postback {
        label: String,
        data: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    /// Opens `uri`.
    Uri { label: String, uri: String },
}

impl TemplateAction {
    pub fn message(label: &str, text: &str) -> ValidationResult<Self> {
        Ok(Self::Message {
            label: validate::text("label", label, MAX_LABEL_LENGTH)?,
            text: validate::text("text", text, MAX_ACTION_TEXT_LENGTH)?,
        })
    }

    /// A postback button. `text`, when given and non-empty, is also shown in
    /// the chat.
    pub fn postback(label: &str, data: &str, text: Option<&str>) -> ValidationResult<Self> {
        let text = match text.filter(|text| !text.is_empty()) {
            Some(text) => {
                validate::max_len("text", text, MAX_ACTION_TEXT_LENGTH)?;
                Some(text.to_string())
            }
            None => None,
        };
        Ok(Self::Postback {
            label: validate::text("label", label, MAX_LABEL_LENGTH)?,
            data: validate::text("data", data, MAX_ACTION_TEXT_LENGTH)?,
            text,
        })
    }

    pub fn uri(label: &str, uri: &str) -> ValidationResult<Self> {
        Ok(Self::Uri {
            label: validate::text("label", label, MAX_LABEL_LENGTH)?,
            uri: validate::url("uri", uri)?,
        })
    }
}

fn push_action(
    actions: &mut Vec<TemplateAction>,
    action: TemplateAction,
    max: usize,
) -> ValidationResult<()> {
    if actions.len() >= max {
        return Err(ValidationError::TooMany {
            items: "actions",
            max,
        });
    }
    actions.push(action);
    Ok(())
}

/// Applies the tighter text limit of a card that shows a title or image.
fn check_text_with_media(text: &str) -> ValidationResult<()> {
    if text.chars().count() > MAX_TEXT_WITH_MEDIA_LENGTH {
        return Err(ValidationError::TooLongWithMedia {
            field: "text",
            max: MAX_TEXT_WITH_MEDIA_LENGTH,
        });
    }
    Ok(())
}

// =============================================================================
// Wire types
// =============================================================================

/// A finished template message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMessage {
    alt_text: String,
    template: Template,
}

impl TemplateMessage {
    pub fn alt_text(&self) -> &str {
        &self.alt_text
    }

    pub fn template(&self) -> &Template {
        &self.template
    }
}

/// The body of a template message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Template {
    #[serde(rename_all = "camelCase")]
    Buttons {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        thumbnail_image_url: Option<String>,
        actions: Vec<TemplateAction>,
    },
    Confirm {
        text: String,
        actions: Vec<TemplateAction>,
    },
    Carousel { columns: Vec<CarouselColumn> },
}

/// One card of a carousel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselColumn {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail_image_url: Option<String>,
    actions: Vec<TemplateAction>,
}

fn finish(alt_text: String, template: Template) -> OutboundMessage {
    OutboundMessage::Template(TemplateMessage { alt_text, template })
}

// =============================================================================
// Buttons
// =============================================================================

/// A card with text, an optional title and image, and up to four buttons.
#[derive(Debug, Clone)]
pub struct ButtonsBuilder {
    alt_text: String,
    text: String,
    title: Option<String>,
    thumbnail_image_url: Option<String>,
    actions: Vec<TemplateAction>,
}

impl ButtonsBuilder {
    pub fn new(text: &str, alt_text: &str) -> ValidationResult<Self> {
        Ok(Self {
            text: validate::text("text", text, MAX_BUTTONS_TEXT_LENGTH)?,
            alt_text: validate::text("altText", alt_text, MAX_ALT_TEXT_LENGTH)?,
            title: None,
            thumbnail_image_url: None,
            actions: Vec::new(),
        })
    }

    /// Sets the title. The text must then fit in 60 characters.
    pub fn title(&mut self, title: &str) -> ValidationResult<&mut Self> {
        let title = validate::text("title", title, MAX_TITLE_LENGTH)?;
        check_text_with_media(&self.text)?;
        self.title = Some(title);
        Ok(self)
    }

    /// Sets the thumbnail image. The text must then fit in 60 characters.
    pub fn image(&mut self, url: &str) -> ValidationResult<&mut Self> {
        let url = validate::url("thumbnailImageUrl", url)?;
        check_text_with_media(&self.text)?;
        self.thumbnail_image_url = Some(url);
        Ok(self)
    }

    pub fn add_action(&mut self, action: TemplateAction) -> ValidationResult<&mut Self> {
        push_action(&mut self.actions, action, MAX_BUTTONS_ACTIONS)?;
        Ok(self)
    }

    pub fn add_message_button(&mut self, label: &str, text: &str) -> ValidationResult<&mut Self> {
        self.add_action(TemplateAction::message(label, text)?)
    }

    pub fn add_postback_button(
        &mut self,
        label: &str,
        data: &str,
        text: Option<&str>,
    ) -> ValidationResult<&mut Self> {
        self.add_action(TemplateAction::postback(label, data, text)?)
    }

    pub fn add_uri_button(&mut self, label: &str, uri: &str) -> ValidationResult<&mut Self> {
        self.add_action(TemplateAction::uri(label, uri)?)
    }

    /// Finishes the template. At least one action is required.
    pub fn build(self) -> ValidationResult<OutboundMessage> {
        if self.actions.is_empty() {
            return Err(ValidationError::Empty { item: "action" });
        }
        Ok(finish(
            self.alt_text,
            Template::Buttons {
                text: self.text,
                title: self.title,
                thumbnail_image_url: self.thumbnail_image_url,
                actions: self.actions,
            },
        ))
    }
}

// =============================================================================
// Confirm
// =============================================================================

/// A yes/no style dialog with one or two buttons.
#[derive(Debug, Clone)]
pub struct ConfirmBuilder {
    alt_text: String,
    text: String,
    actions: Vec<TemplateAction>,
}

impl ConfirmBuilder {
    pub fn new(text: &str, alt_text: &str) -> ValidationResult<Self> {
        Ok(Self {
            text: validate::text("text", text, MAX_CONFIRM_TEXT_LENGTH)?,
            alt_text: validate::text("altText", alt_text, MAX_ALT_TEXT_LENGTH)?,
            actions: Vec::new(),
        })
    }

    pub fn add_action(&mut self, action: TemplateAction) -> ValidationResult<&mut Self> {
        push_action(&mut self.actions, action, MAX_CONFIRM_ACTIONS)?;
        Ok(self)
    }

    pub fn add_message_button(&mut self, label: &str, text: &str) -> ValidationResult<&mut Self> {
        self.add_action(TemplateAction::message(label, text)?)
    }

    pub fn add_postback_button(
        &mut self,
        label: &str,
        data: &str,
        text: Option<&str>,
    ) -> ValidationResult<&mut Self> {
        self.add_action(TemplateAction::postback(label, data, text)?)
    }

    pub fn add_uri_button(&mut self, label: &str, uri: &str) -> ValidationResult<&mut Self> {
        self.add_action(TemplateAction::uri(label, uri)?)
    }

    pub fn build(self) -> ValidationResult<OutboundMessage> {
        if self.actions.is_empty() {
            return Err(ValidationError::Empty { item: "action" });
        }
        Ok(finish(
            self.alt_text,
            Template::Confirm {
                text: self.text,
                actions: self.actions,
            },
        ))
    }
}

// =============================================================================
// Carousel
// =============================================================================

/// Up to five cards shown side by side.
///
/// Column mutators act on the active column, which is the one added last:
///
/// ```rust,ignore
/// let mut carousel = CarouselBuilder::new("Our products")?;
/// carousel
///     .add_column("Coffee")?
///     .image("https://example.com/coffee.png")?
///     .add_postback_button("Buy", "buy=coffee", None)?
///     .add_column("Tea")?
///     .add_postback_button("Buy", "buy=tea", None)?;
/// let message = carousel.build()?;
/// ```
#[derive(Debug, Clone)]
pub struct CarouselBuilder {
    alt_text: String,
    columns: Vec<CarouselColumn>,
    active: Option<usize>,
}

impl CarouselBuilder {
    pub fn new(alt_text: &str) -> ValidationResult<Self> {
        Ok(Self {
            alt_text: validate::text("altText", alt_text, MAX_ALT_TEXT_LENGTH)?,
            columns: Vec::new(),
            active: None,
        })
    }

    /// Appends a column and makes it the active one.
    pub fn add_column(&mut self, text: &str) -> ValidationResult<&mut Self> {
        let text = validate::text("text", text, MAX_COLUMN_TEXT_LENGTH)?;
        if self.columns.len() >= MAX_CAROUSEL_COLUMNS {
            return Err(ValidationError::TooMany {
                items: "columns",
                max: MAX_CAROUSEL_COLUMNS,
            });
        }
        self.columns.push(CarouselColumn {
            text,
            title: None,
            thumbnail_image_url: None,
            actions: Vec::new(),
        });
        self.active = Some(self.columns.len() - 1);
        Ok(self)
    }

    fn active_column(&mut self) -> ValidationResult<&mut CarouselColumn> {
        self.active
            .and_then(|index| self.columns.get_mut(index))
            .ok_or(ValidationError::Empty { item: "column" })
    }

    /// Sets the active column's thumbnail image.
    pub fn image(&mut self, url: &str) -> ValidationResult<&mut Self> {
        let column = self.active_column()?;
        let url = validate::url("thumbnailImageUrl", url)?;
        check_text_with_media(&column.text)?;
        column.thumbnail_image_url = Some(url);
        Ok(self)
    }

    /// Sets the active column's title.
    pub fn title(&mut self, title: &str) -> ValidationResult<&mut Self> {
        let column = self.active_column()?;
        let title = validate::text("title", title, MAX_TITLE_LENGTH)?;
        check_text_with_media(&column.text)?;
        column.title = Some(title);
        Ok(self)
    }

    /// Adds an action to the active column.
    pub fn add_action(&mut self, action: TemplateAction) -> ValidationResult<&mut Self> {
        let column = self.active_column()?;
        if column.actions.len() >= MAX_COLUMN_ACTIONS {
            return Err(ValidationError::TooMany {
                items: "buttons in a column",
                max: MAX_COLUMN_ACTIONS,
            });
        }
        column.actions.push(action);
        Ok(self)
    }

    pub fn add_message_button(&mut self, label: &str, text: &str) -> ValidationResult<&mut Self> {
        self.add_action(TemplateAction::message(label, text)?)
    }

    pub fn add_postback_button(
        &mut self,
        label: &str,
        data: &str,
        text: Option<&str>,
    ) -> ValidationResult<&mut Self> {
        self.add_action(TemplateAction::postback(label, data, text)?)
    }

    pub fn add_uri_button(&mut self, label: &str, uri: &str) -> ValidationResult<&mut Self> {
        self.add_action(TemplateAction::uri(label, uri)?)
    }

    /// Number of columns added so far.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Finishes the carousel. At least one column is required.
    pub fn build(self) -> ValidationResult<OutboundMessage> {
        if self.columns.is_empty() {
            return Err(ValidationError::Empty { item: "column" });
        }
        Ok(finish(
            self.alt_text,
            Template::Carousel {
                columns: self.columns,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const IMAGE: &str = "https://example.com/image.png";

    #[test]
    fn test_actions_wire_form() {
        assert_eq!(
            serde_json::to_value(TemplateAction::message("Yes", "yes").unwrap()).unwrap(),
            json!({"type": "message", "label": "Yes", "text": "yes"})
        );
        assert_eq!(
            serde_json::to_value(TemplateAction::postback("Buy", "id=1", None).unwrap()).unwrap(),
            json!({"type": "postback", "label": "Buy", "data": "id=1"})
        );
        assert_eq!(
            serde_json::to_value(TemplateAction::postback("Buy", "id=1", Some("buy")).unwrap())
                .unwrap(),
            json!({"type": "postback", "label": "Buy", "data": "id=1", "text": "buy"})
        );
        assert_eq!(
            serde_json::to_value(TemplateAction::postback("Buy", "id=1", Some("")).unwrap())
                .unwrap(),
            json!({"type": "postback", "label": "Buy", "data": "id=1"})
        );
        assert_eq!(
            serde_json::to_value(TemplateAction::uri("Open", IMAGE).unwrap()).unwrap(),
            json!({"type": "uri", "label": "Open", "uri": IMAGE})
        );
    }

    #[test]
    fn test_action_limits() {
        let err = TemplateAction::message(&"l".repeat(21), "text").unwrap_err();
        assert_eq!(err.to_string(), "label can not be more than 20 characters");

        let err = TemplateAction::postback("Buy", &"d".repeat(301), None).unwrap_err();
        assert_eq!(err.to_string(), "data can not be more than 300 characters");

        let err = TemplateAction::postback("Buy", "d", Some(&"t".repeat(301))).unwrap_err();
        assert_eq!(err.to_string(), "text can not be more than 300 characters");

        assert_eq!(
            TemplateAction::uri("Open", "nowhere").unwrap_err(),
            ValidationError::InvalidUrl { field: "uri" }
        );
    }

    #[test]
    fn test_buttons() {
        let mut buttons = ButtonsBuilder::new("Pick one", "menu").unwrap();
        buttons
            .title("Menu")
            .unwrap()
            .image(IMAGE)
            .unwrap()
            .add_postback_button("Buy", "action=buy", None)
            .unwrap()
            .add_uri_button("View", IMAGE)
            .unwrap();

        assert_eq!(
            buttons.build().unwrap().to_json(),
            json!({
                "type": "template",
                "altText": "menu",
                "template": {
                    "type": "buttons",
                    "text": "Pick one",
                    "title": "Menu",
                    "thumbnailImageUrl": IMAGE,
                    "actions": [
                        {"type": "postback", "label": "Buy", "data": "action=buy"},
                        {"type": "uri", "label": "View", "uri": IMAGE}
                    ]
                }
            })
        );
    }

    #[test]
    fn test_buttons_text_limits() {
        let err = ButtonsBuilder::new(&"t".repeat(161), "alt").unwrap_err();
        assert_eq!(err.to_string(), "text can not be more than 160 characters");

        let mut buttons = ButtonsBuilder::new(&"t".repeat(61), "alt").unwrap();
        assert_eq!(
            buttons.title("Title").unwrap_err(),
            ValidationError::TooLongWithMedia {
                field: "text",
                max: 60
            }
        );
        assert!(buttons.image(IMAGE).is_err());

        let mut buttons = ButtonsBuilder::new(&"t".repeat(60), "alt").unwrap();
        assert!(buttons.title("Title").is_ok());
        assert_eq!(
            buttons.title(&"t".repeat(41)).unwrap_err().to_string(),
            "title can not be more than 40 characters"
        );
    }

    #[test]
    fn test_buttons_action_cap() {
        let mut buttons = ButtonsBuilder::new("text", "alt").unwrap();
        assert_eq!(
            buttons.clone().build().unwrap_err(),
            ValidationError::Empty { item: "action" }
        );
        for i in 0..4 {
            buttons
                .add_message_button("go", &format!("option {i}"))
                .unwrap();
        }
        let err = buttons.add_message_button("go", "option 5").unwrap_err();
        assert_eq!(err.to_string(), "there can not be more than 4 actions");
    }

    #[test]
    fn test_confirm() {
        let mut confirm = ConfirmBuilder::new("Are you sure?", "confirm").unwrap();
        confirm
            .add_message_button("Yes", "yes")
            .unwrap()
            .add_message_button("No", "no")
            .unwrap();
        assert_eq!(
            confirm.add_message_button("Maybe", "maybe").unwrap_err(),
            ValidationError::TooMany {
                items: "actions",
                max: 2
            }
        );

        assert_eq!(
            confirm.build().unwrap().to_json(),
            json!({
                "type": "template",
                "altText": "confirm",
                "template": {
                    "type": "confirm",
                    "text": "Are you sure?",
                    "actions": [
                        {"type": "message", "label": "Yes", "text": "yes"},
                        {"type": "message", "label": "No", "text": "no"}
                    ]
                }
            })
        );

        let err = ConfirmBuilder::new(&"t".repeat(241), "alt").unwrap_err();
        assert_eq!(err.to_string(), "text can not be more than 240 characters");
    }

    #[test]
    fn test_carousel() {
        let mut carousel = CarouselBuilder::new("products").unwrap();
        carousel
            .add_column("Coffee")
            .unwrap()
            .title("Hot")
            .unwrap()
            .image(IMAGE)
            .unwrap()
            .add_postback_button("Buy", "buy=coffee", None)
            .unwrap()
            .add_column("Tea")
            .unwrap();

        assert_eq!(
            carousel.build().unwrap().to_json(),
            json!({
                "type": "template",
                "altText": "products",
                "template": {
                    "type": "carousel",
                    "columns": [
                        {
                            "text": "Coffee",
                            "title": "Hot",
                            "thumbnailImageUrl": IMAGE,
                            "actions": [{"type": "postback", "label": "Buy", "data": "buy=coffee"}]
                        },
                        {"text": "Tea", "actions": []}
                    ]
                }
            })
        );
    }

    #[test]
    fn test_carousel_needs_a_column() {
        let mut carousel = CarouselBuilder::new("alt").unwrap();
        let empty = ValidationError::Empty { item: "column" };
        assert_eq!(carousel.title("Title").unwrap_err(), empty);
        assert_eq!(carousel.image(IMAGE).unwrap_err(), empty);
        assert_eq!(carousel.add_message_button("a", "b").unwrap_err(), empty);
        assert_eq!(carousel.build().unwrap_err(), empty);
    }

    #[test]
    fn test_carousel_column_cap_keeps_existing_columns() {
        let mut carousel = CarouselBuilder::new("alt").unwrap();
        for i in 0..5 {
            carousel.add_column(&format!("column {i}")).unwrap();
        }
        let err = carousel.add_column("column 5").unwrap_err();
        assert!(err.to_string().contains("more than 5 columns"));
        assert_eq!(carousel.column_count(), 5);

        let json = carousel.build().unwrap().to_json();
        let columns = json["template"]["columns"].as_array().unwrap();
        assert_eq!(columns.len(), 5);
        assert_eq!(columns[4]["text"], "column 4");
    }

    #[test]
    fn test_carousel_column_limits() {
        let mut carousel = CarouselBuilder::new("alt").unwrap();
        let err = carousel.add_column(&"t".repeat(121)).unwrap_err();
        assert_eq!(err.to_string(), "text can not be more than 120 characters");

        carousel.add_column(&"t".repeat(61)).unwrap();
        assert!(matches!(
            carousel.title("Title").unwrap_err(),
            ValidationError::TooLongWithMedia { .. }
        ));

        carousel.add_column("short").unwrap();
        for _ in 0..3 {
            carousel.add_message_button("a", "b").unwrap();
        }
        let err = carousel.add_message_button("a", "b").unwrap_err();
        assert_eq!(
            err.to_string(),
            "there can not be more than 3 buttons in a column"
        );
    }
}
