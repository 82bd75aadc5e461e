//! Normalization of LINE webhook events.

use courier_core::{CanonicalMessage, EventParser, Platform};
use serde_json::Value;

/// Normalizes one raw LINE event.
///
/// The sender is the first of `source.userId`, `source.groupId` and
/// `source.roomId` that is present. The text is the message text, or the
/// postback data for postback events, or empty for everything else
/// (stickers, media, follow events, ...).
///
/// Returns `None` when the event is not an object or has no usable source.
pub fn parse_event(event: &Value) -> Option<CanonicalMessage> {
    let event_obj = event.as_object()?;
    let source = event_obj.get("source")?;

    let sender = ["userId", "groupId", "roomId"]
        .iter()
        .find_map(|key| source.get(*key).and_then(Value::as_str))?
        .to_string();

    let message_text = event
        .pointer("/message/text")
        .and_then(Value::as_str);
    let postback_data = event
        .pointer("/postback/data")
        .and_then(Value::as_str);

    let (text, postback) = match (message_text, postback_data) {
        (Some(text), _) => (text.to_string(), None),
        (None, Some(data)) => (data.to_string(), Some(true)),
        (None, None) => (String::new(), None),
    };

    let reply_token = event_obj
        .get("replyToken")
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(CanonicalMessage {
        sender,
        text,
        reply_token,
        postback,
        original_request: event.clone(),
        platform: Platform::Line,
    })
}

/// The default [`EventParser`], backed by [`parse_event`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LineEventParser;

impl EventParser for LineEventParser {
    fn parse(&self, event: &Value) -> Option<CanonicalMessage> {
        parse_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_message() {
        let event = json!({
            "message": {"text": "Hello"},
            "source": {"userId": "1234"},
            "replyToken": "123as"
        });
        let message = parse_event(&event).unwrap();

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "sender": "1234",
                "text": "Hello",
                "replyToken": "123as",
                "originalRequest": event,
                "type": "line"
            })
        );
    }

    #[test]
    fn test_unfollow_has_no_reply_token() {
        let event = json!({"source": {"userId": "12345"}, "type": "unfollow"});
        let message = parse_event(&event).unwrap();

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "sender": "12345",
                "text": "",
                "originalRequest": event,
                "type": "line"
            })
        );
    }

    #[test]
    fn test_postback_sets_flag() {
        let event = json!({
            "type": "postback",
            "replyToken": "b60d",
            "source": {"userId": "U4af", "type": "user"},
            "postback": {"data": "action=buy&itemid=123"}
        });
        let message = parse_event(&event).unwrap();
        assert_eq!(message.text, "action=buy&itemid=123");
        assert!(message.is_postback());
    }

    #[test]
    fn test_sender_priority() {
        let group = json!({"source": {"groupId": "G1", "roomId": "R1"}});
        assert_eq!(parse_event(&group).unwrap().sender, "G1");

        let room = json!({"source": {"roomId": "R1"}});
        assert_eq!(parse_event(&room).unwrap().sender, "R1");

        let both = json!({"source": {"userId": "U1", "groupId": "G1"}});
        assert_eq!(parse_event(&both).unwrap().sender, "U1");
    }

    #[test]
    fn test_media_events_have_empty_text() {
        let event = json!({
            "type": "message",
            "replyToken": "t",
            "source": {"userId": "U1"},
            "message": {"type": "sticker", "packageId": "1", "stickerId": "1"}
        });
        let message = parse_event(&event).unwrap();
        assert_eq!(message.text, "");
        assert!(!message.is_postback());
    }

    #[test]
    fn test_rejects_unusable_events() {
        for event in [
            json!(null),
            json!(false),
            json!(42),
            json!("event"),
            json!([{"source": {"userId": "1"}}]),
            json!({"message": {"text": "no source"}}),
            json!({"source": {}}),
        ] {
            assert!(parse_event(&event).is_none(), "{event}");
        }
    }
}
