/**
 * Message Data Structure
 *
 * This module defines the Message struct stored in the room's message log
 * and returned by `GET /messages`, together with the body accepted by
 * `POST /messages`.
 *
 * Messages are immutable once stored. They carry the sender and recipient
 * by name only; nothing ties a message to a live participant after it has
 * been written.
 */
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Recipient name that addresses every participant in the room
pub const BROADCAST: &str = "Todos";

/// Text of the status message written when a participant joins
pub const JOIN_TEXT: &str = "entrou na sala...";

/// Text of the status message written when a participant is reaped
pub const LEAVE_TEXT: &str = "sai da sala...";

/// The kind of a chat message
///
/// `Status` messages are only ever produced by the server (join and leave
/// notifications). Clients may send `Message` and `PrivateMessage`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Message,
    PrivateMessage,
    Status,
}

impl MessageKind {
    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::PrivateMessage => "private_message",
            Self::Status => "status",
        }
    }

    /// Whether a client is allowed to send a message of this kind
    pub fn is_user_sendable(&self) -> bool {
        matches!(self, Self::Message | Self::PrivateMessage)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(Self::Message),
            "private_message" => Ok(Self::PrivateMessage),
            "status" => Ok(Self::Status),
            other => Err(SharedError::validation(
                "type",
                format!("unknown message type '{}'", other),
            )),
        }
    }
}

/// Represents a single chat message
///
/// # Fields
/// * `from` - Name of the sender
/// * `to` - Name of the recipient, or [`BROADCAST`] for everyone
/// * `text` - The message content
/// * `kind` - Serialized as `type`
/// * `time` - Send time formatted as `HH:MM:SS`
///
/// # Example
/// ```rust
/// use batepapo::shared::{Message, MessageKind, BROADCAST};
/// use chrono::Utc;
///
/// let message = Message::new("Ana", BROADCAST, "oi", MessageKind::Message, Utc::now());
/// assert!(message.is_visible_to("Beto"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub from: String,
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub time: String,
}

impl Message {
    /// Create a message stamped with the given send time
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        text: impl Into<String>,
        kind: MessageKind,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            text: text.into(),
            kind,
            time: format_time(sent_at),
        }
    }

    /// Create a broadcast status message on behalf of `name`
    pub fn status(name: impl Into<String>, text: &str, sent_at: DateTime<Utc>) -> Self {
        Self::new(name, BROADCAST, text, MessageKind::Status, sent_at)
    }

    /// Whether `user` may see this message
    ///
    /// A message is visible to its recipient, to its sender, and to everyone
    /// when it is addressed to (or authored as) [`BROADCAST`].
    pub fn is_visible_to(&self, user: &str) -> bool {
        self.to == user || self.from == user || self.to == BROADCAST || self.from == BROADCAST
    }
}

/// Format a send time the way messages carry it (`HH:MM:SS`, UTC)
pub fn format_time(at: DateTime<Utc>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// Body of `POST /messages`
///
/// `kind` is kept as a raw string so that an unknown type is reported as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendMessageRequest {
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, h, m, s).unwrap()
    }

    #[test]
    fn test_message_kind_round_trip_names() {
        for kind in [MessageKind::Message, MessageKind::PrivateMessage, MessageKind::Status] {
            assert_eq!(kind.as_str().parse::<MessageKind>().unwrap(), kind);
        }
        assert!("whisper".parse::<MessageKind>().is_err());
    }

    #[test]
    fn test_status_is_not_user_sendable() {
        assert!(MessageKind::Message.is_user_sendable());
        assert!(MessageKind::PrivateMessage.is_user_sendable());
        assert!(!MessageKind::Status.is_user_sendable());
    }

    #[test]
    fn test_message_serializes_type_field() {
        let message = Message::new("Ana", "Beto", "oi", MessageKind::PrivateMessage, at(9, 5, 7));
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["type"], "private_message");
        assert_eq!(json["time"], "09:05:07");
        assert_eq!(json["from"], "Ana");
        assert_eq!(json["to"], "Beto");
    }

    #[test]
    fn test_status_message_is_broadcast() {
        let message = Message::status("Ana", JOIN_TEXT, at(12, 0, 0));
        assert_eq!(message.to, BROADCAST);
        assert_eq!(message.kind, MessageKind::Status);
        assert_eq!(message.text, "entrou na sala...");
    }

    #[test]
    fn test_visibility() {
        let private = Message::new("Ana", "Beto", "segredo", MessageKind::PrivateMessage, at(1, 0, 0));
        assert!(private.is_visible_to("Ana"));
        assert!(private.is_visible_to("Beto"));
        assert!(!private.is_visible_to("Caio"));

        let public = Message::new("Ana", BROADCAST, "oi", MessageKind::Message, at(1, 0, 0));
        assert!(public.is_visible_to("Caio"));

        let from_everyone = Message::new(BROADCAST, "Ana", "aviso", MessageKind::Message, at(1, 0, 0));
        assert!(from_everyone.is_visible_to("Caio"));
    }
}
