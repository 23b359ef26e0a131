//! JSON shapes of the backend's chat endpoints. Field names follow the
//! backend's camelCase convention; conversions into the domain models live
//! here so the rest of the crate never sees wire details.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Conversation, Message};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WireConversation {
    pub id: String,
    #[serde(default)]
    pub participant_ids: Vec<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub last_message_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub messages: Option<Vec<WireMessage>>,
}

impl From<WireConversation> for Conversation {
    fn from(w: WireConversation) -> Self {
        Conversation {
            id: w.id,
            participant_ids: w.participant_ids,
            title: w.title,
            last_message_at: w.last_message_at,
            unread_count: w.unread_count,
            messages: w
                .messages
                .map(|msgs| msgs.into_iter().map(Message::from).collect()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WireMessage {
    pub id: String,
    pub sender_id: String,
    #[serde(default)]
    pub sender_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<WireMessage> for Message {
    fn from(w: WireMessage) -> Self {
        Message {
            id: w.id,
            sender_id: w.sender_id,
            sender_name: w.sender_name,
            content: w.content,
            created_at: w.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct PostMessageBody<'a> {
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireError {
    pub message: String,
}
