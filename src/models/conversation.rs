use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::Message;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub participant_ids: Vec<String>,
    pub title: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub unread_count: u32,
    /// Present only once the conversation has been opened or fetched;
    /// list endpoints return conversations without their messages.
    #[serde(default)]
    pub messages: Option<Vec<Message>>,
}
