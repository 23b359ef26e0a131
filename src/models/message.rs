use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Whether this message was sent by the given user.
    pub fn is_own(&self, user_id: &str) -> bool {
        self.sender_id == user_id
    }
}
