use async_trait::async_trait;

use super::types::{NewConversation, TransportError};
use crate::models::{Conversation, Message};

/// Authenticated access to the chat endpoints of the backend.
///
/// Implementations do not retry; failures surface as [`TransportError`]
/// and the store decides what to do with them.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// List the current user's conversations, without their messages.
    async fn list_conversations(&self) -> Result<Vec<Conversation>, TransportError>;

    /// Fetch a single conversation with its messages loaded.
    async fn fetch_conversation(&self, id: &str) -> Result<Conversation, TransportError>;

    async fn create_conversation(
        &self,
        req: NewConversation,
    ) -> Result<Conversation, TransportError>;

    /// Post a message; returns the server-confirmed message.
    async fn post_message(
        &self,
        conversation_id: &str,
        text: &str,
    ) -> Result<Message, TransportError>;

    async fn delete_conversation(&self, id: &str) -> Result<(), TransportError>;
}
