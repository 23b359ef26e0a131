//! Scripted in-memory transport for store and poller tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::traits::ChatTransport;
use super::types::{NewConversation, TransportError};
use crate::models::{Conversation, Message};

/// Behaves like a tiny chat backend over an in-memory conversation list,
/// with per-endpoint call counters and a switch to force network failures.
#[derive(Default)]
pub struct MockTransport {
    conversations: Mutex<Vec<Conversation>>,
    failing: AtomicBool,
    pub list_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub post_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl MockTransport {
    pub fn new(conversations: Vec<Conversation>) -> Self {
        Self {
            conversations: Mutex::new(conversations),
            ..Self::default()
        }
    }

    /// When failing, every endpoint returns a network error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_call_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn post_call_count(&self) -> usize {
        self.post_calls.load(Ordering::SeqCst)
    }

    pub fn create_call_count(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    fn check_failing(&self) -> Result<(), TransportError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(TransportError::Network("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn not_found() -> TransportError {
        TransportError::Server {
            status: 404,
            message: "conversation not found".to_string(),
        }
    }

    /// Fixture: a conversation as the list endpoint would return it.
    pub fn conversation(id: &str, unread_count: u32) -> Conversation {
        Conversation {
            id: id.to_string(),
            participant_ids: vec!["u1".to_string(), "u2".to_string()],
            title: Some(format!("Conversation {}", id)),
            last_message_at: Some(Utc::now()),
            unread_count,
            messages: None,
        }
    }

    pub fn message(sender_id: &str, content: &str) -> Message {
        Message {
            id: Uuid::new_v4().to_string(),
            sender_id: sender_id.to_string(),
            sender_name: sender_id.to_uppercase(),
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn list_conversations(&self) -> Result<Vec<Conversation>, TransportError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        let list = self.conversations.lock().unwrap();
        Ok(list
            .iter()
            .map(|c| Conversation {
                messages: None,
                ..c.clone()
            })
            .collect())
    }

    async fn fetch_conversation(&self, id: &str) -> Result<Conversation, TransportError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        let list = self.conversations.lock().unwrap();
        let mut conversation = list
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(Self::not_found)?;
        conversation.messages.get_or_insert_with(Vec::new);
        Ok(conversation)
    }

    async fn create_conversation(
        &self,
        req: NewConversation,
    ) -> Result<Conversation, TransportError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        let conversation = Conversation {
            id: Uuid::new_v4().to_string(),
            participant_ids: req.participant_ids,
            title: req.title,
            last_message_at: Some(Utc::now()),
            unread_count: 0,
            messages: Some(vec![Self::message("u1", &req.initial_message)]),
        };
        self.conversations
            .lock()
            .unwrap()
            .insert(0, conversation.clone());
        Ok(conversation)
    }

    async fn post_message(
        &self,
        conversation_id: &str,
        text: &str,
    ) -> Result<Message, TransportError> {
        self.post_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        let mut list = self.conversations.lock().unwrap();
        let conversation = list
            .iter_mut()
            .find(|c| c.id == conversation_id)
            .ok_or_else(Self::not_found)?;
        let message = Self::message("u1", text);
        conversation.last_message_at = Some(message.created_at);
        if let Some(messages) = conversation.messages.as_mut() {
            messages.push(message.clone());
        }
        Ok(message)
    }

    async fn delete_conversation(&self, id: &str) -> Result<(), TransportError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        let mut list = self.conversations.lock().unwrap();
        let before = list.len();
        list.retain(|c| c.id != id);
        if list.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }
}
