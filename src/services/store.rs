use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{watch, Mutex};

use crate::error::ChatError;
use crate::models::{Conversation, Message, SessionUser};
use crate::services::poller::Poller;
use crate::services::unread;
use crate::transport::{ChatTransport, NewConversation};

/// Cadence of the background refresh while a session is active.
pub const POLL_PERIOD: Duration = Duration::from_secs(30);

/// Snapshot observers receive through [`ChatStore::subscribe`].
///
/// `unread_total` is derived from `conversations`; the store recomputes it
/// after every list change and never adjusts it independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatState {
    pub conversations: Vec<Conversation>,
    pub open_conversation: Option<Conversation>,
    pub loading: bool,
    pub last_error: Option<String>,
    pub unread_total: u32,
    pub session: Option<SessionUser>,
}

/// Process-wide container for the user's conversations.
///
/// Reconciles three uncoordinated update paths: the poller's full refresh,
/// the targeted refresh of the open conversation, and local mutations.
/// Operations read state before awaiting the transport and write after it,
/// so overlapping requests race and the last-resolved response wins; no
/// sequencing token is kept.
///
/// Every operation absorbs transport failures: it records the message in
/// `last_error` and signals failure through its return value instead of
/// propagating an error past the store boundary.
pub struct ChatStore {
    transport: Arc<dyn ChatTransport>,
    state: watch::Sender<ChatState>,
    poller: Mutex<Option<Poller>>,
    poll_period: Duration,
}

impl ChatStore {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Arc<Self> {
        Self::with_poll_period(transport, POLL_PERIOD)
    }

    pub fn with_poll_period(transport: Arc<dyn ChatTransport>, poll_period: Duration) -> Arc<Self> {
        let (state, _) = watch::channel(ChatState::default());
        Arc::new(Self {
            transport,
            state,
            poller: Mutex::new(None),
            poll_period,
        })
    }

    /// Current state snapshot.
    pub fn state(&self) -> ChatState {
        self.state.borrow().clone()
    }

    /// Observe state changes. Every mutation publishes a new snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ChatState> {
        self.state.subscribe()
    }

    /// Start a session: remember the user, load the conversation list once
    /// and begin polling. An already-running session is replaced; its
    /// poller is stopped before the new one starts, so there is never more
    /// than one live timer.
    pub async fn begin_session(self: &Arc<Self>, user: SessionUser) {
        let mut poller = self.poller.lock().await;
        if let Some(old) = poller.take() {
            old.stop();
        }
        tracing::debug!("chat session started for {}", user.id);
        self.state.send_modify(|s| {
            *s = ChatState {
                session: Some(user),
                ..ChatState::default()
            };
        });
        self.refresh_list().await;
        *poller = Some(Poller::start(Arc::clone(self), self.poll_period));
    }

    /// End the session: stop the poller and clear all state. In-flight
    /// fetches are not cancelled; only the schedule stops.
    pub async fn end_session(&self) {
        if let Some(poller) = self.poller.lock().await.take() {
            poller.stop();
        }
        tracing::debug!("chat session ended");
        self.state.send_modify(|s| *s = ChatState::default());
    }

    /// Replace the conversation list with the server's view and recompute
    /// the unread total. Failures leave the list untouched. Does nothing
    /// when no session is active.
    pub async fn refresh_list(&self) {
        if self.state.borrow().session.is_none() {
            return;
        }
        self.state.send_modify(|s| s.loading = true);

        let result = self.transport.list_conversations().await;

        self.state.send_modify(|s| {
            s.loading = false;
            match result {
                Ok(conversations) => {
                    tracing::debug!("refreshed {} conversations", conversations.len());
                    s.conversations = conversations;
                    s.unread_total = unread::total(&s.conversations);
                    s.last_error = None;
                }
                Err(e) => {
                    tracing::warn!("conversation list refresh failed: {}", e);
                    s.last_error = Some(e.to_string());
                }
            }
        });
    }

    /// Open a conversation: fetch its messages and mark its list entry read
    /// locally, without waiting for the server to confirm.
    ///
    /// Returns `None` on failure so the caller can tell it apart from a
    /// missing conversation; the previously open conversation stays open.
    pub async fn open_conversation(&self, id: &str) -> Option<Conversation> {
        self.state.send_modify(|s| s.loading = true);

        match self.transport.fetch_conversation(id).await {
            Ok(conversation) => {
                let opened = conversation.clone();
                self.state.send_modify(|s| {
                    s.loading = false;
                    if let Some(entry) = s.conversations.iter_mut().find(|c| c.id == opened.id) {
                        entry.unread_count = 0;
                    }
                    s.unread_total = unread::total(&s.conversations);
                    s.open_conversation = Some(opened);
                    s.last_error = None;
                });
                Some(conversation)
            }
            Err(e) => {
                tracing::warn!("failed to open conversation {}: {}", id, e);
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.last_error = Some(e.to_string());
                });
                None
            }
        }
    }

    /// Create a conversation and prepend it to the list. An empty
    /// participant set is rejected locally; the transport is never called.
    pub async fn create_conversation(
        &self,
        participant_ids: Vec<String>,
        title: Option<String>,
        initial_message: &str,
    ) -> Option<Conversation> {
        if participant_ids.is_empty() {
            self.record_error(ChatError::Validation(
                "a conversation needs at least one participant".to_string(),
            ));
            return None;
        }

        let req = NewConversation {
            participant_ids,
            title,
            initial_message: initial_message.to_string(),
        };

        match self.transport.create_conversation(req).await {
            Ok(conversation) => {
                let created = conversation.clone();
                self.state.send_modify(|s| {
                    // Newest first is a convention; refreshes may reorder.
                    s.conversations.insert(0, created);
                    s.unread_total = unread::total(&s.conversations);
                    s.last_error = None;
                });
                Some(conversation)
            }
            Err(e) => {
                tracing::warn!("failed to create conversation: {}", e);
                self.record_error(e.into());
                None
            }
        }
    }

    /// Send a message. Empty or whitespace-only text is rejected before
    /// contacting the server and leaves all state untouched.
    ///
    /// On success the server-confirmed message is appended to the open
    /// conversation when it is the target; the list entry's last-message
    /// marker is stamped with the local clock at completion, not the server
    /// timestamp, so the next poll may reorder the list.
    pub async fn send_message(&self, conversation_id: &str, text: &str) -> Option<Message> {
        if text.trim().is_empty() {
            return None;
        }

        match self.transport.post_message(conversation_id, text).await {
            Ok(message) => {
                let sent = message.clone();
                self.state.send_modify(|s| {
                    if let Some(open) = s.open_conversation.as_mut() {
                        if open.id == conversation_id {
                            open.messages.get_or_insert_with(Vec::new).push(sent);
                        }
                    }
                    if let Some(entry) =
                        s.conversations.iter_mut().find(|c| c.id == conversation_id)
                    {
                        entry.last_message_at = Some(Utc::now());
                    }
                    s.last_error = None;
                });
                Some(message)
            }
            Err(e) => {
                tracing::warn!("failed to send message to {}: {}", conversation_id, e);
                self.record_error(e.into());
                None
            }
        }
    }

    /// Delete a conversation. On success the matching entry is removed and
    /// the open conversation is cleared when it was the deleted one; on
    /// failure all state is left unchanged.
    pub async fn delete_conversation(&self, id: &str) -> bool {
        match self.transport.delete_conversation(id).await {
            Ok(()) => {
                self.state.send_modify(|s| {
                    s.conversations.retain(|c| c.id != id);
                    if s.open_conversation.as_ref().is_some_and(|c| c.id == id) {
                        s.open_conversation = None;
                    }
                    s.unread_total = unread::total(&s.conversations);
                    s.last_error = None;
                });
                true
            }
            Err(e) => {
                tracing::warn!("failed to delete conversation {}: {}", id, e);
                self.record_error(e.into());
                false
            }
        }
    }

    fn record_error(&self, err: ChatError) {
        self.state.send_modify(|s| s.last_error = Some(err.to_string()));
    }
}
