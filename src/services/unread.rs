use crate::models::Conversation;

/// Aggregate unread count across the conversation list.
///
/// Always recomputed from the list after it changes, never adjusted in
/// place; the open conversation's authority for unread purposes is its
/// mirror entry in the list, not the loaded copy.
pub fn total(conversations: &[Conversation]) -> u32 {
    conversations.iter().map(|c| c.unread_count).sum()
}
