//! Chat synchronization core for the Dispatch fleet administration app.
//!
//! Keeps a local view of the signed-in user's conversations consistent with
//! the backend under three uncoordinated update paths: an interval-driven
//! full refresh ([`Poller`]), a targeted refresh of the open conversation,
//! and locally issued mutations (send, create, delete). The [`ChatStore`]
//! is the single state container; observers subscribe to snapshots through
//! [`ChatStore::subscribe`].

pub mod error;
pub mod models;
pub mod services;
pub mod transport;

pub use error::ChatError;
pub use models::{Conversation, Message, SessionUser, UserRole};
pub use services::poller::Poller;
pub use services::store::{ChatState, ChatStore, POLL_PERIOD};
pub use transport::{ChatTransport, HttpTransport, NewConversation, TransportError};
