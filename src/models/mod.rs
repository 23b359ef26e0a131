pub mod conversation;
pub mod message;
pub mod session;

pub use conversation::Conversation;
pub use message::Message;
pub use session::{SessionUser, UserRole};
