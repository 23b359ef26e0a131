pub mod poller;
pub mod store;
pub mod unread;

pub use poller::Poller;
pub use store::{ChatState, ChatStore};
