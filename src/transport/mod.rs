pub mod http;
pub mod traits;
pub mod types;
mod wire;

#[cfg(test)]
pub mod mock;

pub use http::HttpTransport;
pub use traits::ChatTransport;
pub use types::{NewConversation, TransportError};
