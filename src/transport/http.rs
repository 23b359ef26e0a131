use async_trait::async_trait;
use reqwest::Client;

use super::traits::ChatTransport;
use super::types::{NewConversation, TransportError};
use super::wire::{PostMessageBody, WireConversation, WireError, WireMessage};
use crate::models::{Conversation, Message};

/// Production transport over the backend's HTTP/JSON chat endpoints.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    auth_token: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            auth_token: auth_token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.auth_token)
    }

    /// Map a non-2xx response to a server error, pulling the human-readable
    /// message out of the body when the backend provided one.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, TransportError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<WireError>(&body)
            .map(|e| e.message)
            .unwrap_or_else(|_| "Request failed".to_string());
        Err(TransportError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn list_conversations(&self) -> Result<Vec<Conversation>, TransportError> {
        let response = self
            .client
            .get(self.url("/api/chats"))
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let wire: Vec<WireConversation> = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))?;

        Ok(wire.into_iter().map(Conversation::from).collect())
    }

    async fn fetch_conversation(&self, id: &str) -> Result<Conversation, TransportError> {
        let response = self
            .client
            .get(self.url(&format!("/api/chats/{}", id)))
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let wire: WireConversation = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))?;

        Ok(wire.into())
    }

    async fn create_conversation(
        &self,
        req: NewConversation,
    ) -> Result<Conversation, TransportError> {
        let response = self
            .client
            .post(self.url("/api/chats"))
            .header("Authorization", self.auth_header())
            .json(&req)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let wire: WireConversation = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))?;

        Ok(wire.into())
    }

    async fn post_message(
        &self,
        conversation_id: &str,
        text: &str,
    ) -> Result<Message, TransportError> {
        let response = self
            .client
            .post(self.url(&format!("/api/chats/{}/messages", conversation_id)))
            .header("Authorization", self.auth_header())
            .json(&PostMessageBody { content: text })
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let wire: WireMessage = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))?;

        Ok(wire.into())
    }

    async fn delete_conversation(&self, id: &str) -> Result<(), TransportError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/chats/{}", id)))
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Self::check(response).await?;
        Ok(())
    }
}
