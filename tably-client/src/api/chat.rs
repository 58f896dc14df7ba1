//! Kitchen chat endpoints

use crate::{ClientResult, HttpClient};
use shared::models::ChatMessage;

impl HttpClient {
    /// Fetch the chat history for a restaurant
    pub async fn messages(&self, restaurant_id: &str) -> ClientResult<Vec<ChatMessage>> {
        self.get(&format!("/api/messages?restaurantId={}", restaurant_id))
            .await
    }

    /// Post a chat message
    pub async fn send_message(&self, message: &ChatMessage) -> ClientResult<()> {
        self.post_unit("/api/messages", message).await
    }
}
