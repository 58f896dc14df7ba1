//! Kitchen Chat Models

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Chat message entity
///
/// `message_id` is minted by the sender, so an optimistic local append
/// can be reconciled against the next poll without duplicating.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub message_id: Uuid,
    pub restaurant_id: String,
    /// Display name of whoever typed it
    pub sender: String,
    pub body: String,
    pub created_at: String,
}

impl ChatMessage {
    /// Build a new outgoing message stamped with the current time
    pub fn new(
        restaurant_id: impl Into<String>,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            message_id: Uuid::new_v4(),
            restaurant_id: restaurant_id.into(),
            sender: sender.into(),
            body: body.into(),
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_messages_get_distinct_ids() {
        let a = ChatMessage::new("rest1", "kitchen", "order up");
        let b = ChatMessage::new("rest1", "kitchen", "order up");
        assert_ne!(a.message_id, b.message_id);
    }

    #[test]
    fn test_wire_field_spelling() {
        let json = serde_json::to_value(ChatMessage::new("rest1", "kitchen", "hi")).unwrap();
        assert!(json.get("messageId").is_some());
        assert_eq!(json["restaurantId"], "rest1");
        assert!(json.get("createdAt").is_some());
    }
}
