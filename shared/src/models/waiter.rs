//! Waiter Assistance Models

use serde::{Deserialize, Serialize};

/// Preset reasons a table can call a waiter for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WaiterReason {
    Assistance,
    #[serde(rename = "Clean Table")]
    CleanTable,
    #[serde(rename = "Order Issue")]
    OrderIssue,
    Refill,
}

impl WaiterReason {
    pub const ALL: [WaiterReason; 4] = [
        WaiterReason::Assistance,
        WaiterReason::CleanTable,
        WaiterReason::OrderIssue,
        WaiterReason::Refill,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WaiterReason::Assistance => "Assistance",
            WaiterReason::CleanTable => "Clean Table",
            WaiterReason::OrderIssue => "Order Issue",
            WaiterReason::Refill => "Refill",
        }
    }
}

/// Waiter call payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaiterCall {
    pub restaurant_id: String,
    pub table_number: u32,
    pub reason: WaiterReason,
}

/// Assistance request entity
///
/// `reason` stays a free string on reads so older rows with custom
/// text still list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaiterRequest {
    /// Backend document ID
    #[serde(rename = "_id")]
    pub id: String,
    pub table_number: u32,
    pub reason: String,
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_wire_spelling() {
        assert_eq!(
            serde_json::to_string(&WaiterReason::CleanTable).unwrap(),
            r#""Clean Table""#
        );
        assert_eq!(
            serde_json::to_string(&WaiterReason::Refill).unwrap(),
            r#""Refill""#
        );
    }

    #[test]
    fn test_call_payload_spelling() {
        let call = WaiterCall {
            restaurant_id: "rest1".to_string(),
            table_number: 12,
            reason: WaiterReason::OrderIssue,
        };
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["restaurantId"], "rest1");
        assert_eq!(json["tableNumber"], 12);
        assert_eq!(json["reason"], "Order Issue");
    }
}
