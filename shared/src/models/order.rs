//! Order Models

use serde::{Deserialize, Serialize};

/// Lifecycle status stored on an order
///
/// The spellings are uneven because the backend keeps them that way:
/// checkout writes `Notcomplete`, the kitchen flow uses lowercase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "Notcomplete")]
    NotComplete,
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "preparing")]
    Preparing,
    #[serde(rename = "ready")]
    Ready,
    #[serde(rename = "delivered")]
    Delivered,
}

impl OrderStatus {
    /// Kitchen progression shown on the status screen
    pub const STEPS: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ];

    /// Position in the kitchen progression, if the order has entered it
    pub fn step_index(self) -> Option<usize> {
        Self::STEPS.iter().position(|step| *step == self)
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::NotComplete => "Received",
            OrderStatus::Pending => "Pending",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

/// How the diner pays
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Counter,
    GooglePay,
}

impl PaymentMethod {
    /// Whether the order is already settled when it reaches the kitchen
    pub fn prepaid(self) -> bool {
        matches!(self, PaymentMethod::GooglePay)
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Counter => "Pay at Counter",
            PaymentMethod::GooglePay => "Google Pay",
        }
    }
}

/// Order line snapshot (never carries image payloads)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub name: String,
    /// Price in currency units
    pub price: f64,
    pub quantity: u32,
    pub volume: Option<String>,
}

/// Order payload submitted at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub order_number: String,
    pub items: Vec<OrderItem>,
    /// Amounts in currency units
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub table_number: u32,
    pub payment_method: PaymentMethod,
    /// True when the payment was captured before submission
    pub paid: bool,
    pub user_id: Option<String>,
    pub restaurant_id: String,
    #[serde(rename = "phonenumber")]
    pub phone_number: Option<String>,
    pub order_status: OrderStatus,
}

/// Order entity returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Backend document ID
    #[serde(rename = "_id")]
    pub id: String,
    pub order_number: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    /// Amount in currency units
    pub total: f64,
    pub table_number: Option<u32>,
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub paid: bool,
    pub user_id: Option<String>,
    pub restaurant_id: Option<String>,
    #[serde(rename = "phonenumber")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub order_status: OrderStatus,
    pub created_at: Option<String>,
}
