//! Payment Models

use serde::{Deserialize, Serialize};

/// Card payment capture forwarded to the backend before order placement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCapture {
    /// Opaque token payload returned by the card widget
    pub payment_data: serde_json::Value,
    /// Amount in currency units
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_spelling() {
        let capture = PaymentCapture {
            payment_data: serde_json::json!({"token": "tok_visa"}),
            amount: 28.25,
        };
        let json = serde_json::to_value(&capture).unwrap();
        assert_eq!(json["paymentData"]["token"], "tok_visa");
        assert_eq!(json["amount"], 28.25);
    }
}
