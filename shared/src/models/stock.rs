//! Stock Models

use serde::{Deserialize, Serialize};

/// Stock line entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    /// Backend document ID
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub quantity: f64,
    /// Measure label, e.g. "kg" or "pcs"
    pub unit: String,
    /// Reorder threshold
    pub min_quantity: f64,
    pub last_updated: Option<String>,
}

impl StockItem {
    /// Low stock means at or below the reorder threshold
    pub fn is_low(&self) -> bool {
        self.quantity <= self.min_quantity
    }
}

/// Stock level update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockUpdate {
    pub quantity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: f64, min_quantity: f64) -> StockItem {
        StockItem {
            id: "stock1".to_string(),
            name: "Rice".to_string(),
            quantity,
            unit: "kg".to_string(),
            min_quantity,
            last_updated: None,
        }
    }

    #[test]
    fn test_is_low_at_or_below_threshold() {
        assert!(item(2.0, 5.0).is_low());
        assert!(item(5.0, 5.0).is_low());
        assert!(!item(5.1, 5.0).is_low());
    }

    #[test]
    fn test_wire_field_spelling() {
        let json = serde_json::to_value(item(2.0, 5.0)).unwrap();
        assert!(json.get("_id").is_some());
        assert_eq!(json["minQuantity"], 5.0);
    }
}
