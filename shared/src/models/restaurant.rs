//! Restaurant Models

use serde::{Deserialize, Serialize};

/// Currency symbol used until the restaurant record loads
pub const DEFAULT_CURRENCY: &str = "₹";

/// Inline banner image payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerImage {
    pub data: Option<String>,
    pub content_type: Option<String>,
}

/// Restaurant entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Backend document ID
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: String,
    pub banner_image: Option<BannerImage>,
    pub currency: Option<String>,
}

impl Restaurant {
    /// Currency symbol shown beside prices
    pub fn currency_symbol(&self) -> &str {
        self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_falls_back() {
        let restaurant: Restaurant =
            serde_json::from_str(r#"{"name": "Tably Test Kitchen"}"#).unwrap();
        assert_eq!(restaurant.currency_symbol(), DEFAULT_CURRENCY);

        let restaurant: Restaurant =
            serde_json::from_str(r#"{"name": "Tably", "currency": "$"}"#).unwrap();
        assert_eq!(restaurant.currency_symbol(), "$");
    }
}
