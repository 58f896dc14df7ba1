//! Cart Models

use serde::{Deserialize, Serialize};

use super::menu::MenuItem;
use super::order::OrderItem;
use crate::money::Totals;

/// Cart line entity
///
/// `id` is the composite menu line id, `{category_id}-{item_name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Price in currency units
    pub price: f64,
    pub description: Option<String>,
    /// Never serialized. Rebuilt from the menu snapshot after load.
    #[serde(skip)]
    pub image: Option<String>,
    pub is_available: bool,
    pub volume: Option<String>,
    pub quantity: u32,
}

impl CartItem {
    /// Compose the line id for a category/item pair
    pub fn line_id(category_id: &str, item_name: &str) -> String {
        format!("{}-{}", category_id, item_name)
    }

    /// Build a cart line from a menu item, starting at quantity 1
    pub fn from_menu(category_id: &str, item: &MenuItem) -> Self {
        Self {
            id: Self::line_id(category_id, item.name.as_str()),
            name: item.name.clone(),
            price: item.price,
            description: item.description.clone(),
            image: item.image.clone(),
            is_available: item.is_available,
            volume: item.volume.clone(),
            quantity: 1,
        }
    }

    /// Snapshot for an order payload (images stay local)
    pub fn to_order_item(&self) -> OrderItem {
        OrderItem {
            name: self.name.clone(),
            price: self.price,
            quantity: self.quantity,
            volume: self.volume.clone(),
        }
    }
}

/// Checkout totals over a set of cart lines
pub fn cart_totals(items: &[CartItem]) -> Totals {
    Totals::from_lines(items.iter().map(|item| (item.price, item.quantity)))
}
