//! Stock endpoints

use crate::{ClientResult, HttpClient};
use shared::models::{StockItem, StockUpdate};

impl HttpClient {
    /// Fetch the stock list for a restaurant
    pub async fn stock(&self, restaurant_id: &str) -> ClientResult<Vec<StockItem>> {
        self.get(&format!("/api/stock/{}", restaurant_id)).await
    }

    /// Set the quantity of a stock line
    pub async fn update_stock(&self, stock_id: &str, update: &StockUpdate) -> ClientResult<()> {
        self.patch_unit(&format!("/api/stock/{}/update", stock_id), update)
            .await
    }
}
