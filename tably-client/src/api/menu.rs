//! Menu endpoints

use crate::{ClientResult, HttpClient};
use shared::models::{AvailabilityUpdate, MenuCategory};

impl HttpClient {
    /// Fetch the full categorized menu for a restaurant
    pub async fn menu(&self, restaurant_id: &str) -> ClientResult<Vec<MenuCategory>> {
        self.get(&format!("/api/menu/{}", restaurant_id)).await
    }

    /// Toggle availability of one item inside a category
    pub async fn set_item_availability(
        &self,
        category_id: &str,
        update: &AvailabilityUpdate,
    ) -> ClientResult<()> {
        self.patch_unit(&format!("/api/menus/{}/item", category_id), update)
            .await
    }
}
