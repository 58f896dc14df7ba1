//! Order endpoints

use crate::{ClientResult, HttpClient};
use shared::models::{Order, OrderDraft};

impl HttpClient {
    /// Submit a checkout payload, returning the saved order
    pub async fn place_order(&self, draft: &OrderDraft) -> ClientResult<Order> {
        self.post("/api/orders", draft).await
    }

    /// Fetch the open orders for a restaurant
    pub async fn live_orders(&self, restaurant_id: &str) -> ClientResult<Vec<Order>> {
        self.get(&format!("/api/orders/restaurant/{}", restaurant_id))
            .await
    }

    /// Mark an order completed
    pub async fn complete_order(&self, order_id: &str) -> ClientResult<()> {
        self.patch_empty(&format!("/api/orders/{}/complete", order_id))
            .await
    }

    /// Fetch the order history for a user
    ///
    /// The route is singular (`/api/order/:userId`). The plural form
    /// addresses orders by id.
    pub async fn orders_for_user(&self, user_id: &str) -> ClientResult<Vec<Order>> {
        self.get(&format!("/api/order/{}", user_id)).await
    }

    /// Fetch a single order by id
    pub async fn order(&self, order_id: &str) -> ClientResult<Order> {
        self.get(&format!("/api/orders/{}", order_id)).await
    }
}
