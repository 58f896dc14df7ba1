//! Waiter assistance endpoints

use crate::{ClientResult, HttpClient};
use shared::models::{WaiterCall, WaiterRequest};

impl HttpClient {
    /// Fetch the open assistance requests for a restaurant
    pub async fn waiter_requests(&self, restaurant_id: &str) -> ClientResult<Vec<WaiterRequest>> {
        self.get(&format!("/api/waiter-request/{}", restaurant_id))
            .await
    }

    /// Call a waiter to a table
    pub async fn call_waiter(&self, call: &WaiterCall) -> ClientResult<()> {
        self.post_unit("/api/waiter-request/waiter-assistance", call)
            .await
    }
}
