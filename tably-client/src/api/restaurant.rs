//! Restaurant endpoints

use crate::{ClientResult, HttpClient};
use shared::models::Restaurant;

impl HttpClient {
    /// Fetch a restaurant record
    ///
    /// The backend answers with an array; the first element is the
    /// tenant, or `None` when the id is unknown.
    pub async fn restaurant(&self, restaurant_id: &str) -> ClientResult<Option<Restaurant>> {
        let mut rows: Vec<Restaurant> = self
            .get(&format!("/api/restaurant/{}", restaurant_id))
            .await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.remove(0)))
        }
    }
}
