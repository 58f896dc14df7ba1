//! Payment endpoints

use crate::{ClientResult, HttpClient};
use shared::models::PaymentCapture;

impl HttpClient {
    /// Forward a card widget capture for processing
    pub async fn process_payment(&self, capture: &PaymentCapture) -> ClientResult<()> {
        self.post_unit("/api/process-payment", capture).await
    }
}
