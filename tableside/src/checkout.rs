//! Checkout flow
//!
//! Validates the session, builds the order payload, and clears the
//! cart only after the backend accepts the order. A rejected or failed
//! submission leaves the cart untouched.

use rand::Rng;
use thiserror::Error;

use shared::models::{Order, OrderDraft, OrderStatus, PaymentMethod};
use shared::money;
use tably_client::{ClientError, HttpClient};

use crate::session::CartSession;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Select a table number before placing the order")]
    MissingTable,

    #[error("No restaurant selected")]
    MissingRestaurant,

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Generate a display order number: `ORD-{restaurant}-{9 base36 chars}`
pub fn order_number(restaurant_id: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| char::from_digit(rng.gen_range(0..36), 36).unwrap_or('0'))
        .collect();
    format!("ORD-{}-{}", restaurant_id, suffix)
}

/// Build the order payload for the current session
///
/// `paid` comes from the payment method: counter orders settle later,
/// card orders are captured before this payload is sent.
pub fn build_draft(
    session: &CartSession,
    payment_method: PaymentMethod,
) -> Result<OrderDraft, CheckoutError> {
    let restaurant_id = session
        .restaurant_id()
        .ok_or(CheckoutError::MissingRestaurant)?;
    let table_number = session.table_number().ok_or(CheckoutError::MissingTable)?;
    if session.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let totals = session.totals();
    Ok(OrderDraft {
        order_number: order_number(restaurant_id),
        items: session.items().iter().map(|line| line.to_order_item()).collect(),
        subtotal: money::to_amount(totals.subtotal),
        tax: money::to_amount(totals.tax),
        total: money::to_amount(totals.total),
        table_number,
        payment_method,
        paid: payment_method.prepaid(),
        user_id: session.user().map(|user| user.fullname.clone()),
        restaurant_id: restaurant_id.to_string(),
        phone_number: session.user().map(|user| user.phone_number.clone()),
        order_status: OrderStatus::NotComplete,
    })
}

/// Submit the order; the cart empties only on success
pub async fn place_order(
    client: &HttpClient,
    session: &mut CartSession,
    payment_method: PaymentMethod,
) -> Result<Order, CheckoutError> {
    let draft = build_draft(session, payment_method)?;
    let saved = client.place_order(&draft).await?;
    tracing::info!(order_number = %saved.order_number, total = saved.total, "Order placed");
    session.clear_cart();
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::{PersistHandle, SessionData};
    use shared::models::MenuItem;

    fn menu_item(name: &str, price: f64) -> MenuItem {
        MenuItem {
            name: name.to_string(),
            price,
            description: None,
            image: None,
            is_available: true,
            volume: None,
        }
    }

    fn loaded_session() -> CartSession {
        let mut session = CartSession::new(SessionData::default(), PersistHandle::discard());
        session.set_restaurant_id("rest-1");
        session.set_table_number(Some(7));
        let dosa = menu_item("Dosa", 10.0);
        session.add_to_cart("cat-1", &dosa);
        session.add_to_cart("cat-1", &dosa);
        session.add_to_cart("cat-1", &menu_item("Chai", 5.0));
        session
    }

    #[test]
    fn test_order_number_shape() {
        let number = order_number("rest-1");
        assert!(number.starts_with("ORD-rest-1-"));
        let suffix = number.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 9);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_draft_totals_and_status() {
        let session = loaded_session();
        let draft = build_draft(&session, PaymentMethod::Counter).unwrap();

        assert_eq!(draft.subtotal, 25.00);
        assert_eq!(draft.tax, 3.25);
        assert_eq!(draft.total, 28.25);
        assert_eq!(draft.table_number, 7);
        assert_eq!(draft.order_status, OrderStatus::NotComplete);
        assert!(!draft.paid);
        assert_eq!(draft.items.len(), 2);
    }

    #[test]
    fn test_card_draft_is_marked_paid() {
        let session = loaded_session();
        let draft = build_draft(&session, PaymentMethod::GooglePay).unwrap();
        assert!(draft.paid);
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let mut session = CartSession::new(SessionData::default(), PersistHandle::discard());
        session.set_restaurant_id("rest-1");
        session.set_table_number(Some(7));

        assert!(matches!(
            build_draft(&session, PaymentMethod::Counter),
            Err(CheckoutError::EmptyCart)
        ));
    }

    #[test]
    fn test_missing_table_is_rejected() {
        let mut session = CartSession::new(SessionData::default(), PersistHandle::discard());
        session.set_restaurant_id("rest-1");
        session.add_to_cart("cat-1", &menu_item("Dosa", 10.0));

        assert!(matches!(
            build_draft(&session, PaymentMethod::Counter),
            Err(CheckoutError::MissingTable)
        ));
    }

    #[test]
    fn test_missing_restaurant_is_rejected() {
        let session = CartSession::new(SessionData::default(), PersistHandle::discard());
        assert!(matches!(
            build_draft(&session, PaymentMethod::Counter),
            Err(CheckoutError::MissingRestaurant)
        ));
    }

    #[test]
    fn test_draft_carries_identity_when_logged_in() {
        let mut session = loaded_session();
        session.login(crate::session::UserIdentity::new("Asha Rao", "555-0101").unwrap());

        let draft = build_draft(&session, PaymentMethod::Counter).unwrap();
        assert_eq!(draft.user_id.as_deref(), Some("Asha Rao"));
        assert_eq!(draft.phone_number.as_deref(), Some("555-0101"));
    }
}
