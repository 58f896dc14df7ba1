//! Cart and session manager
//!
//! Owns the tenant id, table number, cart lines, and diner identity.
//! Every mutation schedules a persisted snapshot; clearing the cart
//! flushes immediately so the stored keys are gone before the
//! confirmation screen renders.

use shared::models::{CartItem, MenuCategory, MenuItem, cart_totals, find_by_line_id};
use shared::money::Totals;

use crate::session::identity::UserIdentity;
use crate::session::store::{PersistHandle, SessionData};

/// Cart and session state for one diner
pub struct CartSession {
    data: SessionData,
    persist: PersistHandle,
}

impl CartSession {
    /// Wrap loaded session data
    pub fn new(data: SessionData, persist: PersistHandle) -> Self {
        Self { data, persist }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.data.cart
    }

    pub fn restaurant_id(&self) -> Option<&str> {
        self.data.restaurant_id.as_deref()
    }

    pub fn table_number(&self) -> Option<u32> {
        self.data.table_number
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.data.user.as_ref()
    }

    /// Total item count across all lines
    pub fn item_count(&self) -> u32 {
        self.data.cart.iter().map(|line| line.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.data.cart.is_empty()
    }

    /// Checkout totals for the current cart
    pub fn totals(&self) -> Totals {
        cart_totals(&self.data.cart)
    }

    /// Switch tenant; a different id resets the cart and table
    pub fn set_restaurant_id(&mut self, restaurant_id: &str) {
        if self.data.restaurant_id.as_deref() == Some(restaurant_id) {
            return;
        }
        if self.data.restaurant_id.is_some() {
            tracing::info!(restaurant_id, "Restaurant changed, resetting cart and table");
        }
        self.data.restaurant_id = Some(restaurant_id.to_string());
        self.data.cart.clear();
        self.data.table_number = None;
        self.schedule_save();
    }

    /// Add one of a menu item, or bump the existing line
    ///
    /// Unavailable items are ignored.
    pub fn add_to_cart(&mut self, category_id: &str, item: &MenuItem) {
        if !item.is_available {
            return;
        }
        let line_id = CartItem::line_id(category_id, &item.name);
        if let Some(line) = self.data.cart.iter_mut().find(|line| line.id == line_id) {
            line.quantity += 1;
        } else {
            self.data.cart.push(CartItem::from_menu(category_id, item));
        }
        self.schedule_save();
    }

    /// Set a line's quantity; zero or below removes the line
    pub fn update_quantity(&mut self, line_id: &str, quantity: i64) {
        let quantity = quantity.max(0) as u32;
        if let Some(line) = self.data.cart.iter_mut().find(|line| line.id == line_id) {
            line.quantity = quantity;
        }
        self.data.cart.retain(|line| line.quantity > 0);
        self.schedule_save();
    }

    /// Change a line's quantity by a signed step
    pub fn adjust_quantity(&mut self, line_id: &str, delta: i64) {
        let Some(line) = self.data.cart.iter().find(|line| line.id == line_id) else {
            return;
        };
        self.update_quantity(line_id, i64::from(line.quantity) + delta);
    }

    pub fn set_table_number(&mut self, table_number: Option<u32>) {
        self.data.table_number = table_number;
        self.schedule_save();
    }

    /// Empty the cart and drop the persisted cart, tenant, and table
    ///
    /// The tenant id stays in memory so the session keeps working; the
    /// identity stays persisted. This write is immediate, not debounced.
    pub fn clear_cart(&mut self) {
        self.data.cart.clear();
        self.data.table_number = None;
        self.persist.flush(SessionData {
            cart: Vec::new(),
            restaurant_id: None,
            table_number: None,
            user: self.data.user.clone(),
        });
    }

    /// Store the diner identity
    pub fn login(&mut self, user: UserIdentity) {
        self.data.user = Some(user);
        self.schedule_save();
    }

    /// Drop the diner identity
    pub fn logout(&mut self) {
        self.data.user = None;
        self.schedule_save();
    }

    /// Refresh cart lines from a fresh menu snapshot
    ///
    /// Reattaches image payloads dropped by persistence and picks up
    /// availability flips. Lines no longer on the menu keep their last
    /// known state. Returns how many lines changed.
    pub fn hydrate_from_menu(&mut self, catalog: &[MenuCategory]) -> usize {
        let mut changed = 0;
        for line in &mut self.data.cart {
            let Some((_, item)) = find_by_line_id(catalog, &line.id) else {
                continue;
            };
            let mut touched = false;
            if line.image.is_none() && item.image.is_some() {
                line.image = item.image.clone();
                touched = true;
            }
            if line.is_available != item.is_available {
                line.is_available = item.is_available;
                touched = true;
            }
            if touched {
                changed += 1;
            }
        }
        if changed > 0 {
            self.schedule_save();
        }
        changed
    }

    fn schedule_save(&self) {
        self.persist.schedule(self.snapshot());
    }

    /// Snapshot for persistence; image payloads stay in memory only
    fn snapshot(&self) -> SessionData {
        let mut snapshot = self.data.clone();
        for line in &mut snapshot.cart {
            line.image = None;
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_item(name: &str, price: f64, available: bool) -> MenuItem {
        MenuItem {
            name: name.to_string(),
            price,
            description: Some("test".to_string()),
            image: Some("data:image/png;base64,AAAA".to_string()),
            is_available: available,
            volume: None,
        }
    }

    fn session() -> CartSession {
        let mut session = CartSession::new(SessionData::default(), PersistHandle::discard());
        session.set_restaurant_id("rest-1");
        session
    }

    #[test]
    fn test_add_increments_existing_line() {
        let mut session = session();
        let dosa = menu_item("Dosa", 10.0, true);
        session.add_to_cart("cat-1", &dosa);
        session.add_to_cart("cat-1", &dosa);

        assert_eq!(session.items().len(), 1);
        assert_eq!(session.items()[0].quantity, 2);
        assert_eq!(session.items()[0].id, "cat-1-Dosa");
        assert_eq!(session.item_count(), 2);
    }

    #[test]
    fn test_same_name_different_category_is_a_separate_line() {
        let mut session = session();
        let dosa = menu_item("Dosa", 10.0, true);
        session.add_to_cart("cat-1", &dosa);
        session.add_to_cart("cat-2", &dosa);

        assert_eq!(session.items().len(), 2);
    }

    #[test]
    fn test_unavailable_item_is_not_added() {
        let mut session = session();
        session.add_to_cart("cat-1", &menu_item("Dosa", 10.0, false));
        assert!(session.is_empty());
    }

    #[test]
    fn test_quantity_never_goes_negative() {
        let mut session = session();
        session.add_to_cart("cat-1", &menu_item("Dosa", 10.0, true));

        session.update_quantity("cat-1-Dosa", -5);
        assert!(session.is_empty(), "negative quantity must remove the line");

        session.add_to_cart("cat-1", &menu_item("Dosa", 10.0, true));
        session.adjust_quantity("cat-1-Dosa", -3);
        assert!(session.is_empty(), "decrement below zero must remove the line");
    }

    #[test]
    fn test_zero_quantity_removes_the_line() {
        let mut session = session();
        session.add_to_cart("cat-1", &menu_item("Dosa", 10.0, true));
        session.update_quantity("cat-1-Dosa", 0);
        assert!(session.is_empty());
    }

    #[test]
    fn test_switching_restaurant_resets_cart_and_table() {
        let mut session = session();
        session.add_to_cart("cat-1", &menu_item("Dosa", 10.0, true));
        session.set_table_number(Some(4));

        session.set_restaurant_id("rest-2");
        assert!(session.is_empty());
        assert_eq!(session.table_number(), None);
        assert_eq!(session.restaurant_id(), Some("rest-2"));
    }

    #[test]
    fn test_same_restaurant_keeps_cart() {
        let mut session = session();
        session.add_to_cart("cat-1", &menu_item("Dosa", 10.0, true));
        session.set_table_number(Some(4));

        session.set_restaurant_id("rest-1");
        assert_eq!(session.items().len(), 1);
        assert_eq!(session.table_number(), Some(4));
    }

    #[test]
    fn test_totals_match_the_documented_example() {
        let mut session = session();
        let dosa = menu_item("Dosa", 10.0, true);
        session.add_to_cart("cat-1", &dosa);
        session.add_to_cart("cat-1", &dosa);
        session.add_to_cart("cat-1", &menu_item("Chai", 5.0, true));

        let totals = session.totals();
        assert_eq!(totals.subtotal, 2500);
        assert_eq!(totals.tax, 325);
        assert_eq!(totals.total, 2825);
    }

    #[test]
    fn test_clear_cart_keeps_tenant_in_memory() {
        let mut session = session();
        session.add_to_cart("cat-1", &menu_item("Dosa", 10.0, true));
        session.set_table_number(Some(4));

        session.clear_cart();
        assert!(session.is_empty());
        assert_eq!(session.table_number(), None);
        assert_eq!(session.restaurant_id(), Some("rest-1"));
    }

    #[test]
    fn test_hydration_restores_images_and_availability() {
        let mut session = session();
        session.add_to_cart("cat-1", &menu_item("Dosa", 10.0, true));
        session.add_to_cart("cat-1", &menu_item("Chai", 5.0, true));

        // simulate a reload: persisted lines carry no image
        for line in &mut session.data.cart {
            line.image = None;
        }

        let mut dosa = menu_item("Dosa", 10.0, true);
        dosa.is_available = false;
        let catalog = vec![MenuCategory {
            id: "cat-1".to_string(),
            restaurant_id: "rest-1".to_string(),
            category: "Mains".to_string(),
            items: vec![dosa, menu_item("Chai", 5.0, true)],
        }];

        let changed = session.hydrate_from_menu(&catalog);
        assert_eq!(changed, 2);
        assert!(session.items()[0].image.is_some());
        assert!(!session.items()[0].is_available);
        assert!(session.items()[1].is_available);
    }

    #[test]
    fn test_hydration_leaves_unknown_lines_alone() {
        let mut session = session();
        session.add_to_cart("cat-1", &menu_item("Dosa", 10.0, true));

        let changed = session.hydrate_from_menu(&[]);
        assert_eq!(changed, 0);
        assert_eq!(session.items().len(), 1);
    }

    #[test]
    fn test_snapshot_strips_images() {
        let mut session = session();
        session.add_to_cart("cat-1", &menu_item("Dosa", 10.0, true));

        let snapshot = session.snapshot();
        assert!(snapshot.cart[0].image.is_none());
        assert!(session.items()[0].image.is_some(), "in-memory image survives");
    }

    #[test]
    fn test_login_and_logout() {
        let mut session = session();
        session.login(UserIdentity::new("Asha Rao", "555-0101").unwrap());
        assert_eq!(session.user().unwrap().fullname, "Asha Rao");

        session.logout();
        assert!(session.user().is_none());
    }
}
