//! Local diner session
//!
//! The cart, tenant id, table number, and identity live in memory and
//! are mirrored to one JSON file after a short debounce, so a restart
//! lands where the diner left off.

pub mod cart;
pub mod identity;
pub mod store;

pub use cart::CartSession;
pub use identity::UserIdentity;
pub use store::{
    DEBOUNCE_WINDOW, PersistHandle, SessionData, SessionStore, StoreError, spawn_persister,
};
