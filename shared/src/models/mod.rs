//! Data models
//!
//! Wire types shared between the diner client and the kitchen console.
//! Fields serialize in the camelCase spelling the backend stores, with
//! Mongo-style `_id` document keys kept verbatim.

pub mod cart;
pub mod chat;
pub mod menu;
pub mod order;
pub mod payment;
pub mod restaurant;
pub mod stock;
pub mod waiter;

// Re-exports
pub use cart::*;
pub use chat::*;
pub use menu::*;
pub use order::*;
pub use payment::*;
pub use restaurant::*;
pub use stock::*;
pub use waiter::*;
