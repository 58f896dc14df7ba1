//! Typed endpoint wrappers
//!
//! One method per backend route, implemented on
//! [`HttpClient`](crate::HttpClient) and grouped by resource.

pub mod chat;
pub mod menu;
pub mod orders;
pub mod payment;
pub mod restaurant;
pub mod stock;
pub mod waiter;
