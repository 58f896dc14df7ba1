//! Tableside - terminal client for the Tably ordering backend
//!
//! Two faces over one REST API: a diner flow (menu, cart, checkout)
//! and a kitchen console (live orders, availability, stock, chat).
//! All durable state lives on the backend; this crate keeps only the
//! diner session on disk and mirrors everything else by polling.

pub mod checkout;
pub mod config;
pub mod logger;
pub mod payment;
pub mod session;
pub mod sync;
pub mod tasks;
pub mod ui;

pub use config::Config;
