//! Shared types for Tably clients
//!
//! Wire models for the ordering backend REST API plus integer-cent
//! money helpers used by every crate that computes totals.

pub mod models;
pub mod money;

// Re-exports
pub use serde::{Deserialize, Serialize};
