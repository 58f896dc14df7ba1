//! Backend state synchronization
//!
//! Server state is mirrored by polling: each concern refreshes on its
//! own cadence and replaces its slice wholesale through one event
//! channel. Mutations go out as commands; local state changes only
//! after the backend accepts them.

pub mod commands;
pub mod events;
pub mod poller;

pub use commands::Command;
pub use events::{CommandOutcome, SyncEvent};
pub use poller::PollTargets;
