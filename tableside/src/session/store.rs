//! Session file store
//!
//! One JSON file holds the cart, tenant, table, and identity. Writes go
//! through a persister task that debounces bursts, so a run of cart
//! edits costs a single write. Clearing the cart flushes immediately.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use shared::models::CartItem;

use crate::session::identity::UserIdentity;
use crate::tasks::{BackgroundTasks, TaskKind};

/// Quiet window before a scheduled snapshot hits disk
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persisted session shape
///
/// Image payloads are stripped before serialization (`CartItem` skips
/// them), so the file stays small.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionData {
    pub cart: Vec<CartItem>,
    pub restaurant_id: Option<String>,
    pub table_number: Option<u32>,
    pub user: Option<UserIdentity>,
}

/// JSON file store for [`SessionData`]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: data_dir.into().join("session.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the session, or a default when none was saved yet
    pub fn load(&self) -> Result<SessionData, StoreError> {
        if !self.path.exists() {
            return Ok(SessionData::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the session, replacing the file atomically
    pub fn save(&self, data: &SessionData) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(data)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[derive(Debug)]
enum PersistCmd {
    /// Write after the debounce window, coalescing with later saves
    Save(SessionData),
    /// Write immediately
    Flush(SessionData),
}

/// Handle for scheduling session writes
#[derive(Debug, Clone)]
pub struct PersistHandle {
    tx: mpsc::UnboundedSender<PersistCmd>,
}

impl PersistHandle {
    /// Schedule a snapshot write after the debounce window
    pub fn schedule(&self, snapshot: SessionData) {
        let _ = self.tx.send(PersistCmd::Save(snapshot));
    }

    /// Write a snapshot immediately, superseding anything scheduled
    pub fn flush(&self, snapshot: SessionData) {
        let _ = self.tx.send(PersistCmd::Flush(snapshot));
    }
}

#[cfg(test)]
impl PersistHandle {
    /// Handle whose writes go nowhere
    pub fn discard() -> Self {
        let (tx, _rx) = mpsc::unbounded_channel();
        Self { tx }
    }
}

/// Spawn the persister worker on the task registry
pub fn spawn_persister(store: SessionStore, tasks: &mut BackgroundTasks) -> PersistHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    tasks.spawn("session_persister", TaskKind::Worker, run_persister(store, rx));
    PersistHandle { tx }
}

async fn run_persister(store: SessionStore, mut rx: mpsc::UnboundedReceiver<PersistCmd>) {
    while let Some(cmd) = rx.recv().await {
        let mut pending = match cmd {
            PersistCmd::Save(snapshot) => snapshot,
            PersistCmd::Flush(snapshot) => {
                write(&store, &snapshot);
                continue;
            }
        };

        // absorb the burst; a flush inside the window writes right away
        loop {
            tokio::select! {
                _ = tokio::time::sleep(DEBOUNCE_WINDOW) => break,
                next = rx.recv() => match next {
                    Some(PersistCmd::Save(snapshot)) => pending = snapshot,
                    Some(PersistCmd::Flush(snapshot)) => {
                        pending = snapshot;
                        break;
                    }
                    None => break,
                },
            }
        }
        write(&store, &pending);
    }
}

fn write(store: &SessionStore, snapshot: &SessionData) {
    if let Err(e) = store.save(snapshot) {
        tracing::warn!(error = %e, path = %store.path().display(), "Failed to persist session");
    }
}
