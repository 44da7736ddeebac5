//! In-flight request tracking.
//!
//! At most one mutation per entity is outstanding at a time. A second
//! attempt while the first is running is refused instead of queued, the
//! same way a disabled button ignores repeated clicks.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use hrportal_core::types::DbId;

use crate::error::ClientError;

/// The entity a mutation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Process(DbId),
    Task(DbId),
    Template(DbId),
    /// A process or template that does not exist yet.
    NewRecord,
}

impl std::fmt::Display for EntityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Process(id) => write!(f, "process {id}"),
            Self::Task(id) => write!(f, "task {id}"),
            Self::Template(id) => write!(f, "template {id}"),
            Self::NewRecord => f.write_str("new record"),
        }
    }
}

/// Set of entities with a request in flight.
#[derive(Debug, Clone, Default)]
pub struct PendingOps {
    inner: Arc<Mutex<HashSet<EntityKey>>>,
}

impl PendingOps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` busy until the returned guard drops.
    pub fn try_begin(&self, key: EntityKey) -> Result<PendingGuard, ClientError> {
        let mut set = self.lock();
        if !set.insert(key) {
            return Err(ClientError::Busy(key));
        }
        Ok(PendingGuard {
            ops: self.clone(),
            key,
        })
    }

    pub fn is_pending(&self, key: EntityKey) -> bool {
        self.lock().contains(&key)
    }

    pub fn is_idle(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<EntityKey>> {
        // Insert/remove cannot leave the set half-updated, so poisoning is ignored.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Releases its entity when dropped, on success and failure alike.
#[derive(Debug)]
pub struct PendingGuard {
    ops: PendingOps,
    key: EntityKey,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.ops.lock().remove(&self.key);
    }
}
