//! Read-through caches for slowly changing reference data.
//!
//! The first read fetches, later reads serve the stored value until
//! [`ReadThroughCache::invalidate`] is called. Caches are passed to the
//! views that need them; there is no process-wide instance.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;

use hrportal_core::models::employee::{self, Employee};
use hrportal_core::types::DbId;

use crate::backend::PortalBackend;
use crate::error::ClientResult;

/// A single cached value behind an async `RwLock`.
#[derive(Debug)]
pub struct ReadThroughCache<T> {
    slot: RwLock<Option<Arc<T>>>,
}

impl<T> Default for ReadThroughCache<T> {
    fn default() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }
}

impl<T> ReadThroughCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value, running `load` to fill an empty slot.
    ///
    /// Concurrent callers on an empty slot wait for a single load. A failed
    /// load leaves the slot empty.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> ClientResult<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        if let Some(value) = self.slot.read().await.as_ref() {
            return Ok(Arc::clone(value));
        }

        let mut slot = self.slot.write().await;
        if let Some(value) = slot.as_ref() {
            return Ok(Arc::clone(value));
        }
        let value = Arc::new(load().await?);
        *slot = Some(Arc::clone(&value));
        Ok(value)
    }

    /// The cached value, without loading.
    pub async fn peek(&self) -> Option<Arc<T>> {
        self.slot.read().await.clone()
    }

    /// Drop the cached value so the next read fetches again.
    pub async fn invalidate(&self) {
        self.slot.write().await.take();
    }
}

// ---------------------------------------------------------------------------
// Employee directory
// ---------------------------------------------------------------------------

/// Cached personnel list used to resolve assignees and responsibles.
///
/// Cloning shares the same cache.
#[derive(Clone)]
pub struct EmployeeDirectory {
    backend: Arc<dyn PortalBackend>,
    cache: Arc<ReadThroughCache<Vec<Employee>>>,
}

impl EmployeeDirectory {
    pub fn new(backend: Arc<dyn PortalBackend>) -> Self {
        Self {
            backend,
            cache: Arc::new(ReadThroughCache::new()),
        }
    }

    pub async fn employees(&self) -> ClientResult<Arc<Vec<Employee>>> {
        self.cache
            .get_or_load(|| async {
                let employees = self.backend.list_employees().await?;
                tracing::debug!(count = employees.len(), "Loaded employee directory");
                Ok(employees)
            })
            .await
    }

    pub async fn find(&self, employee_id: DbId) -> ClientResult<Option<Employee>> {
        let employees = self.employees().await?;
        Ok(employee::find_employee(&employees, employee_id).cloned())
    }

    /// Active employees matching `query` on name or email.
    pub async fn search(&self, query: &str) -> ClientResult<Vec<Employee>> {
        let employees = self.employees().await?;
        Ok(employee::search_employees(&employees, query)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn invalidate(&self) {
        self.cache.invalidate().await;
    }
}
