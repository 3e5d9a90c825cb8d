//! Lock-guarded handle for sharing one store across tasks.

use std::sync::Arc;
use tokio::sync::Mutex;

use super::record::Record;
use super::store::MemoryStore;

/// Cloneable handle to a [`MemoryStore`] behind a single mutex.
///
/// Every call holds the lock for the whole operation, so an insertion and
/// its eviction pass are never observed half-done.
#[derive(Debug, Clone)]
pub struct SharedMemoryStore {
    inner: Arc<Mutex<MemoryStore>>,
}

impl SharedMemoryStore {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub async fn add_memory(&self, record: Record, importance: f64) {
        let mut guard = self.inner.lock().await;
        guard.add_memory(record, importance);
    }

    pub async fn get_relevant_context(&self, query: &str, limit: usize) -> Vec<Record> {
        let guard = self.inner.lock().await;
        guard.get_relevant_context(query, limit)
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    /// Run `f` with exclusive access to the underlying store.
    pub async fn with_store<T>(&self, f: impl FnOnce(&mut MemoryStore) -> T) -> T {
        let mut guard = self.inner.lock().await;
        f(&mut guard)
    }
}

impl From<MemoryStore> for SharedMemoryStore {
    fn from(store: MemoryStore) -> Self {
        Self::new(store)
    }
}
