// Keyed stores for leads and outreach messages.
//
// Handlers hold `Arc<dyn KeyValueStore<V>>` so the in-memory map can be
// swapped for an external store without touching orchestration code.
// A missing key is `None`, never an error.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

#[async_trait]
pub trait KeyValueStore<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    /// Insert or replace the value stored under `id`.
    async fn put(&self, id: Uuid, value: V);

    async fn get(&self, id: &Uuid) -> Option<V>;

    /// Remove and return the value stored under `id`.
    async fn delete(&self, id: &Uuid) -> Option<V>;

    /// Snapshot of every stored value, in no particular order.
    async fn values(&self) -> Vec<V>;
}

/// Process-lifetime map behind an async RwLock. No eviction, no size bound.
pub struct MemoryStore<V> {
    entries: RwLock<HashMap<Uuid, V>>,
}

impl<V> MemoryStore<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V> KeyValueStore<V> for MemoryStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn put(&self, id: Uuid, value: V) {
        self.entries.write().await.insert(id, value);
    }

    async fn get(&self, id: &Uuid) -> Option<V> {
        self.entries.read().await.get(id).cloned()
    }

    async fn delete(&self, id: &Uuid) -> Option<V> {
        self.entries.write().await.remove(id)
    }

    async fn values(&self) -> Vec<V> {
        self.entries.read().await.values().cloned().collect()
    }
}
