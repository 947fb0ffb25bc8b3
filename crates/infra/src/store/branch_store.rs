use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use pharmaops_core::BranchId;

use super::{StoreError, StoreResult};

/// Branch-isolated key/value store.
///
/// `list` returns records in first-insertion order so forecasts built from it are
/// deterministic; `upsert` replaces an existing record in place.
pub trait BranchStore<K, V>: Send + Sync {
    fn get(&self, branch: BranchId, key: &K) -> StoreResult<Option<V>>;
    fn upsert(&self, branch: BranchId, key: K, value: V) -> StoreResult<()>;
    fn list(&self, branch: BranchId) -> StoreResult<Vec<V>>;
}

impl<K, V, S> BranchStore<K, V> for Arc<S>
where
    S: BranchStore<K, V> + ?Sized,
{
    fn get(&self, branch: BranchId, key: &K) -> StoreResult<Option<V>> {
        (**self).get(branch, key)
    }

    fn upsert(&self, branch: BranchId, key: K, value: V) -> StoreResult<()> {
        (**self).upsert(branch, key, value)
    }

    fn list(&self, branch: BranchId) -> StoreResult<Vec<V>> {
        (**self).list(branch)
    }
}

/// In-memory branch-isolated store for tests/dev.
#[derive(Debug)]
pub struct InMemoryBranchStore<K, V> {
    inner: RwLock<HashMap<BranchId, Vec<(K, V)>>>,
}

impl<K, V> InMemoryBranchStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryBranchStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("in-memory store lock poisoned".to_string())
}

impl<K, V> BranchStore<K, V> for InMemoryBranchStore<K, V>
where
    K: Clone + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, branch: BranchId, key: &K) -> StoreResult<Option<V>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map
            .get(&branch)
            .and_then(|rows| rows.iter().find(|(k, _)| k == key))
            .map(|(_, v)| v.clone()))
    }

    fn upsert(&self, branch: BranchId, key: K, value: V) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let rows = map.entry(branch).or_default();
        match rows.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => rows.push((key, value)),
        }
        Ok(())
    }

    fn list(&self, branch: BranchId) -> StoreResult<Vec<V>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map
            .get(&branch)
            .map(|rows| rows.iter().map(|(_, v)| v.clone()).collect())
            .unwrap_or_default())
    }
}
