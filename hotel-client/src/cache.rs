use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::RwLock;

/// Cache key as a path of segments; the first segment is the resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    /// `[resource]`: the full list.
    pub fn list(resource: &str) -> Self {
        Self(vec![resource.to_string()])
    }

    /// `[resource, id]`: one record.
    pub fn one(resource: &str, id: &str) -> Self {
        Self(vec![resource.to_string(), id.to_string()])
    }

    /// `[resource, "field=value"]`: a filtered list.
    pub fn filtered(resource: &str, field: &str, value: &str) -> Self {
        Self(vec![resource.to_string(), format!("{field}={value}")])
    }

    pub fn resource(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or_default()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<QueryKey, Value>,
    generations: HashMap<String, u64>,
}

/// Raw JSON responses by key, shared by every resource client of one
/// `HotelClient`.
///
/// Each resource has a generation that `invalidate` bumps. A read records
/// the generation before it goes out and stores its response with
/// `insert_if_current`, so a response fetched before a mutation never lands
/// in the cache after it.
#[derive(Debug, Default)]
pub struct QueryCache {
    state: RwLock<CacheState>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &QueryKey) -> Option<Value> {
        self.state.read().await.entries.get(key).cloned()
    }

    pub async fn insert(&self, key: QueryKey, value: Value) {
        self.state.write().await.entries.insert(key, value);
    }

    /// Current generation of `resource`.
    pub async fn generation(&self, resource: &str) -> u64 {
        self.state
            .read()
            .await
            .generations
            .get(resource)
            .copied()
            .unwrap_or_default()
    }

    /// Store `value` only if `key`'s resource is still at `generation`.
    pub async fn insert_if_current(&self, key: QueryKey, value: Value, generation: u64) -> bool {
        let mut state = self.state.write().await;
        let current = state.generations.get(key.resource()).copied().unwrap_or_default();
        if current != generation {
            return false;
        }
        state.entries.insert(key, value);
        true
    }

    /// Drop every entry whose key starts with `resource` and bump its
    /// generation. Returns how many entries were removed.
    pub async fn invalidate(&self, resource: &str) -> usize {
        let mut state = self.state.write().await;
        *state.generations.entry(resource.to_string()).or_default() += 1;

        let before = state.entries.len();
        state.entries.retain(|key, _| key.resource() != resource);
        before - state.entries.len()
    }

    pub async fn clear(&self) {
        self.state.write().await.entries.clear();
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entries.is_empty()
    }
}
