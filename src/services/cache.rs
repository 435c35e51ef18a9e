//! In-memory query cache keyed by hierarchical query keys
//!
//! Entries are stored as JSON values so one map can hold every read model.
//! Invalidation removes every entry whose key starts with the given prefix.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// Append one more segment (an id, a date, a zoo filter)
    pub fn with(mut self, part: impl ToString) -> Self {
        self.0.push(part.to_string());
        self
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }
}

impl<const N: usize> From<[&str; N]> for QueryKey {
    fn from(parts: [&str; N]) -> Self {
        Self::new(parts)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

#[derive(Clone, Debug, Default)]
pub struct QueryCache {
    entries: Arc<RwLock<HashMap<QueryKey, Value>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, or run `load` and remember its result.
    /// Failed loads are not cached.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, load: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        if let Some(value) = self.entries.read().await.get(&key).cloned() {
            match serde_json::from_value(value) {
                Ok(hit) => {
                    tracing::debug!("Cache hit for {}", key);
                    return Ok(hit);
                }
                Err(e) => tracing::warn!("Dropping unreadable cache entry {}: {}", key, e),
            }
        }

        let fresh = load().await?;
        let value = serde_json::to_value(&fresh)?;
        self.entries.write().await.insert(key, value);
        Ok(fresh)
    }

    /// Drop every entry under `prefix`, returning how many were removed
    pub async fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - entries.len();
        tracing::debug!("Invalidated {} entries under {}", removed, prefix);
        removed
    }

    pub async fn invalidate_all(&self, prefixes: &[QueryKey]) {
        for prefix in prefixes {
            self.invalidate(prefix).await;
        }
    }

    /// Forget everything
    pub async fn reset(&self) {
        self.entries.write().await.clear();
        tracing::debug!("Query cache reset");
    }

    pub async fn contains(&self, key: &QueryKey) -> bool {
        self.entries.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
