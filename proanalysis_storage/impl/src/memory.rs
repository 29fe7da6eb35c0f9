use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::Context;
use proanalysis_storage_contracts::StorageService;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Storage that lives only as long as the process.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StorageService for MemoryStorage {
    #[tracing::instrument(skip(self))]
    async fn get<T: DeserializeOwned + 'static>(&self, key: &str) -> anyhow::Result<Option<T>> {
        let value = self.lock().get(key).cloned();
        value
            .map(serde_json::from_value)
            .transpose()
            .context("Failed to deserialize stored value")
    }

    #[tracing::instrument(skip(self, value))]
    async fn set<T: Serialize + Sync + 'static>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let value = serde_json::to_value(value).context("Failed to serialize value")?;
        self.lock().insert(key.into(), value);
        Ok(())
    }
}
