use std::path::PathBuf;

use proanalysis_config::StorageConfig;
use proanalysis_storage_contracts::StorageService;
use proanalysis_storage_impl::{FileStorage, MemoryStorage};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

/// Storage backend selected at startup.
#[derive(Debug, Clone)]
pub enum Storage {
    File(FileStorage),
    /// Discards all records when the process exits.
    Memory(MemoryStorage),
}

impl Storage {
    pub fn open(config: &StorageConfig, ephemeral: bool) -> Self {
        if ephemeral {
            debug!("Using in-memory storage");
            Self::Memory(MemoryStorage::new())
        } else {
            debug!(path = %config.path.display(), "Using file storage");
            Self::File(FileStorage::new(config.path.clone()))
        }
    }

    pub fn path(&self) -> Option<PathBuf> {
        match self {
            Self::File(storage) => Some(storage.path().to_owned()),
            Self::Memory(_) => None,
        }
    }
}

impl StorageService for Storage {
    async fn get<T: DeserializeOwned + 'static>(&self, key: &str) -> anyhow::Result<Option<T>> {
        match self {
            Self::File(storage) => storage.get(key).await,
            Self::Memory(storage) => storage.get(key).await,
        }
    }

    async fn set<T: Serialize + Sync + 'static>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        match self {
            Self::File(storage) => storage.set(key, value).await,
            Self::Memory(storage) => storage.set(key, value).await,
        }
    }
}
