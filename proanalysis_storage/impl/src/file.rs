use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use proanalysis_storage_contracts::StorageService;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Storage backed by a single JSON object on disk.
///
/// Every operation reads the file again, so concurrent writers (e.g. two CLI
/// invocations) follow last-writer-wins semantics. Within one process
/// operations are serialized.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: Arc<Path>,
    lock: Arc<Mutex<()>>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        Self {
            path: path.into(),
            lock: Default::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_content(&self) -> anyhow::Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(content) if content.iter().all(u8::is_ascii_whitespace) => Ok(None),
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "storage file does not exist yet");
                Ok(None)
            }
            Err(err) => Err(err).with_context(|| {
                format!("Failed to read storage file at {}", self.path.display())
            }),
        }
    }

    async fn read_items(&self) -> anyhow::Result<Map<String, Value>> {
        let Some(content) = self.read_content().await? else {
            return Ok(Map::new());
        };

        serde_json::from_slice(&content)
            .with_context(|| format!("Failed to parse storage file at {}", self.path.display()))
    }

    /// Like [`Self::read_items`], but a file that cannot be parsed is replaced
    /// by the next write.
    async fn read_items_for_write(&self) -> anyhow::Result<Map<String, Value>> {
        let Some(content) = self.read_content().await? else {
            return Ok(Map::new());
        };

        Ok(serde_json::from_slice(&content).unwrap_or_else(|err| {
            warn!(path = %self.path.display(), "discarding unreadable storage file: {err}");
            Map::new()
        }))
    }

    async fn write_items(&self, items: &Map<String, Value>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let content = serde_json::to_vec_pretty(items).context("Failed to serialize storage")?;

        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, content)
            .await
            .with_context(|| format!("Failed to write storage file at {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace storage file at {}", self.path.display()))
    }
}

impl StorageService for FileStorage {
    #[tracing::instrument(skip(self))]
    async fn get<T: DeserializeOwned + 'static>(&self, key: &str) -> anyhow::Result<Option<T>> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_items().await?;
        items
            .remove(key)
            .map(serde_json::from_value)
            .transpose()
            .context("Failed to deserialize stored value")
    }

    #[tracing::instrument(skip(self, value))]
    async fn set<T: Serialize + Sync + 'static>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let value = serde_json::to_value(value).context("Failed to serialize value")?;

        let _guard = self.lock.lock().await;
        let mut items = self.read_items_for_write().await?;
        items.insert(key.into(), value);
        self.write_items(&items).await
    }
}
