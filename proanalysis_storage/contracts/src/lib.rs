use std::future::Future;

use serde::{de::DeserializeOwned, Serialize};

/// Persistent key-value storage for small client-side records.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait StorageService: Sized + Send + Sync + 'static {
    /// Reads a stored item.
    fn get<T: DeserializeOwned + 'static>(
        &self,
        key: &str,
    ) -> impl Future<Output = anyhow::Result<Option<T>>> + Send;

    /// Creates a new or replaces an existing item.
    fn set<T: Serialize + Sync + 'static>(
        &self,
        key: &str,
        value: &T,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockStorageService {
    pub fn with_get<T: DeserializeOwned + Send + 'static>(
        mut self,
        key: String,
        result: Option<T>,
    ) -> Self {
        self.expect_get()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_get_error<T: DeserializeOwned + Send + 'static>(mut self, key: String) -> Self {
        self.expect_get::<T>()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| Box::pin(std::future::ready(Err(anyhow::anyhow!("storage error")))));
        self
    }

    pub fn with_set<T: std::fmt::Debug + PartialEq + Serialize + Send + Sync + 'static>(
        mut self,
        key: String,
        value: T,
    ) -> Self {
        self.expect_set()
            .once()
            .with(mockall::predicate::eq(key), mockall::predicate::eq(value))
            .return_once(|_, _| Box::pin(std::future::ready(Ok(()))));
        self
    }

    pub fn with_set_error<T: std::fmt::Debug + PartialEq + Serialize + Send + Sync + 'static>(
        mut self,
        key: String,
        value: T,
    ) -> Self {
        self.expect_set()
            .once()
            .with(mockall::predicate::eq(key), mockall::predicate::eq(value))
            .return_once(|_, _| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!("quota exceeded"))))
            });
        self
    }
}
