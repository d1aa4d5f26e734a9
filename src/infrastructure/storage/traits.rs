use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;

/// Backend failure, classified just enough for callers to tell a bad
/// credential or a dead endpoint from a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreFailure {
    #[error("store unreachable: {0}")]
    Unreachable(String),
    #[error("store refused credentials: {0}")]
    Unauthorized(String),
    #[error("store rejected request: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait StorageService: Send + Sync {
    async fn put_object(
        &self,
        key: &str,
        payload: Bytes,
        content_type: &str,
    ) -> Result<(), StoreFailure>;

    async fn delete_object(&self, key: &str) -> Result<(), StoreFailure>;

    /// Time-limited GET URL for `key`. Does not check that the object exists.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StoreFailure>;
}
