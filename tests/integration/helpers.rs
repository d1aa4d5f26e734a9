use async_trait::async_trait;
use bytes::Bytes;
use image_store::{
    ImageStore,
    infrastructure::storage::{StorageService, StoreFailure},
};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

pub const TEST_BUCKET: &str = "test-bucket";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Put {
        key: String,
        size: usize,
        content_type: String,
    },
    Delete {
        key: String,
    },
    Presign {
        key: String,
        expires_in: Duration,
    },
}

/// In-memory store that records every call and can be told to fail writes.
#[derive(Clone, Default)]
pub struct RecordingStorage {
    calls: Arc<Mutex<Vec<StoreCall>>>,
    fail_with: Option<StoreFailure>,
}

impl RecordingStorage {
    pub fn failing(failure: StoreFailure) -> Self {
        Self {
            fail_with: Some(failure),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    fn record(&self, call: StoreCall) -> Result<(), StoreFailure> {
        self.calls.lock().expect("calls lock poisoned").push(call);
        match &self.fail_with {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StorageService for RecordingStorage {
    async fn put_object(
        &self,
        key: &str,
        payload: Bytes,
        content_type: &str,
    ) -> Result<(), StoreFailure> {
        self.record(StoreCall::Put {
            key: key.to_string(),
            size: payload.len(),
            content_type: content_type.to_string(),
        })
    }

    async fn delete_object(&self, key: &str) -> Result<(), StoreFailure> {
        self.record(StoreCall::Delete {
            key: key.to_string(),
        })
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StoreFailure> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(StoreCall::Presign {
                key: key.to_string(),
                expires_in,
            });
        Ok(format!(
            "https://test-storage.local/{}/{}?X-Amz-Expires={}",
            TEST_BUCKET,
            key,
            expires_in.as_secs()
        ))
    }
}

pub fn spawn_store() -> (ImageStore, RecordingStorage) {
    spawn_store_with(RecordingStorage::default())
}

pub fn spawn_store_with(storage: RecordingStorage) -> (ImageStore, RecordingStorage) {
    let store = ImageStore::new(Arc::new(storage.clone()), TEST_BUCKET);
    (store, storage)
}

pub fn tiny_png_bytes() -> Bytes {
    Bytes::from_static(&[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52,
    ])
}
