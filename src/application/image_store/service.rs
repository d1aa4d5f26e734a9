use crate::{
    application::image_store::dto::{UpdatedImage, UploadedImage},
    config::Config,
    domain::image::{ImageContentType, ObjectKey, StorageError, resolve_object_key},
    infrastructure::storage::{R2StorageService, StorageService, StoreFailure},
};
use bytes::Bytes;
use std::{sync::Arc, time::Duration};
use tracing::{debug, error, info, instrument};

/// Lifetime of URLs handed back from uploads.
pub const DEFAULT_SIGNED_URL_EXPIRY_SECS: u64 = 3600;

/// Facade over the image bucket.
///
/// Every call is a single attempt against the backend: there is no retry, no
/// locking and no ordering between concurrent calls on the same key. The
/// facade only holds the shared backend handle and the bucket name, so it is
/// cheap to clone into every request handler.
#[derive(Clone)]
pub struct ImageStore {
    storage: Arc<dyn StorageService>,
    bucket: String,
}

impl ImageStore {
    /// # Arguments
    /// * `storage` - Backend handle, constructed once at startup
    /// * `bucket` - Bucket the backend writes to; used to recognise
    ///   path-style URLs on delete
    pub fn new(storage: Arc<dyn StorageService>, bucket: impl Into<String>) -> Self {
        Self {
            storage,
            bucket: bucket.into(),
        }
    }

    /// Builds the R2-backed store described by `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(R2StorageService::from_config(config)),
            config.r2_bucket_name.clone(),
        )
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Stores a new image under a freshly generated `projects/` key.
    ///
    /// # Errors
    /// - `InvalidContentType` before anything is sent
    /// - `WriteFailed`, `AuthFailed` or `Unreachable` if the put fails; the
    ///   key must then be treated as absent
    /// - `SignFailed` if the put succeeded but signing did not. The object
    ///   stays at the generated key.
    #[instrument(skip(self, payload), fields(size = payload.len()))]
    pub async fn upload_image(
        &self,
        payload: Bytes,
        original_filename: &str,
        content_type: &str,
    ) -> Result<UploadedImage, StorageError> {
        let content_type = ImageContentType::new(content_type)?;
        let key = ObjectKey::generate(original_filename);
        debug!(key = %key, "Derived object key");

        self.storage
            .put_object(key.as_str(), payload, content_type.as_str())
            .await
            .map_err(|failure| {
                error!(key = %key, error = %failure, "R2 upload failed");
                into_storage_error(failure, StorageError::WriteFailed)
            })?;

        let url = self
            .presign(&key, Duration::from_secs(DEFAULT_SIGNED_URL_EXPIRY_SECS))
            .await?;

        info!(key = %key, "Uploaded image");
        Ok(UploadedImage {
            key: key.into_inner(),
            url,
        })
    }

    /// Overwrites the object at `key`. Nothing of the previous content is kept.
    ///
    /// `original_filename` is accepted so callers can pass the same upload
    /// metadata as for [`ImageStore::upload_image`]; the key is never derived
    /// from it.
    #[instrument(skip(self, payload, _original_filename), fields(size = payload.len()))]
    pub async fn update_image(
        &self,
        key: &str,
        payload: Bytes,
        _original_filename: &str,
        content_type: &str,
    ) -> Result<UpdatedImage, StorageError> {
        let content_type = ImageContentType::new(content_type)?;

        self.storage
            .put_object(key, payload, content_type.as_str())
            .await
            .map_err(|failure| {
                error!(key = %key, error = %failure, "R2 update failed");
                into_storage_error(failure, StorageError::WriteFailed)
            })?;

        info!(key = %key, "Updated image");
        Ok(UpdatedImage {
            success: true,
            key: key.to_string(),
        })
    }

    /// Deletes by object key or by any URL pointing at the object.
    ///
    /// Deleting a key that does not exist is not an error as long as the
    /// backend accepts it.
    #[instrument(skip(self))]
    pub async fn delete_image(&self, key_or_url: &str) -> Result<(), StorageError> {
        let key = resolve_object_key(key_or_url, &self.bucket);

        self.storage
            .delete_object(key.as_str())
            .await
            .map_err(|failure| {
                error!(key = %key, error = %failure, "R2 delete failed");
                into_storage_error(failure, StorageError::DeleteFailed)
            })?;

        info!(key = %key, "Deleted image");
        Ok(())
    }

    /// Signed GET URL for `key`, valid for `expiry_secs`.
    ///
    /// The key is not checked; a URL for a missing object only fails once it
    /// is fetched.
    pub async fn signed_url(&self, key: &str, expiry_secs: u64) -> Result<String, StorageError> {
        self.presign(&ObjectKey::from(key), Duration::from_secs(expiry_secs))
            .await
    }

    pub async fn signed_url_default(&self, key: &str) -> Result<String, StorageError> {
        self.signed_url(key, DEFAULT_SIGNED_URL_EXPIRY_SECS).await
    }

    async fn presign(&self, key: &ObjectKey, expires_in: Duration) -> Result<String, StorageError> {
        debug!(key = %key, expires_in = expires_in.as_secs(), "Signing image URL");
        self.storage
            .presign_get(key.as_str(), expires_in)
            .await
            .map_err(|failure| {
                error!(key = %key, error = %failure, "R2 signing failed");
                StorageError::SignFailed(failure.to_string())
            })
    }
}

fn into_storage_error(
    failure: StoreFailure,
    otherwise: fn(String) -> StorageError,
) -> StorageError {
    match failure {
        StoreFailure::Unreachable(detail) => StorageError::Unreachable(detail),
        StoreFailure::Unauthorized(detail) => StorageError::AuthFailed(detail),
        StoreFailure::Rejected(detail) => otherwise(detail),
    }
}
