use super::traits::{StorageService, StoreFailure};
use crate::config::Config;
use async_trait::async_trait;
use aws_sdk_s3::{
    Client,
    config::{BehaviorVersion, Credentials, Region, retry::RetryConfig},
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    presigning::PresigningConfig,
    primitives::ByteStream,
};
use bytes::Bytes;
use std::time::Duration;

/// S3 error codes that mean the credentials, not the request, are wrong.
const AUTH_ERROR_CODES: [&str; 5] = [
    "AccessDenied",
    "InvalidAccessKeyId",
    "SignatureDoesNotMatch",
    "ExpiredToken",
    "InvalidToken",
];

pub struct R2StorageService {
    client: Client,
    bucket: String,
}

impl R2StorageService {
    pub fn new(
        key: String,
        secret: String,
        endpoint: String,
        region: String,
        force_path_style: bool,
        bucket: String,
    ) -> Self {
        let creds = Credentials::new(key, secret, None, None, "r2");
        let config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .credentials_provider(creds)
            .endpoint_url(endpoint)
            .region(Region::new(region))
            .force_path_style(force_path_style)
            .retry_config(RetryConfig::disabled())
            .build();
        tracing::info!(bucket = %bucket, force_path_style, "R2 storage initialized");
        Self {
            client: Client::from_conf(config),
            bucket,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.r2_access_key_id.clone(),
            config.r2_secret_key.clone(),
            config.r2_endpoint.clone(),
            config.r2_region.clone(),
            config.r2_force_path_style,
            config.r2_bucket_name.clone(),
        )
    }
}

fn classify<E, R>(err: SdkError<E, R>) -> StoreFailure
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let detail = DisplayErrorContext(&err).to_string();
    match &err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            StoreFailure::Unreachable(detail)
        }
        _ if err
            .code()
            .is_some_and(|code| AUTH_ERROR_CODES.iter().any(|auth| *auth == code)) =>
        {
            StoreFailure::Unauthorized(detail)
        }
        _ => StoreFailure::Rejected(detail),
    }
}

#[async_trait]
impl StorageService for R2StorageService {
    async fn put_object(
        &self,
        key: &str,
        payload: Bytes,
        content_type: &str,
    ) -> Result<(), StoreFailure> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(payload))
            .content_type(content_type)
            .send()
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<(), StoreFailure> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StoreFailure> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StoreFailure::Rejected(format!("invalid presign duration: {}", e)))?;
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(classify)?;
        Ok(presigned.uri().to_string())
    }
}
