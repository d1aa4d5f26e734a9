use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum StorageError {
    #[error("Invalid image type: {0}")]
    InvalidContentType(String),
    #[error("Failed to upload image: {0}")]
    WriteFailed(String),
    #[error("Failed to delete image: {0}")]
    DeleteFailed(String),
    #[error("Failed to sign image URL: {0}")]
    SignFailed(String),
    #[error("Storage rejected credentials: {0}")]
    AuthFailed(String),
    #[error("Storage unreachable: {0}")]
    Unreachable(String),
}
