pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::image_store::{
    DEFAULT_SIGNED_URL_EXPIRY_SECS, ImageStore, UpdatedImage, UploadedImage,
};
pub use domain::image::{StorageError, is_valid_content_type};
