pub mod dto;
pub mod service;

pub use dto::{UpdatedImage, UploadedImage};
pub use service::{DEFAULT_SIGNED_URL_EXPIRY_SECS, ImageStore};
