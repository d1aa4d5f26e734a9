pub mod errors;
pub mod value_objects;

pub use errors::StorageError;
pub use value_objects::{
    ALLOWED_CONTENT_TYPES, COLLECTION_PREFIX, ImageContentType, ObjectKey, file_extension,
    is_valid_content_type, resolve_object_key,
};
