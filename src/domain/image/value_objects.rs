use super::errors::StorageError;
use http::Uri;
use std::fmt;
use uuid::Uuid;

/// MIME types accepted for stored images, compared case-insensitively.
pub const ALLOWED_CONTENT_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/gif",
];

/// Prefix under which newly uploaded images are keyed.
pub const COLLECTION_PREFIX: &str = "projects";

pub fn is_valid_content_type(content_type: &str) -> bool {
    ALLOWED_CONTENT_TYPES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(content_type))
}

/// A content type that passed the image allow-list.
///
/// The declared value is kept verbatim so the stored object carries exactly
/// what the uploader sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageContentType {
    value: String,
}

impl ImageContentType {
    pub fn new(value: &str) -> Result<Self, StorageError> {
        if !is_valid_content_type(value) {
            return Err(StorageError::InvalidContentType(value.to_string()));
        }
        Ok(Self {
            value: value.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

/// Path identifying an object inside the bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Derives `projects/<uuid>.<ext>` from the uploader's file name.
    pub fn generate(original_filename: &str) -> Self {
        Self(format!(
            "{}/{}.{}",
            COLLECTION_PREFIX,
            Uuid::new_v4(),
            file_extension(original_filename)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for ObjectKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ObjectKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything after the last `.`, casing untouched.
///
/// A name without a dot yields the whole name, matching how existing keys
/// in the bucket were produced.
pub fn file_extension(filename: &str) -> &str {
    filename.rsplit('.').next().unwrap_or(filename)
}

/// Turns a delete target into an object key.
///
/// Full URLs (including signed and path-style endpoint URLs) are reduced to
/// their path with any leading `<bucket>/` segment removed. Anything that
/// does not parse as an absolute URL is used as the key unchanged.
///
/// The path is not percent-decoded: a URL for a key containing spaces or
/// non-ASCII characters resolves to the encoded form (`a%20b.png`), which
/// will not match the stored key.
pub fn resolve_object_key(key_or_url: &str, bucket: &str) -> ObjectKey {
    if !key_or_url.starts_with("http") {
        return ObjectKey::from(key_or_url);
    }

    match key_or_url.parse::<Uri>() {
        Ok(uri) if uri.scheme().is_some() && uri.authority().is_some() => {
            let path = uri.path().trim_start_matches('/');
            let bucket_prefix = format!("{}/", bucket);
            let key = path.strip_prefix(&bucket_prefix).unwrap_or(path);
            ObjectKey::from(key)
        }
        _ => {
            tracing::warn!(input = %key_or_url, "Could not parse URL, using as key");
            ObjectKey::from(key_or_url)
        }
    }
}
