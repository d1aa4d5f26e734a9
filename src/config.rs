//! Storage configuration loaded from environment variables.
//!
//! Everything is read once at startup via `std::env::var`; the resulting
//! [`Config`] is immutable for the life of the process.
//!
//! # Environment Variables
//!
//! ## Required Variables
//! - `R2_ENDPOINT`: S3-compatible API endpoint (e.g. `https://<account>.r2.cloudflarestorage.com`)
//! - `R2_ACCESS_KEY_ID`: access key
//! - `R2_SECRET_KEY`: secret key
//! - `R2_BUCKET_NAME`: bucket images are stored in
//!
//! ## Optional Variables
//! - `RUST_LOG`: Logging level (default: "info,image_store=debug")
//! - `R2_REGION`: signing region (default: "auto")
//! - `R2_FORCE_PATH_STYLE`: address the bucket in the URL path (default: true)

use serde::Deserialize;

/// Complete storage configuration loaded from environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// API endpoint of the object store
    pub r2_endpoint: String,

    /// Access key ID
    pub r2_access_key_id: String,

    /// Secret access key
    pub r2_secret_key: String,

    /// Bucket name where images are stored
    pub r2_bucket_name: String,

    /// Signing region ("auto" for R2, anything for MinIO)
    pub r2_region: String,

    /// Put the bucket name in the path instead of the host
    pub r2_force_path_style: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required environment variable is missing or
    /// an optional one is set but cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reading from an arbitrary source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            r2_endpoint: required(&lookup, "R2_ENDPOINT")?,
            r2_access_key_id: required(&lookup, "R2_ACCESS_KEY_ID")?,
            r2_secret_key: required(&lookup, "R2_SECRET_KEY")?,
            r2_bucket_name: required(&lookup, "R2_BUCKET_NAME")?,
            r2_region: or_default(&lookup, "R2_REGION", "auto".to_string())?,
            r2_force_path_style: or_default(&lookup, "R2_FORCE_PATH_STYLE", true)?,
        })
    }
}

/// Load a required variable.
///
/// # Errors
///
/// Returns an error if the variable is not set.
fn required<F>(lookup: &F, key: &str) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or_else(|| anyhow::anyhow!("Missing required environment variable: {}", key))
}

/// Load a variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn or_default<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        None => Ok(default),
    }
}
