// Object storage for post cover images

pub mod s3_client;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use s3_client::S3Bucket;

/// Storage error types
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Delete error: {0}")]
    Delete(String),
}

/// A bucket that serves its objects at public URLs
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    fn bucket(&self) -> &str;

    /// Store `data` under `key`, make it publicly readable and return its URL
    async fn put_public(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError>;

    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Collision-resistant object name: upload time in millis, then the
/// client's file name stripped of any directory part.
pub fn object_key(original_filename: Option<&str>, timestamp_millis: i64) -> String {
    let name = original_filename
        .and_then(|f| f.rsplit(['/', '\\']).next())
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .unwrap_or("cover");

    let name: String = name
        .chars()
        .map(|c| if c.is_whitespace() || c.is_control() { '_' } else { c })
        .collect();

    format!("{}_{}", timestamp_millis, name)
}

/// Public URL of an object: `{base}/{bucket}/{key}`
pub fn public_url(base_url: &str, bucket: &str, key: &str) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        bucket,
        urlencoding::encode(key)
    )
}
