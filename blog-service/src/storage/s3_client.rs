//! S3-compatible bucket client for cover images
//!
//! Works against AWS S3 and compatible services such as MinIO or the GCS
//! interoperability endpoint.

use async_trait::async_trait;
use aws_sdk_s3::{
    config::{Builder, Credentials, Region},
    error::DisplayErrorContext,
    primitives::ByteStream,
    types::ObjectCannedAcl,
    Client,
};
use bytes::Bytes;
use tracing::{debug, error, info};

use super::{public_url, ObjectStorage, StorageError};
use crate::config::StorageConfig;

pub struct S3Bucket {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3Bucket {
    /// Build the client once at startup; it is never reconfigured afterwards
    pub async fn connect(config: &StorageConfig) -> Self {
        info!("Initializing storage client for bucket: {}", config.bucket);

        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "blog-service",
        );

        let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        let mut builder = Builder::from(&shared).force_path_style(config.path_style);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint.clone());
        }

        Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url(),
        }
    }
}

#[async_trait]
impl ObjectStorage for S3Bucket {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn put_public(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        debug!("Uploading object: {} ({} bytes)", key, data.len());

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                let detail = DisplayErrorContext(&e).to_string();
                error!("Object upload failed: {} - {}", key, detail);
                StorageError::Upload(detail)
            })?;

        let url = public_url(&self.public_base_url, &self.bucket, key);
        info!("Object uploaded successfully: {}", url);
        Ok(url)
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        debug!("Deleting object: {}", key);

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Delete(DisplayErrorContext(&e).to_string()))?;

        info!("Object deleted: {}", key);
        Ok(())
    }
}
