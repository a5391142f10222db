//! In-memory bucket used by the handler tests

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use super::{public_url, ObjectStorage, StorageError};

pub const TEST_BUCKET: &str = "test-covers";
const TEST_BASE_URL: &str = "http://storage.test";

#[derive(Default)]
pub struct MemoryBucket {
    objects: RwLock<HashMap<String, (Bytes, String)>>,
    fail_uploads: bool,
}

impl MemoryBucket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub async fn keys(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }

    pub async fn object(&self, key: &str) -> Option<(Bytes, String)> {
        self.objects.read().await.get(key).cloned()
    }
}

#[async_trait]
impl ObjectStorage for MemoryBucket {
    fn bucket(&self) -> &str {
        TEST_BUCKET
    }

    async fn put_public(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        if self.fail_uploads {
            return Err(StorageError::Upload("connection reset".to_string()));
        }
        self.objects
            .write()
            .await
            .insert(key.to_string(), (data, content_type.to_string()));
        Ok(public_url(TEST_BASE_URL, TEST_BUCKET, key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.objects.write().await.remove(key);
        Ok(())
    }
}
