//! [ObjectStore] backed by s3

use crate::domain::ports::ObjectStore;
use std::sync::Arc;

/// Adapter from [s3_client::S3] to [ObjectStore]
#[derive(Clone, Debug)]
pub struct S3ObjectStore {
    client: Arc<s3_client::S3>,
}

impl S3ObjectStore {
    /// wrap an existing client
    pub fn new(client: Arc<s3_client::S3>) -> Self {
        Self { client }
    }
}

impl ObjectStore for S3ObjectStore {
    type Err = anyhow::Error;

    async fn get(&self, bucket: &str, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        self.client.get(bucket, key).await
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> anyhow::Result<()> {
        self.client
            .put(bucket, key, &content, Some(content_type))
            .await
    }
}
