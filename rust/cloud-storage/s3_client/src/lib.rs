//! Thin wrapper over [aws_sdk_s3::Client] exposing the object reads and writes the lambdas need

mod get;
mod put;

#[derive(Clone, Debug)]
pub struct S3 {
    inner: aws_sdk_s3::Client,
}

impl S3 {
    pub fn new(inner: aws_sdk_s3::Client) -> Self {
        Self { inner }
    }

    /// Retrieves the provided key from the bucket.
    /// Returns `None` when the bucket has no object under that key.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, bucket: &str, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        get::get(&self.inner, bucket, key).await
    }

    /// Puts the provided content into the bucket at the provided key.
    #[tracing::instrument(skip(self, content), fields(content_length = content.len()))]
    pub async fn put(
        &self,
        bucket: &str,
        key: &str,
        content: &[u8],
        content_type: Option<&str>,
    ) -> anyhow::Result<()> {
        put::put(&self.inner, bucket, key, content, content_type).await
    }
}
