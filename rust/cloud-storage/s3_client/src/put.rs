use anyhow::Context;
use aws_sdk_s3::primitives::ByteStream;

#[tracing::instrument(skip(client, content))]
pub(crate) async fn put(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    content: &[u8],
    content_type: Option<&str>,
) -> anyhow::Result<()> {
    let body = ByteStream::from(content.to_vec());
    client
        .put_object()
        .bucket(bucket)
        .key(key)
        .set_content_type(content_type.map(str::to_string))
        .body(body)
        .send()
        .await
        .context(format!("could not put item {key} into bucket {bucket}"))?;
    Ok(())
}
