use anyhow::Context;
use aws_sdk_s3 as s3;

/// Gets a given item from the bucket, mapping a missing key to `None`
#[tracing::instrument(skip(client))]
pub(crate) async fn get(
    client: &s3::Client,
    bucket: &str,
    key: &str,
) -> anyhow::Result<Option<Vec<u8>>> {
    let resp = match client.get_object().bucket(bucket).key(key).send().await {
        Ok(resp) => resp,
        Err(e) => {
            if e.as_service_error().map(|e| e.is_no_such_key()) == Some(true) {
                tracing::trace!("object does not exist");
                return Ok(None);
            }

            return Err(e).context(format!("could not get item {key} from bucket {bucket}"));
        }
    };

    let body = resp
        .body
        .collect()
        .await
        .context("could not collect body")?;

    Ok(Some(body.into_bytes().to_vec()))
}
