use std::fmt;

/// Identifies the object whose creation triggered the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerReference {
    /// the bucket the object was written into
    pub bucket: String,
    /// the decoded object key
    pub key: String,
}

impl TriggerReference {
    /// create a new reference to `bucket/key`
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for TriggerReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// The value handed back to the runtime once both messages are staged
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PipelineResponse {
    /// always `OK`
    pub message: String,
}

impl PipelineResponse {
    /// the fixed acknowledgement
    pub fn ok() -> Self {
        Self {
            message: "OK".to_string(),
        }
    }
}
