use thiserror::Error;

/// Reading an input object failed
#[derive(Debug, Error)]
pub enum FetchErr {
    /// the event did not name an object
    #[error("the trigger event did not reference an object")]
    MissingTrigger,
    /// the object does not exist
    #[error("object {key} does not exist in bucket {bucket}")]
    NotFound {
        /// bucket that was read
        bucket: String,
        /// key that was read
        key: String,
    },
    /// the store could not be read
    #[error("could not read object {key} from bucket {bucket}")]
    Read {
        /// bucket that was read
        bucket: String,
        /// key that was read
        key: String,
        /// underlying store error
        #[source]
        source: anyhow::Error,
    },
    /// the object is not the json we expected
    #[error("object {key} in bucket {bucket} could not be parsed")]
    Parse {
        /// bucket that was read
        bucket: String,
        /// key that was read
        key: String,
        /// underlying parse error
        #[source]
        source: serde_json::Error,
    },
}

/// Formatting a message failed
#[derive(Debug, Error)]
pub enum RenderErr {
    /// the configured template id is not in the catalog
    #[error("no template named {0}")]
    TemplateNotFound(String),
}

/// Writing a message into the staging bucket failed
#[derive(Debug, Error)]
pub enum StoreWriteErr {
    /// the message could not be turned into json
    #[error("could not serialize the staged message")]
    Serialize(#[source] serde_json::Error),
    /// the store rejected the write
    #[error("could not write object {key} to bucket {bucket}")]
    Write {
        /// bucket that was written
        bucket: String,
        /// key that was written
        key: String,
        /// underlying store error
        #[source]
        source: anyhow::Error,
    },
}

/// The first failure of a pipeline run
#[derive(Debug, Error)]
pub enum PipelineErr {
    /// see [FetchErr]
    #[error(transparent)]
    Fetch(#[from] FetchErr),
    /// see [RenderErr]
    #[error(transparent)]
    Render(#[from] RenderErr),
    /// see [StoreWriteErr]
    #[error(transparent)]
    StoreWrite(#[from] StoreWriteErr),
}
