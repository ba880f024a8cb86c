//! Lambda handler which turns s3 put events into pipeline runs

use crate::domain::{
    models::{FetchErr, PipelineResponse, TriggerReference},
    ports::NotificationService,
};
use aws_lambda_events::event::s3::{S3Event, S3EventRecord};
use lambda_runtime::{
    Error, LambdaEvent,
    tracing::{self},
};

/// Runs the pipeline for every object named in the s3 event.
/// Records are processed in order and the first failure is returned to the runtime.
#[tracing::instrument(skip(service, event), fields(request_id = %event.context.request_id))]
pub async fn handler<T: NotificationService>(
    service: &T,
    event: LambdaEvent<S3Event>,
) -> Result<PipelineResponse, Error> {
    let triggers = trigger_references(&event.payload).inspect_err(|e| {
        tracing::error!(error=?e, "invalid trigger event");
    })?;

    tracing::info!(record_count = triggers.len(), "processing s3 records");

    for trigger in triggers {
        if let Err(err) = service.process(trigger.clone()).await {
            tracing::error!(error=?err, trigger=%trigger, "error processing record");
            return Err(err.into());
        }
    }

    tracing::trace!("processing complete");

    Ok(PipelineResponse::ok())
}

/// The objects named by the event, keys decoded
pub fn trigger_references(event: &S3Event) -> Result<Vec<TriggerReference>, FetchErr> {
    if event.records.is_empty() {
        return Err(FetchErr::MissingTrigger);
    }

    event.records.iter().map(trigger_reference).collect()
}

fn trigger_reference(record: &S3EventRecord) -> Result<TriggerReference, FetchErr> {
    let bucket = non_empty(record.s3.bucket.name.as_deref()).ok_or(FetchErr::MissingTrigger)?;
    let key = non_empty(record.s3.object.key.as_deref()).ok_or(FetchErr::MissingTrigger)?;

    Ok(TriggerReference::new(bucket, decode_key(key)))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// s3 notifications form encode keys, spaces arrive as `+`
fn decode_key(key: &str) -> String {
    let spaced = key.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            tracing::warn!(error=?e, key=%key, "unable to decode key, using it as is");
            spaced
        }
    }
}
