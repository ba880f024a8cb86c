#![recursion_limit = "256"]

use anyhow::Context;
use aws_lambda_events::s3::S3Event;
use lambda_entrypoint::LambdaEntrypoint;
use lambda_runtime::{Error, LambdaEvent, run, service_fn, tracing};
use std::sync::Arc;
use webinar_signup_handler::{
    config::Config,
    domain::service::NotificationPipelineImpl,
    inbound::lambda_handler::handler,
    outbound::{
        ics::IcsWriter, s3::S3ObjectStore, staging_key::EpochKeyGenerator, time::DefaultTime,
    },
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    LambdaEntrypoint::default().init();

    tracing::trace!("initiating lambda");

    let config = Config::from_env().context("invalid configuration")?;
    tracing::trace!(config=?config, "initialized config");

    let s3_client = s3_client::S3::new(aws_sdk_s3::Client::new(
        &aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region("us-east-1")
            .load()
            .await,
    ));

    tracing::trace!("initialized s3 client");

    let service = Arc::new(NotificationPipelineImpl::new(
        S3ObjectStore::new(Arc::new(s3_client)),
        config.renderer(),
        IcsWriter,
        EpochKeyGenerator::new(DefaultTime),
        config.pipeline_settings(),
    ));

    let func = service_fn(move |event: LambdaEvent<S3Event>| {
        let service = service.clone();
        async move { handler(service.as_ref(), event).await }
    });

    run(func).await
}
