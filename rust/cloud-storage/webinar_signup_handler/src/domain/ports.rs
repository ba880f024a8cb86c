//! This module defines all of the ports that the notification domain requires

use crate::domain::models::{
    CalendarArtifact, CalendarInvite, PipelineErr, PipelineResponse, RenderErr, RenderedMessage,
    SignupPayload, StagedKey, TriggerReference,
};
use chrono::{DateTime, Utc};

/// Trait for reading and writing objects in a bucket based store
#[cfg_attr(test, mockall::automock(type Err = anyhow::Error;))]
pub trait ObjectStore: Send + Sync + 'static {
    /// The error type that can occur
    type Err: Send;

    /// read the object at `bucket/key`, `None` when it does not exist
    fn get(
        &self,
        bucket: &str,
        key: &str,
    ) -> impl Future<Output = Result<Option<Vec<u8>>, Self::Err>> + Send;

    /// write `content` to `bucket/key`, replacing whatever was there
    fn put(
        &self,
        bucket: &str,
        key: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> impl Future<Output = Result<(), Self::Err>> + Send;
}

/// port for getting the current system time
/// Having a trait allows tests to be consistent
pub trait TimeGetter: Send + Sync + 'static {
    /// get the current system time
    fn now(&self) -> DateTime<Utc>;
}

/// Produces the key each staged message is written under.
/// Every call must yield a key no earlier call returned.
pub trait StagingKeyGenerator: Send + Sync + 'static {
    /// the next unused key
    fn next_key(&self) -> StagedKey;
}

/// Strategy used to format the two messages of a run
#[cfg_attr(test, mockall::automock)]
pub trait MessageRenderer: Send + Sync + 'static {
    /// the notification the operator receives for every signup
    fn render_internal(&self, signup: &SignupPayload) -> Result<RenderedMessage, RenderErr>;

    /// the confirmation the submitter receives, carrying the calendar invite
    fn render_user(
        &self,
        signup: &SignupPayload,
        calendar: &CalendarArtifact,
    ) -> Result<RenderedMessage, RenderErr>;
}

/// Turns an invite into its canonical calendar text
pub trait CalendarSerializer: Send + Sync + 'static {
    /// serialize the invite
    fn serialize(&self, invite: &CalendarInvite) -> String;
}

/// trait which defines the interface of the signup notification pipeline
#[cfg_attr(test, mockall::automock)]
pub trait NotificationService: Send + Sync + 'static {
    /// run every stage for the object referenced by `trigger`
    fn process(
        &self,
        trigger: TriggerReference,
    ) -> impl Future<Output = Result<PipelineResponse, PipelineErr>> + Send;
}
