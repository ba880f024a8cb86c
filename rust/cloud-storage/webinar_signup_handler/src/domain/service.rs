//! This module defines the pipeline service exposed by this crate

use crate::domain::{
    models::{
        AttachmentStyle, CalendarArtifact, CalendarBuilt, CalendarDetails, CalendarInvite,
        Completed, FetchErr, InternalRendered, InternalStaged, PipelineErr, PipelineResponse,
        RenderErr, RenderedMessage, ScheduleFetched, ScheduleRecord, SignupFetched,
        SignupPayload, StagedKey, StagedMessage, StoreWriteErr, TriggerReference, Triggered,
        UserRendered,
    },
    ports::{
        CalendarSerializer, MessageRenderer, NotificationService, ObjectStore,
        StagingKeyGenerator,
    },
};
use base64::{Engine, engine::general_purpose};

#[cfg(test)]
mod tests;

const STAGED_CONTENT_TYPE: &str = "application/json";

/// The fixed places the pipeline reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocations {
    /// where rendered messages are staged for the dispatcher
    pub staging_bucket: String,
    /// bucket holding the schedule singleton
    pub schedule_bucket: String,
    /// key of the schedule singleton
    pub schedule_key: String,
}

/// Everything about a run that is decided at deploy time
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// see [StoreLocations]
    pub locations: StoreLocations,
    /// the webinar every invite describes
    pub calendar: CalendarDetails,
    /// how attachments are laid out in staged messages
    pub attachment_style: AttachmentStyle,
}

/// concrete struct which implements [NotificationService]
pub struct NotificationPipelineImpl<S, R, C, K> {
    store: S,
    renderer: R,
    serializer: C,
    keys: K,
    settings: PipelineSettings,
}

impl<S, R, C, K> NotificationPipelineImpl<S, R, C, K>
where
    S: ObjectStore,
    anyhow::Error: From<S::Err>,
    R: MessageRenderer,
    C: CalendarSerializer,
    K: StagingKeyGenerator,
{
    /// create a new instance of this service
    pub fn new(store: S, renderer: R, serializer: C, keys: K, settings: PipelineSettings) -> Self {
        Self {
            store,
            renderer,
            serializer,
            keys,
            settings,
        }
    }

    /// stage 1: read and parse the object that triggered the run
    #[tracing::instrument(err, skip_all)]
    async fn fetch_signup(&self, ctx: Triggered) -> Result<SignupFetched, FetchErr> {
        tracing::trace!("fetching signup");
        let TriggerReference { bucket, key } = &ctx.trigger;
        let bytes = self.read_object(bucket, key).await?;
        let signup = SignupPayload::from_slice(&bytes).map_err(|source| FetchErr::Parse {
            bucket: bucket.clone(),
            key: key.clone(),
            source,
        })?;

        Ok(ctx.with_signup(signup))
    }

    /// stage 2: format the notification for the operator
    #[tracing::instrument(err, skip_all)]
    fn render_internal(&self, ctx: SignupFetched) -> Result<InternalRendered, RenderErr> {
        tracing::trace!("rendering internal message");
        let message = self.renderer.render_internal(&ctx.signup)?;
        Ok(ctx.with_internal_message(message))
    }

    /// stage 3: write the operator notification to the staging bucket
    #[tracing::instrument(err, skip_all)]
    async fn stage_internal(&self, ctx: InternalRendered) -> Result<InternalStaged, StoreWriteErr> {
        tracing::trace!("staging internal message");
        let key = self.stage_message(&ctx.internal_message).await?;
        Ok(ctx.with_internal_key(key))
    }

    /// stage 4: read the next webinar time
    #[tracing::instrument(err, skip_all)]
    async fn fetch_schedule(&self, ctx: InternalStaged) -> Result<ScheduleFetched, FetchErr> {
        tracing::trace!("fetching schedule");
        let StoreLocations {
            schedule_bucket,
            schedule_key,
            ..
        } = &self.settings.locations;
        let bytes = self.read_object(schedule_bucket, schedule_key).await?;
        let schedule = ScheduleRecord::from_slice(&bytes).map_err(|source| FetchErr::Parse {
            bucket: schedule_bucket.clone(),
            key: schedule_key.clone(),
            source,
        })?;

        Ok(ctx.with_schedule(schedule))
    }

    /// stage 5: build the calendar invite and encode it for attaching
    #[tracing::instrument(skip_all, fields(start = %ctx.schedule.time))]
    fn build_calendar(&self, ctx: ScheduleFetched) -> CalendarBuilt {
        tracing::trace!("building calendar");
        let invite = CalendarInvite::for_schedule(&self.settings.calendar, &ctx.schedule);
        let text = self.serializer.serialize(&invite);
        let artifact = CalendarArtifact {
            file_name: self.settings.calendar.file_name.clone(),
            content_base64: general_purpose::STANDARD.encode(text),
        };

        ctx.with_calendar(artifact)
    }

    /// stage 6: format the confirmation for the submitter
    #[tracing::instrument(err, skip_all)]
    fn render_user(&self, ctx: CalendarBuilt) -> Result<UserRendered, RenderErr> {
        tracing::trace!("rendering user message");
        let message = self.renderer.render_user(&ctx.signup, &ctx.calendar)?;
        Ok(ctx.with_user_message(message))
    }

    /// stage 7: write the submitter confirmation to the staging bucket
    #[tracing::instrument(err, skip_all)]
    async fn stage_user(&self, ctx: UserRendered) -> Result<Completed, StoreWriteErr> {
        tracing::trace!("staging user message");
        let key = self.stage_message(&ctx.user_message).await?;
        Ok(ctx.with_user_key(key))
    }

    async fn read_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, FetchErr> {
        match self.store.get(bucket, key).await {
            Ok(Some(bytes)) => Ok(bytes),
            Ok(None) => Err(FetchErr::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            Err(e) => Err(FetchErr::Read {
                bucket: bucket.to_string(),
                key: key.to_string(),
                source: anyhow::Error::from(e),
            }),
        }
    }

    async fn stage_message(&self, message: &RenderedMessage) -> Result<StagedKey, StoreWriteErr> {
        let staged = StagedMessage::from_rendered(message, self.settings.attachment_style);
        let body = serde_json::to_vec(&staged).map_err(StoreWriteErr::Serialize)?;
        let bucket = &self.settings.locations.staging_bucket;
        let key = self.keys.next_key();

        self.store
            .put(bucket, &key.0, body, STAGED_CONTENT_TYPE)
            .await
            .map_err(|e| StoreWriteErr::Write {
                bucket: bucket.clone(),
                key: key.0.clone(),
                source: anyhow::Error::from(e),
            })?;

        tracing::info!(
            key=%key,
            sender=%message.sender,
            recipient=%message.recipient,
            "message staged"
        );

        Ok(key)
    }
}

impl<S, R, C, K> NotificationService for NotificationPipelineImpl<S, R, C, K>
where
    S: ObjectStore,
    anyhow::Error: From<S::Err>,
    R: MessageRenderer,
    C: CalendarSerializer,
    K: StagingKeyGenerator,
{
    #[tracing::instrument(err, skip(self, trigger), fields(trigger = %trigger))]
    async fn process(&self, trigger: TriggerReference) -> Result<PipelineResponse, PipelineErr> {
        let ctx = Triggered::new(trigger);
        let ctx = self.fetch_signup(ctx).await?;
        let ctx = self.render_internal(ctx)?;
        let ctx = self.stage_internal(ctx).await?;
        let ctx = self.fetch_schedule(ctx).await?;
        let ctx = self.build_calendar(ctx);
        let ctx = self.render_user(ctx)?;
        let ctx = self.stage_user(ctx).await?;

        tracing::info!(
            internal_key=%ctx.internal_key,
            user_key=%ctx.user_key,
            webinar=%ctx.schedule.time,
            "signup notifications staged"
        );

        Ok(ctx.into_response())
    }
}
