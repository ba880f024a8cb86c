//! One record per completed pipeline stage.
//! Each stage consumes the record of its predecessor and hands back the next one,
//! so a stage can only see what earlier stages produced and can only add its own output.

use super::{
    CalendarArtifact, PipelineResponse, RenderedMessage, ScheduleRecord, SignupPayload, StagedKey,
    TriggerReference,
};

/// Nothing has run yet
#[derive(Debug, Clone)]
pub struct Triggered {
    /// the object that started the run
    pub trigger: TriggerReference,
}

impl Triggered {
    /// start a run for `trigger`
    pub fn new(trigger: TriggerReference) -> Self {
        Self { trigger }
    }

    /// record the fetched signup
    pub fn with_signup(self, signup: SignupPayload) -> SignupFetched {
        SignupFetched {
            trigger: self.trigger,
            signup,
        }
    }
}

/// The signup object has been read
#[derive(Debug, Clone)]
pub struct SignupFetched {
    /// the object that started the run
    pub trigger: TriggerReference,
    /// what the submitter sent us
    pub signup: SignupPayload,
}

impl SignupFetched {
    /// record the rendered internal notification
    pub fn with_internal_message(self, internal_message: RenderedMessage) -> InternalRendered {
        InternalRendered {
            trigger: self.trigger,
            signup: self.signup,
            internal_message,
        }
    }
}

/// The internal notification is formatted
#[derive(Debug, Clone)]
pub struct InternalRendered {
    /// the object that started the run
    pub trigger: TriggerReference,
    /// what the submitter sent us
    pub signup: SignupPayload,
    /// notification for the operator
    pub internal_message: RenderedMessage,
}

impl InternalRendered {
    /// record where the internal notification was staged
    pub fn with_internal_key(self, internal_key: StagedKey) -> InternalStaged {
        InternalStaged {
            trigger: self.trigger,
            signup: self.signup,
            internal_key,
        }
    }
}

/// The internal notification is in the staging bucket
#[derive(Debug, Clone)]
pub struct InternalStaged {
    /// the object that started the run
    pub trigger: TriggerReference,
    /// what the submitter sent us
    pub signup: SignupPayload,
    /// where the internal notification was written
    pub internal_key: StagedKey,
}

impl InternalStaged {
    /// record the fetched schedule
    pub fn with_schedule(self, schedule: ScheduleRecord) -> ScheduleFetched {
        ScheduleFetched {
            trigger: self.trigger,
            signup: self.signup,
            internal_key: self.internal_key,
            schedule,
        }
    }
}

/// The next webinar time is known
#[derive(Debug, Clone)]
pub struct ScheduleFetched {
    /// the object that started the run
    pub trigger: TriggerReference,
    /// what the submitter sent us
    pub signup: SignupPayload,
    /// where the internal notification was written
    pub internal_key: StagedKey,
    /// the next webinar
    pub schedule: ScheduleRecord,
}

impl ScheduleFetched {
    /// record the encoded calendar invite
    pub fn with_calendar(self, calendar: CalendarArtifact) -> CalendarBuilt {
        CalendarBuilt {
            trigger: self.trigger,
            signup: self.signup,
            internal_key: self.internal_key,
            schedule: self.schedule,
            calendar,
        }
    }
}

/// The calendar invite is encoded
#[derive(Debug, Clone)]
pub struct CalendarBuilt {
    /// the object that started the run
    pub trigger: TriggerReference,
    /// what the submitter sent us
    pub signup: SignupPayload,
    /// where the internal notification was written
    pub internal_key: StagedKey,
    /// the next webinar
    pub schedule: ScheduleRecord,
    /// the encoded invite
    pub calendar: CalendarArtifact,
}

impl CalendarBuilt {
    /// record the rendered user confirmation
    pub fn with_user_message(self, user_message: RenderedMessage) -> UserRendered {
        UserRendered {
            trigger: self.trigger,
            internal_key: self.internal_key,
            schedule: self.schedule,
            user_message,
        }
    }
}

/// The user confirmation is formatted
#[derive(Debug, Clone)]
pub struct UserRendered {
    /// the object that started the run
    pub trigger: TriggerReference,
    /// where the internal notification was written
    pub internal_key: StagedKey,
    /// the next webinar
    pub schedule: ScheduleRecord,
    /// confirmation for the submitter, carrying the invite
    pub user_message: RenderedMessage,
}

impl UserRendered {
    /// record where the user confirmation was staged
    pub fn with_user_key(self, user_key: StagedKey) -> Completed {
        Completed {
            trigger: self.trigger,
            internal_key: self.internal_key,
            user_key,
            schedule: self.schedule,
        }
    }
}

/// Both messages are in the staging bucket
#[derive(Debug, Clone)]
pub struct Completed {
    /// the object that started the run
    pub trigger: TriggerReference,
    /// where the internal notification was written
    pub internal_key: StagedKey,
    /// where the user confirmation was written
    pub user_key: StagedKey,
    /// the webinar the user was invited to
    pub schedule: ScheduleRecord,
}

impl Completed {
    /// the acknowledgement returned to the runtime, nothing from the run is echoed
    pub fn into_response(self) -> PipelineResponse {
        PipelineResponse::ok()
    }
}
