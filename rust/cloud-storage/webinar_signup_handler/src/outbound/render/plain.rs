use super::{Identities, SUBJECT};
use crate::domain::{
    models::{CalendarArtifact, RenderErr, RenderedMessage, SignupPayload},
    ports::MessageRenderer,
};

/// Builds both bodies by concatenation. Never fails
#[derive(Debug, Clone, Default)]
pub struct PlainRenderer {
    identities: Identities,
}

impl PlainRenderer {
    /// create a new renderer
    pub fn new(identities: Identities) -> Self {
        Self { identities }
    }
}

impl MessageRenderer for PlainRenderer {
    fn render_internal(&self, signup: &SignupPayload) -> Result<RenderedMessage, RenderErr> {
        // the operator gets the raw submission, nothing fancy
        let body = format!(
            "Hi Self,\n\nThere was a new signup on the Webinar page. Below are all the details:\n\n{}\n\nThank you.",
            signup.pretty()
        );

        Ok(RenderedMessage {
            sender: self.identities.sender.clone(),
            recipient: self.identities.operator.clone(),
            subject: SUBJECT.to_string(),
            body,
            attachment: None,
        })
    }

    fn render_user(
        &self,
        signup: &SignupPayload,
        calendar: &CalendarArtifact,
    ) -> Result<RenderedMessage, RenderErr> {
        let name = signup.display_name().unwrap_or_default();
        let body = format!(
            "Hi {name},\n\nThank you for signing up for the Webinar. The calendar invite is attached so you will not miss it.\n\nThank you."
        );

        Ok(RenderedMessage {
            sender: self.identities.sender.clone(),
            recipient: self.identities.user_recipient(signup),
            subject: SUBJECT.to_string(),
            body,
            attachment: Some(calendar.clone()),
        })
    }
}
