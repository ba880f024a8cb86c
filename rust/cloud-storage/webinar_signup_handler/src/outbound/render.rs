//! The two [MessageRenderer] strategies and the switch between them

mod plain;
mod template;

pub use plain::PlainRenderer;
pub use template::{Template, TemplateCatalog, TemplateIds, TemplateRenderer, render};

use crate::domain::{
    models::{CalendarArtifact, Identity, RenderErr, RenderedMessage, SignupPayload},
    ports::MessageRenderer,
};

/// subject shared by both messages
pub(crate) const SUBJECT: &str = "Webinar subscription";

/// Who messages are sent from and who gets the internal notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identities {
    /// receives the internal notification
    pub operator: Identity,
    /// the from address on both messages
    pub sender: Identity,
}

impl Default for Identities {
    fn default() -> Self {
        let operator = Identity::new("David Gatti", "david@0x4447.com");
        Self {
            sender: operator.clone(),
            operator,
        }
    }
}

impl Identities {
    /// The submitter, when they told us where to write to.
    /// Otherwise the confirmation goes to the operator.
    pub fn user_recipient(&self, signup: &SignupPayload) -> Identity {
        match signup.email() {
            Some(email) => Identity::new(signup.display_name().unwrap_or_default(), email),
            None => {
                tracing::warn!("signup has no email, addressing confirmation to the operator");
                self.operator.clone()
            }
        }
    }
}

/// Which strategy formats messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum RendererKind {
    /// fixed bodies built by concatenation
    #[default]
    Plain,
    /// bodies rendered from a [TemplateCatalog]
    Template,
}

/// The strategy picked at startup
#[derive(Debug, Clone)]
pub enum Renderer {
    /// see [PlainRenderer]
    Plain(PlainRenderer),
    /// see [TemplateRenderer]
    Template(TemplateRenderer),
}

impl MessageRenderer for Renderer {
    fn render_internal(&self, signup: &SignupPayload) -> Result<RenderedMessage, RenderErr> {
        match self {
            Renderer::Plain(r) => r.render_internal(signup),
            Renderer::Template(r) => r.render_internal(signup),
        }
    }

    fn render_user(
        &self,
        signup: &SignupPayload,
        calendar: &CalendarArtifact,
    ) -> Result<RenderedMessage, RenderErr> {
        match self {
            Renderer::Plain(r) => r.render_user(signup, calendar),
            Renderer::Template(r) => r.render_user(signup, calendar),
        }
    }
}
