//! Deploy time configuration, read from environment variables

use crate::{
    domain::{
        models::{AttachmentStyle, CalendarDetails},
        service::{PipelineSettings, StoreLocations},
    },
    outbound::render::{
        Identities, PlainRenderer, Renderer, RendererKind, TemplateCatalog, TemplateIds,
        TemplateRenderer,
    },
};
use anyhow::Context;
use std::str::FromStr;

/// bucket the dispatcher picks messages up from
pub const DEFAULT_STAGING_BUCKET: &str = "0x4447-web-us-east-1-smtp";
/// bucket holding the schedule singleton
pub const DEFAULT_SCHEDULE_BUCKET: &str = "webinars.0x4447.com.db.events";
/// key of the schedule singleton
pub const DEFAULT_SCHEDULE_KEY: &str = "latest_time.json";

/// The configuration parameters for the function.
///
/// Every value has a production default so the function runs without any environment.
/// The variables exist so dev deployments can point at their own buckets.
#[derive(Debug, Clone)]
pub struct Config {
    /// where rendered messages are written
    pub staging_bucket: String,
    /// bucket of the schedule singleton
    pub schedule_bucket: String,
    /// key of the schedule singleton
    pub schedule_key: String,
    /// which strategy formats messages
    pub renderer: RendererKind,
    /// how attachments are laid out for the dispatcher
    pub attachment_style: AttachmentStyle,
    /// catalog ids used by the template strategy
    pub template_ids: TemplateIds,
    /// the webinar every invite describes
    pub calendar: CalendarDetails,
    /// sender and operator mailboxes
    pub identities: Identities,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            staging_bucket: DEFAULT_STAGING_BUCKET.to_string(),
            schedule_bucket: DEFAULT_SCHEDULE_BUCKET.to_string(),
            schedule_key: DEFAULT_SCHEDULE_KEY.to_string(),
            renderer: RendererKind::default(),
            attachment_style: AttachmentStyle::default(),
            template_ids: TemplateIds::default(),
            calendar: CalendarDetails::default(),
            identities: Identities::default(),
        }
    }
}

impl Config {
    /// read the configuration from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// read the configuration through `lookup`, which returns `None` for unset variables
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let var = |name: &str, default: String| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        let renderer = match lookup("MESSAGE_RENDERER") {
            Some(v) => RendererKind::from_str(v.trim())
                .with_context(|| format!("MESSAGE_RENDERER must be plain or template, got {v}"))?,
            None => defaults.renderer,
        };
        let attachment_style = match lookup("ATTACHMENT_STYLE") {
            Some(v) => AttachmentStyle::from_str(v.trim()).with_context(|| {
                format!("ATTACHMENT_STYLE must be attachments or ical_event, got {v}")
            })?,
            None => defaults.attachment_style,
        };

        Ok(Config {
            staging_bucket: var("STAGING_BUCKET", defaults.staging_bucket),
            schedule_bucket: var("SCHEDULE_BUCKET", defaults.schedule_bucket),
            schedule_key: var("SCHEDULE_KEY", defaults.schedule_key),
            renderer,
            attachment_style,
            template_ids: TemplateIds {
                internal: var("INTERNAL_TEMPLATE_ID", defaults.template_ids.internal),
                user: var("USER_TEMPLATE_ID", defaults.template_ids.user),
            },
            calendar: defaults.calendar,
            identities: defaults.identities,
        })
    }

    /// the deploy time settings of the pipeline
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            locations: StoreLocations {
                staging_bucket: self.staging_bucket.clone(),
                schedule_bucket: self.schedule_bucket.clone(),
                schedule_key: self.schedule_key.clone(),
            },
            calendar: self.calendar.clone(),
            attachment_style: self.attachment_style,
        }
    }

    /// the configured message rendering strategy
    pub fn renderer(&self) -> Renderer {
        match self.renderer {
            RendererKind::Plain => Renderer::Plain(PlainRenderer::new(self.identities.clone())),
            RendererKind::Template => Renderer::Template(TemplateRenderer::new(
                TemplateCatalog::builtin(),
                self.template_ids.clone(),
                self.identities.clone(),
                &self.calendar,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn it_defaults_to_production_values() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.staging_bucket, DEFAULT_STAGING_BUCKET);
        assert_eq!(config.schedule_bucket, DEFAULT_SCHEDULE_BUCKET);
        assert_eq!(config.schedule_key, DEFAULT_SCHEDULE_KEY);
        assert_eq!(config.renderer, RendererKind::Plain);
        assert_eq!(config.attachment_style, AttachmentStyle::Attachments);
    }

    #[test]
    fn it_reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("STAGING_BUCKET", "dev-smtp"),
            ("SCHEDULE_KEY", " next.json "),
            ("MESSAGE_RENDERER", "template"),
            ("ATTACHMENT_STYLE", "ical_event"),
            ("USER_TEMPLATE_ID", "welcome"),
        ]))
        .unwrap();
        assert_eq!(config.staging_bucket, "dev-smtp");
        assert_eq!(config.schedule_key, "next.json");
        assert_eq!(config.renderer, RendererKind::Template);
        assert_eq!(config.attachment_style, AttachmentStyle::IcalEvent);
        assert_eq!(config.template_ids.user, "welcome");
        assert!(matches!(config.renderer(), Renderer::Template(_)));
    }

    #[test]
    fn it_rejects_unknown_renderers() {
        let err = Config::from_lookup(lookup(&[("MESSAGE_RENDERER", "mjml")])).unwrap_err();
        assert!(err.to_string().contains("MESSAGE_RENDERER"));
    }

    #[test]
    fn it_ignores_empty_overrides() {
        let config = Config::from_lookup(lookup(&[("STAGING_BUCKET", "  ")])).unwrap();
        assert_eq!(config.staging_bucket, DEFAULT_STAGING_BUCKET);
    }
}
