use super::Identities;
use crate::domain::{
    models::{CalendarArtifact, CalendarDetails, RenderErr, RenderedMessage, SignupPayload},
    ports::MessageRenderer,
};
use std::collections::{BTreeMap, HashMap};

static INTERNAL_SUBJECT: &str = "Webinar subscription: {{full_name}}";

static INTERNAL_BODY: &str = r#"Hi Self,

There was a new signup on the Webinar page. Below are all the details:

{{details}}

Thank you."#;

static USER_SUBJECT: &str = "You are registered for {{webinar_name}}";

static USER_BODY: &str = r#"Hi {{full_name}},

Thank you for signing up for {{webinar_name}}. The calendar invite is attached,
and you can join at {{webinar_url}} when it starts.

Thank you."#;

/// A subject and body with `{{binding}}` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// subject template
    pub subject: String,
    /// body template
    pub body: String,
}

impl Template {
    /// create a new template
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Which catalog entries the two messages use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateIds {
    /// template of the operator notification
    pub internal: String,
    /// template of the submitter confirmation
    pub user: String,
}

impl Default for TemplateIds {
    fn default() -> Self {
        Self {
            internal: "internal_signup_notification".to_string(),
            user: "user_signup_confirmation".to_string(),
        }
    }
}

/// Templates by id
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: HashMap<String, Template>,
}

impl TemplateCatalog {
    /// The catalog shipped with the function, holding the
    /// templates named by [TemplateIds::default]
    pub fn builtin() -> Self {
        let ids = TemplateIds::default();
        Self::default()
            .with_template(ids.internal, Template::new(INTERNAL_SUBJECT, INTERNAL_BODY))
            .with_template(ids.user, Template::new(USER_SUBJECT, USER_BODY))
    }

    /// add or replace a template
    pub fn with_template(mut self, id: impl Into<String>, template: Template) -> Self {
        self.templates.insert(id.into(), template);
        self
    }

    /// find a template by id
    pub fn lookup(&self, id: &str) -> Result<&Template, RenderErr> {
        self.templates
            .get(id)
            .ok_or_else(|| RenderErr::TemplateNotFound(id.to_string()))
    }
}

/// Substitute `{{name}}` placeholders in a single pass.
/// Values are inserted verbatim and never scanned for placeholders themselves.
/// A placeholder without a binding renders as nothing; an unterminated `{{` is kept as is.
pub fn render(template: &str, bindings: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };

        let name = after_open[..close].trim();
        match bindings.get(name) {
            Some(value) => out.push_str(value),
            None => tracing::warn!(binding = name, "template binding is missing"),
        }
        rest = &after_open[close + 2..];
    }

    out.push_str(rest);
    out
}

/// Renders both messages from a [TemplateCatalog]
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    catalog: TemplateCatalog,
    ids: TemplateIds,
    identities: Identities,
    webinar_name: String,
    webinar_url: String,
}

impl TemplateRenderer {
    /// create a new renderer
    pub fn new(
        catalog: TemplateCatalog,
        ids: TemplateIds,
        identities: Identities,
        calendar: &CalendarDetails,
    ) -> Self {
        Self {
            catalog,
            ids,
            identities,
            webinar_name: calendar.name.clone(),
            webinar_url: calendar.url.clone(),
        }
    }
}

impl MessageRenderer for TemplateRenderer {
    #[tracing::instrument(err, skip_all, fields(template = %self.ids.internal))]
    fn render_internal(&self, signup: &SignupPayload) -> Result<RenderedMessage, RenderErr> {
        let template = self.catalog.lookup(&self.ids.internal)?;

        let mut bindings = signup.scalar_fields();
        bindings.remove("full_name");
        if let Some(name) = signup.display_name() {
            bindings.insert("full_name".to_string(), name.to_string());
        }
        bindings.insert("details".to_string(), signup.pretty());

        Ok(RenderedMessage {
            sender: self.identities.sender.clone(),
            recipient: self.identities.operator.clone(),
            subject: render(&template.subject, &bindings),
            body: render(&template.body, &bindings),
            attachment: None,
        })
    }

    #[tracing::instrument(err, skip_all, fields(template = %self.ids.user))]
    fn render_user(
        &self,
        signup: &SignupPayload,
        calendar: &CalendarArtifact,
    ) -> Result<RenderedMessage, RenderErr> {
        let template = self.catalog.lookup(&self.ids.user)?;

        let mut bindings = BTreeMap::new();
        if let Some(name) = signup.display_name() {
            bindings.insert("full_name".to_string(), name.to_string());
        }
        bindings.insert("webinar_name".to_string(), self.webinar_name.clone());
        bindings.insert("webinar_url".to_string(), self.webinar_url.clone());

        Ok(RenderedMessage {
            sender: self.identities.sender.clone(),
            recipient: self.identities.user_recipient(signup),
            subject: render(&template.subject, &bindings),
            body: render(&template.body, &bindings),
            attachment: Some(calendar.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cool_asserts::assert_matches;

    fn bindings(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn renderer(ids: TemplateIds) -> TemplateRenderer {
        TemplateRenderer::new(
            TemplateCatalog::builtin(),
            ids,
            Identities::default(),
            &CalendarDetails::default(),
        )
    }

    fn calendar() -> CalendarArtifact {
        CalendarArtifact {
            file_name: "calendar_event.ics".to_string(),
            content_base64: "QkVHSU4=".to_string(),
        }
    }

    #[test]
    fn it_substitutes_bindings() {
        let out = render("Hi {{ name }}, see {{url}}", &bindings(&[("name", "Jane"), ("url", "x")]));
        assert_eq!(out, "Hi Jane, see x");
    }

    #[test]
    fn it_leaves_missing_bindings_empty() {
        assert_eq!(render("Hi {{name}}!", &BTreeMap::new()), "Hi !");
    }

    #[test]
    fn it_does_not_rescan_values() {
        let out = render("{{a}}", &bindings(&[("a", "{{b}}"), ("b", "nope")]));
        assert_eq!(out, "{{b}}");
    }

    #[test]
    fn it_keeps_unterminated_placeholders() {
        assert_eq!(render("Hi {{name", &BTreeMap::new()), "Hi {{name");
    }

    #[test]
    fn it_fails_on_an_unknown_template() {
        let renderer = renderer(TemplateIds {
            internal: "missing".to_string(),
            ..Default::default()
        });
        let signup = SignupPayload::from_slice(br#"{"full_name":"Jane Doe"}"#).unwrap();
        assert_matches!(
            renderer.render_internal(&signup),
            Err(RenderErr::TemplateNotFound(id)) => assert_eq!(id, "missing")
        );
    }

    #[test]
    fn it_renders_the_internal_template() {
        let signup =
            SignupPayload::from_slice(br#"{"full_name":"Jane Doe","company":"Acme"}"#).unwrap();
        let message = renderer(TemplateIds::default())
            .render_internal(&signup)
            .unwrap();
        assert_eq!(message.subject, "Webinar subscription: Jane Doe");
        assert!(message.body.contains("\"company\": \"Acme\""));
    }

    #[test]
    fn it_names_the_submitter_in_the_internal_subject_from_name() {
        let signup = SignupPayload::from_slice(br#"{"name":"Jane"}"#).unwrap();
        let message = renderer(TemplateIds::default())
            .render_internal(&signup)
            .unwrap();
        assert_eq!(message.subject, "Webinar subscription: Jane");
    }

    #[test]
    fn it_renders_the_user_template() {
        let signup =
            SignupPayload::from_slice(br#"{"full_name":"Jane Doe","email":"jane@example.com"}"#)
                .unwrap();
        let message = renderer(TemplateIds::default())
            .render_user(&signup, &calendar())
            .unwrap();
        assert_eq!(message.subject, "You are registered for 0x4447 Webinar");
        assert!(message.body.starts_with("Hi Jane Doe,"));
        assert!(message.body.contains("https://webinars.0x4447.com/"));
        assert_eq!(message.attachment, Some(calendar()));
    }
}
