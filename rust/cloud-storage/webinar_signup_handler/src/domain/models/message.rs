use super::CalendarArtifact;
use std::fmt;

/// A named mailbox
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Identity {
    /// display name
    pub name: String,
    /// email address
    pub email: String,
}

impl Identity {
    /// create a new identity
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// A fully formatted email, ready to be staged for the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    /// who the message is from
    pub sender: Identity,
    /// who the message is for
    pub recipient: Identity,
    /// subject line
    pub subject: String,
    /// plain text body
    pub body: String,
    /// calendar invite to attach, user confirmations only
    pub attachment: Option<CalendarArtifact>,
}

/// How the dispatcher expects attachments to be laid out in a staged message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum AttachmentStyle {
    /// a generic `attachments` list of `{name, data}`
    #[default]
    Attachments,
    /// a single nodemailer style `icalEvent` object
    IcalEvent,
}

/// The json document written into the staging bucket
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedMessage {
    /// recipient display name
    pub name: String,
    /// recipient address
    pub email: String,
    /// subject line
    pub subject: String,
    /// plain text body
    pub body: String,
    /// present when the style is [AttachmentStyle::Attachments]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<StagedAttachment>>,
    /// present when the style is [AttachmentStyle::IcalEvent]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ical_event: Option<StagedIcalEvent>,
}

/// An entry of [StagedMessage::attachments]
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StagedAttachment {
    /// file name shown to the recipient
    pub name: String,
    /// base64 file content
    pub data: String,
}

/// The [StagedMessage::ical_event] object
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StagedIcalEvent {
    /// file name shown to the recipient
    pub filename: String,
    /// iTIP method, we only ever send requests
    pub method: String,
    /// encoded calendar text
    pub content: String,
    /// how [Self::content] is encoded
    pub encoding: String,
}

impl StagedMessage {
    /// lay out a rendered message the way the dispatcher reads it
    pub fn from_rendered(message: &RenderedMessage, style: AttachmentStyle) -> Self {
        let (attachments, ical_event) = match (&message.attachment, style) {
            (None, _) => (None, None),
            (Some(artifact), AttachmentStyle::Attachments) => (
                Some(vec![StagedAttachment {
                    name: artifact.file_name.clone(),
                    data: artifact.content_base64.clone(),
                }]),
                None,
            ),
            (Some(artifact), AttachmentStyle::IcalEvent) => (
                None,
                Some(StagedIcalEvent {
                    filename: artifact.file_name.clone(),
                    method: "request".to_string(),
                    content: artifact.content_base64.clone(),
                    encoding: "base64".to_string(),
                }),
            ),
        };

        Self {
            name: message.recipient.name.clone(),
            email: message.recipient.email.clone(),
            subject: message.subject.clone(),
            body: message.body.clone(),
            attachments,
            ical_event,
        }
    }
}

/// The key a message was staged under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StagedKey(pub String);

impl fmt::Display for StagedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
