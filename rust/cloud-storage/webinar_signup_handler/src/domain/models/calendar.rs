use super::{Identity, ScheduleRecord};
use chrono::{DateTime, Utc};

/// Identifies the product which produced a calendar (the `PRODID` property)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductId {
    /// company name
    pub company: String,
    /// product name
    pub product: String,
    /// language tag
    pub language: String,
}

/// Someone invited to the webinar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendee {
    /// who is invited
    pub identity: Identity,
    /// whether a reply is expected from this attendee
    pub rsvp: bool,
}

impl Attendee {
    /// an attendee who does not need to reply
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            identity: Identity::new(name, email),
            rsvp: false,
        }
    }

    /// mark this attendee as expected to reply
    pub fn with_rsvp(mut self) -> Self {
        self.rsvp = true;
        self
    }
}

/// The fixed description of the webinar every invite carries.
/// Only the start time changes between invites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDetails {
    /// calendar display name
    pub name: String,
    /// domain used to build the event uid
    pub domain: String,
    /// producer of the calendar
    pub product_id: ProductId,
    /// IANA timezone attendees' clients should display the event in
    pub timezone: String,
    /// event title
    pub summary: String,
    /// event description
    pub description: String,
    /// who runs the webinar
    pub organizer: Identity,
    /// where to join
    pub url: String,
    /// everyone on the invite
    pub attendees: Vec<Attendee>,
    /// how long before the start the reminder fires
    pub reminder_seconds: u32,
    /// file name of the attachment
    pub file_name: String,
}

impl Default for CalendarDetails {
    fn default() -> Self {
        Self {
            name: "0x4447 Webinar".to_string(),
            domain: "0x4447.com".to_string(),
            product_id: ProductId {
                company: "0x4447".to_string(),
                product: "Webinar".to_string(),
                language: "EN".to_string(),
            },
            timezone: "Europe/Berlin".to_string(),
            summary: "Learning about stuff".to_string(),
            description: "Epic place to learn".to_string(),
            organizer: Identity::new("David Gatti", "david@0x4447.com"),
            url: "https://webinars.0x4447.com/".to_string(),
            attendees: vec![
                Attendee::new("AWS", "aws@chime.aws"),
                Attendee::new("David Gatti", "david@0x4447.com"),
                Attendee::new("Bob Jhon", "bob@0x4447.com").with_rsvp(),
            ],
            reminder_seconds: 1800,
            file_name: "calendar_event.ics".to_string(),
        }
    }
}

/// An audio reminder firing before the event starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioAlarm {
    /// seconds before the event start
    pub seconds_before: u32,
}

/// A single event calendar ready to be serialized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarInvite {
    /// calendar display name
    pub name: String,
    /// producer of the calendar
    pub product_id: ProductId,
    /// timezone hint for clients
    pub timezone: String,
    /// globally unique event id
    pub uid: String,
    /// when the event record was created
    pub stamp: DateTime<Utc>,
    /// event start
    pub start: DateTime<Utc>,
    /// event end
    pub end: DateTime<Utc>,
    /// event title
    pub summary: String,
    /// event description
    pub description: String,
    /// who runs the event
    pub organizer: Identity,
    /// where to join
    pub url: String,
    /// everyone invited
    pub attendees: Vec<Attendee>,
    /// reminders attached to the event
    pub alarms: Vec<AudioAlarm>,
}

impl CalendarInvite {
    /// Build the invite for the scheduled webinar.
    /// The event is a zero length instant at the scheduled time and
    /// everything else comes from `details`, so the same schedule
    /// always produces the same invite.
    pub fn for_schedule(details: &CalendarDetails, schedule: &ScheduleRecord) -> Self {
        let start = schedule.time;
        Self {
            name: details.name.clone(),
            product_id: details.product_id.clone(),
            timezone: details.timezone.clone(),
            uid: format!(
                "webinar-{}@{}",
                start.format("%Y%m%dT%H%M%SZ"),
                details.domain
            ),
            stamp: start,
            start,
            end: start,
            summary: details.summary.clone(),
            description: details.description.clone(),
            organizer: details.organizer.clone(),
            url: details.url.clone(),
            attendees: details.attendees.clone(),
            alarms: vec![AudioAlarm {
                seconds_before: details.reminder_seconds,
            }],
        }
    }
}

/// The serialized invite, encoded so it can ride along as an email attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarArtifact {
    /// attachment file name
    pub file_name: String,
    /// base64 of the calendar text
    pub content_base64: String,
}
