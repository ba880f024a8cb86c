//! RFC 5545 (iCalendar) writer for webinar invites

use crate::domain::{
    models::{Attendee, AudioAlarm, CalendarInvite},
    ports::CalendarSerializer,
};
use chrono::{DateTime, Utc};

/// content lines longer than this many octets are folded
const MAX_LINE_OCTETS: usize = 75;

/// Writes [CalendarInvite]s as iCalendar text
#[derive(Debug, Clone, Copy, Default)]
pub struct IcsWriter;

impl CalendarSerializer for IcsWriter {
    #[tracing::instrument(skip_all, fields(uid = %invite.uid))]
    fn serialize(&self, invite: &CalendarInvite) -> String {
        let mut doc = ContentLines::default();
        let product = &invite.product_id;

        doc.push("BEGIN", "VCALENDAR");
        doc.push("VERSION", "2.0");
        doc.push(
            "PRODID",
            &format!(
                "-//{}//{}//{}",
                product.company, product.product, product.language
            ),
        );
        doc.push("METHOD", "REQUEST");
        doc.push("NAME", &escape_text(&invite.name));
        doc.push("X-WR-CALNAME", &escape_text(&invite.name));
        doc.push("TIMEZONE-ID", &invite.timezone);
        doc.push("X-WR-TIMEZONE", &invite.timezone);

        doc.push("BEGIN", "VEVENT");
        doc.push("UID", &invite.uid);
        doc.push("SEQUENCE", "0");
        doc.push("DTSTAMP", &format_utc(&invite.stamp));
        doc.push("DTSTART", &format_utc(&invite.start));
        doc.push("DTEND", &format_utc(&invite.end));
        doc.push("SUMMARY", &escape_text(&invite.summary));
        doc.push("DESCRIPTION", &escape_text(&invite.description));
        doc.push("URL;VALUE=URI", &invite.url);
        doc.push(
            &format!("ORGANIZER;CN={}", quote_param(&invite.organizer.name)),
            &format!("mailto:{}", invite.organizer.email),
        );
        for attendee in &invite.attendees {
            doc.push(&attendee_name(attendee), &format!("MAILTO:{}", attendee.identity.email));
        }
        for alarm in &invite.alarms {
            push_alarm(&mut doc, alarm);
        }
        doc.push("END", "VEVENT");

        doc.push("END", "VCALENDAR");
        doc.finish()
    }
}

fn attendee_name(attendee: &Attendee) -> String {
    let mut name = "ATTENDEE;ROLE=REQ-PARTICIPANT;PARTSTAT=NEEDS-ACTION".to_string();
    if attendee.rsvp {
        name.push_str(";RSVP=TRUE");
    }
    name.push_str(";CN=");
    name.push_str(&quote_param(&attendee.identity.name));
    name
}

fn push_alarm(doc: &mut ContentLines, alarm: &AudioAlarm) {
    doc.push("BEGIN", "VALARM");
    doc.push("ACTION", "AUDIO");
    doc.push("TRIGGER", &format!("-{}", format_duration(alarm.seconds_before)));
    doc.push("END", "VALARM");
}

/// Accumulates content lines, folding and terminating each with CRLF
#[derive(Default)]
struct ContentLines {
    out: String,
}

impl ContentLines {
    fn push(&mut self, name: &str, value: &str) {
        let line = format!("{name}:{value}");
        let mut octets = 0;
        for c in line.chars() {
            // a fold costs one octet for the leading space of the continuation
            if octets + c.len_utf8() > MAX_LINE_OCTETS {
                self.out.push_str("\r\n ");
                octets = 1;
            }
            self.out.push(c);
            octets += c.len_utf8();
        }
        self.out.push_str("\r\n");
    }

    fn finish(self) -> String {
        self.out
    }
}

/// UTC date-time in the basic format, e.g. `20240601T100000Z`
fn format_utc(time: &DateTime<Utc>) -> String {
    time.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escape a TEXT value
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

/// Quote a parameter value. DQUOTE is not allowed inside so it is dropped
fn quote_param(value: &str) -> String {
    let cleaned: String = value.chars().filter(|c| *c != '"').collect();
    format!("\"{cleaned}\"")
}

/// A positive DURATION value, e.g. `PT30M` or `P1DT2H`
fn format_duration(total_seconds: u32) -> String {
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    let mut out = "P".to_string();
    if days > 0 {
        out.push_str(&format!("{days}D"));
    }
    if hours > 0 || minutes > 0 || seconds > 0 || days == 0 {
        out.push('T');
        if hours > 0 {
            out.push_str(&format!("{hours}H"));
        }
        if minutes > 0 {
            out.push_str(&format!("{minutes}M"));
        }
        if seconds > 0 || total_seconds == 0 {
            out.push_str(&format!("{seconds}S"));
        }
    }
    out
}
