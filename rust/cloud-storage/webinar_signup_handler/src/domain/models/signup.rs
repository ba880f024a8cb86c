use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Serializer, Value, ser::PrettyFormatter};
use std::collections::BTreeMap;

/// The fields submitted through the webinar signup form.
/// The form is free to grow so this keeps every field it was given.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SignupPayload(Map<String, Value>);

impl SignupPayload {
    /// parse the raw object body. Anything other than a json object is rejected
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// the name the submitter gave us, `full_name` first then `name`
    pub fn display_name(&self) -> Option<&str> {
        self.string_field("full_name")
            .or_else(|| self.string_field("name"))
    }

    /// the address the submitter gave us
    pub fn email(&self) -> Option<&str> {
        self.string_field("email")
    }

    /// the payload rendered as indented json for humans to read
    pub fn pretty(&self) -> String {
        let mut out = Vec::new();
        let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
        // a map of json values always serializes
        if self.0.serialize(&mut ser).is_err() {
            return String::new();
        }
        String::from_utf8(out).unwrap_or_default()
    }

    /// every top level field which has a scalar value, as text
    pub fn scalar_fields(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .filter_map(|(k, v)| {
                let text = match v {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Null | Value::Array(_) | Value::Object(_) => return None,
                };
                Some((k.clone(), text))
            })
            .collect()
    }

    fn string_field(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// The externally maintained record describing the next webinar
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScheduleRecord {
    /// when the next webinar starts
    pub time: DateTime<Utc>,
}

impl ScheduleRecord {
    /// parse the raw object body, expects `{"time": "<rfc 3339>"}`
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_prefers_full_name() {
        let payload =
            SignupPayload::from_slice(br#"{"full_name":"Jane Doe","name":"jane"}"#).unwrap();
        assert_eq!(payload.display_name(), Some("Jane Doe"));
    }

    #[test]
    fn it_falls_back_to_name() {
        let payload = SignupPayload::from_slice(br#"{"full_name":"  ","name":"jane"}"#).unwrap();
        assert_eq!(payload.display_name(), Some("jane"));
        assert_eq!(payload.email(), None);
    }

    #[test]
    fn it_rejects_non_objects() {
        assert!(SignupPayload::from_slice(b"[1,2,3]").is_err());
        assert!(SignupPayload::from_slice(b"not json").is_err());
    }

    #[test]
    fn it_collects_scalar_fields() {
        let payload = SignupPayload::from_slice(
            br#"{"full_name":"Jane Doe","seats":2,"consent":true,"tags":["a"],"note":null}"#,
        )
        .unwrap();
        let fields = payload.scalar_fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["seats"], "2");
        assert_eq!(fields["consent"], "true");
    }

    #[test]
    fn it_indents_the_pretty_payload_by_four_spaces() {
        let payload = SignupPayload::from_slice(br#"{"full_name":"Jane Doe"}"#).unwrap();
        assert_eq!(payload.pretty(), "{\n    \"full_name\": \"Jane Doe\"\n}");
    }

    #[test]
    fn it_parses_the_schedule_time() {
        let record = ScheduleRecord::from_slice(br#"{"time":"2024-06-01T10:00:00Z"}"#).unwrap();
        assert_eq!(record.time.to_rfc3339(), "2024-06-01T10:00:00+00:00");
    }

    #[test]
    fn it_rejects_a_schedule_without_time() {
        assert!(ScheduleRecord::from_slice(br#"{"when":"tomorrow"}"#).is_err());
    }
}
