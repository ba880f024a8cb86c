use std::sync::atomic::{AtomicUsize, Ordering};

use base64::{Engine, engine::general_purpose};
use cool_asserts::assert_matches;

use crate::domain::{
    models::{Identity, StagedAttachment},
    ports::{MockMessageRenderer, MockObjectStore},
};
use crate::outbound::{ics::IcsWriter, memory::InMemoryObjectStore, render::PlainRenderer};

use super::*;

const SIGNUP_BUCKET: &str = "in";
const SIGNUP_KEY: &str = "signup1.json";
const STAGING: &str = "smtp";
const SCHEDULE_BUCKET: &str = "schedule";
const SCHEDULE_KEY: &str = "latest_time.json";

/// hands out `0.json`, `1.json`, ...
#[derive(Default)]
struct SequentialKeys(AtomicUsize);

impl StagingKeyGenerator for SequentialKeys {
    fn next_key(&self) -> StagedKey {
        StagedKey(format!("{}.json", self.0.fetch_add(1, Ordering::SeqCst)))
    }
}

fn settings(attachment_style: AttachmentStyle) -> PipelineSettings {
    PipelineSettings {
        locations: StoreLocations {
            staging_bucket: STAGING.to_string(),
            schedule_bucket: SCHEDULE_BUCKET.to_string(),
            schedule_key: SCHEDULE_KEY.to_string(),
        },
        calendar: CalendarDetails::default(),
        attachment_style,
    }
}

fn store() -> InMemoryObjectStore {
    InMemoryObjectStore::new()
        .with_object(
            SIGNUP_BUCKET,
            SIGNUP_KEY,
            r#"{"full_name":"Jane Doe","email":"jane@example.com"}"#,
        )
        .with_object(
            SCHEDULE_BUCKET,
            SCHEDULE_KEY,
            r#"{"time":"2024-06-01T10:00:00Z"}"#,
        )
}

fn pipeline<S, R>(
    store: S,
    renderer: R,
    style: AttachmentStyle,
) -> NotificationPipelineImpl<S, R, IcsWriter, SequentialKeys>
where
    S: ObjectStore,
    anyhow::Error: From<S::Err>,
    R: MessageRenderer,
{
    NotificationPipelineImpl::new(
        store,
        renderer,
        IcsWriter,
        SequentialKeys::default(),
        settings(style),
    )
}

fn trigger() -> TriggerReference {
    TriggerReference::new(SIGNUP_BUCKET, SIGNUP_KEY)
}

fn staged(content: &[u8]) -> StagedMessage {
    serde_json::from_slice(content).unwrap()
}

fn unfold(text: &str) -> Vec<String> {
    text.replace("\r\n ", "")
        .split("\r\n")
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn message(body: &str) -> RenderedMessage {
    RenderedMessage {
        sender: Identity::new("Sender", "sender@example.com"),
        recipient: Identity::new("Operator", "ops@example.com"),
        subject: "subject".to_string(),
        body: body.to_string(),
        attachment: None,
    }
}

#[tokio::test]
async fn it_stages_both_messages_in_order() {
    let store = store();
    let service = pipeline(store.clone(), PlainRenderer::default(), AttachmentStyle::Attachments);

    let res = service.process(trigger()).await.unwrap();
    assert_eq!(res, PipelineResponse::ok());

    let written = store.written_to(STAGING);
    assert_eq!(written.len(), 2);
    assert_eq!(written[0].key, "0.json");
    assert_eq!(written[1].key, "1.json");
    assert!(
        written
            .iter()
            .all(|o| o.content_type.as_deref() == Some("application/json"))
    );

    let internal = staged(&written[0].content);
    assert_eq!(internal.email, "david@0x4447.com");
    assert!(internal.body.contains("\"full_name\": \"Jane Doe\""));
    assert_eq!(internal.attachments, None);

    let user = staged(&written[1].content);
    assert_eq!(user.email, "jane@example.com");
    assert!(user.body.contains("Jane Doe"));
    assert_matches!(
        user.attachments.as_deref(),
        Some([StagedAttachment { name, .. }]) => assert_eq!(name, "calendar_event.ics")
    );
}

#[tokio::test]
async fn it_attaches_an_invite_for_the_scheduled_time() {
    let store = store();
    let service = pipeline(store.clone(), PlainRenderer::default(), AttachmentStyle::Attachments);
    service.process(trigger()).await.unwrap();

    let user = staged(&store.written_to(STAGING)[1].content);
    let attachments = user.attachments.unwrap();
    let text =
        String::from_utf8(general_purpose::STANDARD.decode(&attachments[0].data).unwrap()).unwrap();

    assert!(text.starts_with("BEGIN:VCALENDAR\r\n"));
    let lines = unfold(&text);
    assert!(lines.contains(&"DTSTART:20240601T100000Z".to_string()));
    assert!(lines.contains(&"DTEND:20240601T100000Z".to_string()));
    assert!(lines.contains(&"TRIGGER:-PT30M".to_string()));
    assert_eq!(lines.last().map(String::as_str), Some("END:VCALENDAR"));
}

#[tokio::test]
async fn it_uses_the_ical_event_layout_when_configured() {
    let store = store();
    let service = pipeline(store.clone(), PlainRenderer::default(), AttachmentStyle::IcalEvent);
    service.process(trigger()).await.unwrap();

    let user = staged(&store.written_to(STAGING)[1].content);
    assert_eq!(user.attachments, None);
    assert_matches!(user.ical_event, Some(event) => {
        assert_eq!(event.filename, "calendar_event.ics");
        assert_eq!(event.method, "request");
        assert_eq!(event.encoding, "base64");
        assert!(general_purpose::STANDARD.decode(event.content).is_ok());
    });
}

#[tokio::test]
async fn it_stages_nothing_when_the_signup_is_missing() {
    let store = InMemoryObjectStore::new();
    let service = pipeline(store.clone(), PlainRenderer::default(), AttachmentStyle::Attachments);

    let err = service.process(trigger()).await.unwrap_err();
    assert_matches!(
        err,
        PipelineErr::Fetch(FetchErr::NotFound { bucket, key }) => {
            assert_eq!(bucket, SIGNUP_BUCKET);
            assert_eq!(key, SIGNUP_KEY);
        }
    );
    assert!(store.written_to(STAGING).is_empty());
}

#[tokio::test]
async fn it_stages_nothing_when_the_signup_is_not_json() {
    let store = InMemoryObjectStore::new().with_object(SIGNUP_BUCKET, SIGNUP_KEY, "not json");
    let service = pipeline(store.clone(), PlainRenderer::default(), AttachmentStyle::Attachments);

    let err = service.process(trigger()).await.unwrap_err();
    assert_matches!(err, PipelineErr::Fetch(FetchErr::Parse { .. }));
    assert!(store.written_to(STAGING).is_empty());
}

#[tokio::test]
async fn it_keeps_the_internal_message_when_the_schedule_is_missing() {
    let store = InMemoryObjectStore::new().with_object(
        SIGNUP_BUCKET,
        SIGNUP_KEY,
        r#"{"full_name":"Jane Doe"}"#,
    );
    let service = pipeline(store.clone(), PlainRenderer::default(), AttachmentStyle::Attachments);

    let err = service.process(trigger()).await.unwrap_err();
    assert_matches!(
        err,
        PipelineErr::Fetch(FetchErr::NotFound { bucket, .. }) => assert_eq!(bucket, SCHEDULE_BUCKET)
    );

    let written = store.written_to(STAGING);
    assert_eq!(written.len(), 1);
    assert!(staged(&written[0].content).body.contains("Jane Doe"));
}

#[tokio::test]
async fn it_rejects_a_schedule_without_a_valid_time() {
    let store = InMemoryObjectStore::new()
        .with_object(SIGNUP_BUCKET, SIGNUP_KEY, "{}")
        .with_object(SCHEDULE_BUCKET, SCHEDULE_KEY, r#"{"time":"next tuesday"}"#);
    let service = pipeline(store.clone(), PlainRenderer::default(), AttachmentStyle::Attachments);

    let err = service.process(trigger()).await.unwrap_err();
    assert_matches!(err, PipelineErr::Fetch(FetchErr::Parse { key, .. }) => assert_eq!(key, SCHEDULE_KEY));
    assert_eq!(store.written_to(STAGING).len(), 1);
}

#[tokio::test]
async fn it_stops_before_the_schedule_when_staging_fails() {
    let mut store = MockObjectStore::new();
    store
        .expect_get()
        .times(1)
        .returning(|_, _| Box::pin(async { Ok(Some(br#"{"full_name":"Jane Doe"}"#.to_vec())) }));
    store
        .expect_put()
        .times(1)
        .returning(|_, _, _, _| Box::pin(async { Err(anyhow::anyhow!("access denied")) }));

    let service = pipeline(store, PlainRenderer::default(), AttachmentStyle::Attachments);

    let err = service.process(trigger()).await.unwrap_err();
    assert_matches!(
        err,
        PipelineErr::StoreWrite(StoreWriteErr::Write { bucket, key, .. }) => {
            assert_eq!(bucket, STAGING);
            assert_eq!(key, "0.json");
        }
    );
}

#[tokio::test]
async fn it_reports_store_read_failures() {
    let mut store = MockObjectStore::new();
    store
        .expect_get()
        .times(1)
        .returning(|_, _| Box::pin(async { Err(anyhow::anyhow!("timeout")) }));
    store.expect_put().times(0);

    let service = pipeline(store, PlainRenderer::default(), AttachmentStyle::Attachments);

    let err = service.process(trigger()).await.unwrap_err();
    assert_matches!(err, PipelineErr::Fetch(FetchErr::Read { source, .. }) => {
        assert_eq!(source.to_string(), "timeout");
    });
}

#[tokio::test]
async fn it_keeps_the_internal_message_when_the_user_template_is_missing() {
    let mut renderer = MockMessageRenderer::new();
    renderer
        .expect_render_internal()
        .times(1)
        .returning(|_| Ok(message("internal")));
    renderer
        .expect_render_user()
        .times(1)
        .withf(|signup, calendar| {
            signup.display_name() == Some("Jane Doe") && calendar.file_name == "calendar_event.ics"
        })
        .returning(|_, _| Err(RenderErr::TemplateNotFound("user_signup_confirmation".to_string())));

    let store = store();
    let service = pipeline(store.clone(), renderer, AttachmentStyle::Attachments);

    let err = service.process(trigger()).await.unwrap_err();
    assert_matches!(
        err,
        PipelineErr::Render(RenderErr::TemplateNotFound(id)) => assert_eq!(id, "user_signup_confirmation")
    );

    let written = store.written_to(STAGING);
    assert_eq!(written.len(), 1);
    assert_eq!(staged(&written[0].content).body, "internal");
}

#[tokio::test]
async fn it_stages_nothing_when_the_internal_template_is_missing() {
    let mut renderer = MockMessageRenderer::new();
    renderer
        .expect_render_internal()
        .times(1)
        .returning(|_| Err(RenderErr::TemplateNotFound("missing".to_string())));
    renderer.expect_render_user().times(0);

    let store = store();
    let service = pipeline(store.clone(), renderer, AttachmentStyle::Attachments);

    let err = service.process(trigger()).await.unwrap_err();
    assert_matches!(err, PipelineErr::Render(_));
    assert!(store.written_to(STAGING).is_empty());
}
