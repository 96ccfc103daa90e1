//! Regression coverage for port payload conversions.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::{
    Lesson, LessonDetails, LessonDraft, LessonId, LessonValidationError, TeacherId, UserId,
};

fn fixture_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-04-01T10:00:00Z")
        .expect("RFC3339 fixture timestamp")
        .with_timezone(&Utc)
}

#[fixture]
fn registration() -> LessonRegistration {
    let start = fixture_timestamp();
    LessonRegistration {
        id: None,
        title: "Poetry".to_owned(),
        description: "Sonnets".to_owned(),
        start,
        end: start + Duration::minutes(90),
    }
}

#[rstest]
fn payload_lists_enrolled_users_in_ascending_order() {
    let start = fixture_timestamp();
    let enrolled_users = [7, 2, 5]
        .into_iter()
        .map(|raw| UserId::new(raw).expect("positive id"))
        .collect::<BTreeSet<_>>();
    let lesson = Lesson::new(LessonDraft {
        id: LessonId::new(3).expect("positive id"),
        details: LessonDetails::new("Poetry", "", start, start).expect("valid details"),
        teacher: Some(TeacherId::new(4).expect("positive id")),
        enrolled_users,
    });

    let payload = LessonPayload::from(&lesson);

    let user_ids = payload.user_ids.iter().map(|id| id.get()).collect::<Vec<_>>();
    assert_eq!(user_ids, vec![2, 5, 7]);
    assert_eq!(payload.teacher_id.map(TeacherId::get), Some(4));
}

#[rstest]
fn payload_serialises_in_camel_case() {
    let start = fixture_timestamp();
    let lesson = Lesson::new(LessonDraft {
        id: LessonId::new(3).expect("positive id"),
        details: LessonDetails::new("Poetry", "", start, start).expect("valid details"),
        teacher: None,
        enrolled_users: BTreeSet::new(),
    });

    let value = serde_json::to_value(LessonPayload::from(lesson)).expect("payload serialises");

    assert_eq!(value["id"], 3);
    assert_eq!(value["teacherId"], serde_json::Value::Null);
    assert_eq!(value["userIds"], json!([]));
}

#[rstest]
fn registration_converts_into_details(registration: LessonRegistration) {
    let details = LessonDetails::try_from(registration.clone()).expect("valid registration");
    assert_eq!(details.title(), registration.title);
    assert_eq!(details.end(), registration.end);
}

#[rstest]
fn registration_with_inverted_window_is_rejected(mut registration: LessonRegistration) {
    registration.end = registration.start - Duration::minutes(1);
    let result = LessonDetails::try_from(registration);
    assert!(matches!(
        result,
        Err(LessonValidationError::EndsBeforeStart { .. })
    ));
}

#[rstest]
fn registration_id_defaults_to_none() {
    let registration: LessonRegistration = serde_json::from_value(json!({
        "title": "Poetry",
        "description": "",
        "start": "2026-04-01T10:00:00Z",
        "end": "2026-04-01T11:00:00Z",
    }))
    .expect("registration deserialises");

    assert_eq!(registration.id, None);
}

#[rstest]
fn repository_error_constructors_render_messages() {
    assert_eq!(
        LessonRepositoryError::connection("pool exhausted").to_string(),
        "lesson store connection failed: pool exhausted"
    );
    assert_eq!(
        LessonRepositoryError::query("syntax error").to_string(),
        "lesson store query failed: syntax error"
    );
}
