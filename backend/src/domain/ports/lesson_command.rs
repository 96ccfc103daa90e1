//! Driving port for lesson mutations.
//!
//! Every successful command returns the affected lesson's [`LessonPayload`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, LessonDetails, LessonId, LessonValidationError, TeacherId, UserId};

use super::LessonPayload;

/// Caller-supplied lesson fields used to create or overwrite a lesson.
///
/// `id` is ignored on creation and must match the path id on edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRegistration {
    #[serde(default)]
    pub id: Option<LessonId>,
    pub title: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TryFrom<LessonRegistration> for LessonDetails {
    type Error = LessonValidationError;

    fn try_from(value: LessonRegistration) -> Result<Self, Self::Error> {
        LessonDetails::new(value.title, value.description, value.start, value.end)
    }
}

/// Request to enroll a user in a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollUserRequest {
    pub lesson_id: LessonId,
    /// Absent when the caller sent no user id.
    pub user_id: Option<UserId>,
}

/// Request to assign a teacher to a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignTeacherRequest {
    pub lesson_id: LessonId,
    pub teacher_id: TeacherId,
}

/// Request to overwrite a lesson's editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditLessonRequest {
    /// Id taken from the resource path.
    pub lesson_id: LessonId,
    /// Replacement fields; `lesson.id` must equal `lesson_id`.
    pub lesson: LessonRegistration,
}

/// Driving port for lesson write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LessonCommand: Send + Sync {
    /// Link a user and a lesson. Enrolling twice is a no-op.
    async fn enroll_user(&self, request: EnrollUserRequest) -> Result<LessonPayload, Error>;

    /// Replace the lesson's teacher.
    async fn assign_teacher(&self, request: AssignTeacherRequest)
    -> Result<LessonPayload, Error>;

    /// Create a lesson with no teacher and no enrollments.
    async fn create_lesson(&self, registration: LessonRegistration)
    -> Result<LessonPayload, Error>;

    /// Overwrite a lesson that has not started yet.
    ///
    /// A lesson that has already started is returned unchanged.
    async fn edit_lesson(&self, request: EditLessonRequest) -> Result<LessonPayload, Error>;

    /// Delete a lesson that has not started yet, returning its last state.
    async fn delete_lesson(&self, id: LessonId) -> Result<LessonPayload, Error>;

    /// Delete every lesson that has not started yet.
    async fn delete_future_lessons(&self) -> Result<Vec<LessonPayload>, Error>;
}
