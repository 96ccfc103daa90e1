//! Driving port for lesson reads.
//!
//! Inbound adapters list and look up lessons through this port and only ever
//! see [`LessonPayload`] projections, never the entity itself.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, SortDirection};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Lesson, LessonId, TeacherId, UserId};

/// Read-only snapshot of a lesson returned by every lesson operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonPayload {
    pub id: LessonId,
    pub title: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub teacher_id: Option<TeacherId>,
    /// Enrolled users in ascending id order.
    pub user_ids: Vec<UserId>,
}

impl From<&Lesson> for LessonPayload {
    fn from(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id(),
            title: lesson.title().to_owned(),
            description: lesson.description().to_owned(),
            start: lesson.start(),
            end: lesson.end(),
            teacher_id: lesson.teacher(),
            user_ids: lesson.enrolled_users().iter().copied().collect(),
        }
    }
}

impl From<Lesson> for LessonPayload {
    fn from(lesson: Lesson) -> Self {
        Self::from(&lesson)
    }
}

/// Request for one page of lessons.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListLessonsRequest {
    /// Zero-based page number.
    pub page: u32,
    /// Title ordering.
    pub direction: SortDirection,
    /// Case-insensitive title substring; empty lists every lesson.
    pub title: String,
}

/// Driving port for lesson read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LessonQuery: Send + Sync {
    /// One fixed-size page of lessons matching the title filter, sorted by
    /// title.
    async fn list_lessons(&self, request: ListLessonsRequest)
    -> Result<Page<LessonPayload>, Error>;

    /// Look a lesson up, failing with `InvalidIdentifier` when it does not
    /// exist.
    async fn get_lesson(&self, id: LessonId) -> Result<LessonPayload, Error>;

    /// Look a lesson up, returning `None` when it does not exist.
    async fn find_lesson(&self, id: LessonId) -> Result<Option<LessonPayload>, Error>;
}
