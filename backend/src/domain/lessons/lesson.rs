//! Lesson entity and its editable details.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::domain::{LessonId, Teacher, TeacherId, User, UserId};

use super::LessonValidationError;

/// The four caller-editable fields of a lesson, validated together.
///
/// Used both to create a lesson and to overwrite one.
///
/// # Examples
/// ```
/// use chrono::{Duration, Utc};
/// use lesson_backend::domain::LessonDetails;
///
/// let start = Utc::now();
/// let details = LessonDetails::new("Algebra", "Linear equations", start, start + Duration::hours(1))
///     .expect("valid details");
/// assert_eq!(details.title(), "Algebra");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonDetails {
    title: String,
    description: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl LessonDetails {
    /// Validate lesson details.
    ///
    /// # Errors
    /// Returns [`LessonValidationError::BlankTitle`] for an empty or
    /// whitespace-only title and [`LessonValidationError::EndsBeforeStart`]
    /// when `end` precedes `start`.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, LessonValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(LessonValidationError::BlankTitle);
        }
        if end < start {
            return Err(LessonValidationError::EndsBeforeStart { start, end });
        }
        Ok(Self {
            title,
            description: description.into(),
            start,
            end,
        })
    }

    /// Lesson title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Free-text description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Scheduled start.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Scheduled end.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// Input payload for [`Lesson::new`].
#[derive(Debug, Clone)]
pub struct LessonDraft {
    pub id: LessonId,
    pub details: LessonDetails,
    pub teacher: Option<TeacherId>,
    pub enrolled_users: BTreeSet<UserId>,
}

/// A persisted lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    id: LessonId,
    details: LessonDetails,
    teacher: Option<TeacherId>,
    enrolled_users: BTreeSet<UserId>,
}

impl Lesson {
    /// Assemble a lesson from already validated parts.
    pub fn new(draft: LessonDraft) -> Self {
        let LessonDraft {
            id,
            details,
            teacher,
            enrolled_users,
        } = draft;
        Self {
            id,
            details,
            teacher,
            enrolled_users,
        }
    }

    pub fn id(&self) -> LessonId {
        self.id
    }

    pub fn details(&self) -> &LessonDetails {
        &self.details
    }

    pub fn title(&self) -> &str {
        self.details.title()
    }

    pub fn description(&self) -> &str {
        self.details.description()
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.details.start()
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.details.end()
    }

    /// Assigned teacher, if any.
    pub fn teacher(&self) -> Option<TeacherId> {
        self.teacher
    }

    /// Enrolled users in ascending id order.
    pub fn enrolled_users(&self) -> &BTreeSet<UserId> {
        &self.enrolled_users
    }

    /// Whether the lesson is still ahead of `now`.
    ///
    /// A lesson starting exactly at `now` counts as started.
    ///
    /// # Examples
    /// ```
    /// use std::collections::BTreeSet;
    /// use chrono::{Duration, Utc};
    /// use lesson_backend::domain::{Lesson, LessonDetails, LessonDraft, LessonId};
    ///
    /// let now = Utc::now();
    /// let lesson = Lesson::new(LessonDraft {
    ///     id: LessonId::new(5).expect("positive id"),
    ///     details: LessonDetails::new("Chemistry", "", now, now + Duration::hours(1))
    ///         .expect("valid details"),
    ///     teacher: None,
    ///     enrolled_users: BTreeSet::new(),
    /// });
    /// assert!(!lesson.starts_after(now));
    /// assert!(lesson.starts_after(now - Duration::seconds(1)));
    /// ```
    pub fn starts_after(&self, now: DateTime<Utc>) -> bool {
        self.start() > now
    }

    /// Overwrite the four editable fields.
    pub fn revise(&mut self, details: LessonDetails) {
        self.details = details;
    }

    /// Replace the teacher reference.
    pub fn assign_teacher(&mut self, teacher: &Teacher) {
        self.teacher = Some(teacher.id());
    }

    /// Link `user` and this lesson in both directions.
    ///
    /// Returns `false` when the user was already enrolled.
    pub fn enroll(&mut self, user: &mut User) -> bool {
        user.link_lesson(self.id);
        self.enrolled_users.insert(user.id())
    }
}
