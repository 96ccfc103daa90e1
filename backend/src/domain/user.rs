//! Users and teachers referenced by lessons.
//!
//! Both are owned outside this service; lessons only read and link them.

use std::collections::BTreeSet;

use super::{LessonId, TeacherId, UserId};

/// A user who can enroll in lessons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    display_name: String,
    enrolled_lessons: BTreeSet<LessonId>,
}

impl User {
    /// Build a user with the lessons they are already enrolled in.
    pub fn new(
        id: UserId,
        display_name: impl Into<String>,
        enrolled_lessons: BTreeSet<LessonId>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            enrolled_lessons,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Lessons this user is enrolled in.
    pub fn enrolled_lessons(&self) -> &BTreeSet<LessonId> {
        &self.enrolled_lessons
    }

    pub(crate) fn link_lesson(&mut self, lesson: LessonId) {
        self.enrolled_lessons.insert(lesson);
    }
}

/// A teacher who can be assigned to lessons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    id: TeacherId,
    display_name: String,
}

impl Teacher {
    pub fn new(id: TeacherId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }

    pub fn id(&self) -> TeacherId {
        self.id
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }
}
