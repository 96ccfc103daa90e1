//! Lesson domain types.
//!
//! A lesson is a scheduled class session with a time window, an optional
//! teacher, and a set of enrolled users. The only temporal rule the entity
//! knows about is whether it has started relative to a supplied instant; the
//! service decides what that means for each operation.

use std::fmt;

use chrono::{DateTime, Utc};

mod lesson;

pub use lesson::{Lesson, LessonDetails, LessonDraft};

/// Validation errors raised by [`LessonDetails::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonValidationError {
    /// The title is empty or whitespace only.
    BlankTitle,
    /// The lesson would end before it starts.
    EndsBeforeStart {
        /// Requested start.
        start: DateTime<Utc>,
        /// Requested end.
        end: DateTime<Utc>,
    },
}

impl LessonValidationError {
    /// Name of the offending request field.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::BlankTitle => "title",
            Self::EndsBeforeStart { .. } => "end",
        }
    }
}

impl fmt::Display for LessonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "lesson title must not be blank"),
            Self::EndsBeforeStart { start, end } => write!(
                f,
                "lesson end {} must not precede start {}",
                end.to_rfc3339(),
                start.to_rfc3339()
            ),
        }
    }
}

impl std::error::Error for LessonValidationError {}
