//! Identifiers for lessons, users, and teachers.
//!
//! Persistence assigns positive 64-bit keys. Each entity gets its own newtype
//! so a user id can never be passed where a lesson id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation error raised when an identifier is not a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} id must be positive, got {value}")]
pub struct IdentifierError {
    kind: &'static str,
    value: i64,
}

impl IdentifierError {
    /// Entity the identifier was meant for (`lesson`, `user`, `teacher`).
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// Rejected raw value.
    pub const fn value(&self) -> i64 {
        self.value
    }
}

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Validate a raw key.
            ///
            /// # Errors
            /// Returns [`IdentifierError`] when `value` is zero or negative.
            pub const fn new(value: i64) -> Result<Self, IdentifierError> {
                if value <= 0 {
                    return Err(IdentifierError { kind: $kind, value });
                }
                Ok(Self(value))
            }

            /// Raw key as stored by persistence.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IdentifierError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_entity_id! {
    /// Key of a [`crate::domain::Lesson`].
    ///
    /// # Examples
    /// ```
    /// use lesson_backend::domain::LessonId;
    ///
    /// assert_eq!(LessonId::new(5).map(LessonId::get), Ok(5));
    /// assert!(LessonId::new(0).is_err());
    /// ```
    LessonId => "lesson"
}

define_entity_id! {
    /// Key of a [`crate::domain::User`].
    UserId => "user"
}

define_entity_id! {
    /// Key of a [`crate::domain::Teacher`].
    TeacherId => "teacher"
}
