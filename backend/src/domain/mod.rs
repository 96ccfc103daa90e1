//! Domain primitives, ports, and the lesson service.
//!
//! Purpose: define the lesson entity and its collaborators, the error
//! taxonomy shared by every adapter, and the service that enforces the
//! temporal rules on lesson edits and deletions.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.
//! - [`Lesson`], [`LessonDetails`], [`User`], [`Teacher`] and their ids.
//! - [`LessonService`]: implementation of the driving ports in [`ports`].
//! - [`TraceId`]: request correlation identifier.

pub mod error;
mod ids;
mod lesson_service;
mod lessons;
pub mod ports;
mod trace_id;
mod user;

pub use self::error::{Error, ErrorCode};
pub use self::ids::{IdentifierError, LessonId, TeacherId, UserId};
pub use self::lesson_service::{LESSON_PAGE_SIZE, LessonService};
pub use self::lessons::{Lesson, LessonDetails, LessonDraft, LessonValidationError};
pub use self::trace_id::TraceId;
pub use self::user::{Teacher, User};
